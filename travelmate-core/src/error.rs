//! Error types for the streaming chat client

use thiserror::Error;

/// Result type for client operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Text shown to the user when a turn fails without server-supplied detail.
pub const FALLBACK_ERROR_TEXT: &str =
    "Sorry, I encountered an error. Please make sure the assistant service is reachable and try again.";

/// Errors that can occur between submitting a query and finalizing its turn
#[derive(Debug, Error)]
pub enum ChatError {
    /// Transport could not be opened, or the response reported failure
    /// before any payload bytes arrived. `detail` carries text the service
    /// included in its failure body, when there was one.
    #[error("connection error: {reason}")]
    Connection {
        reason: String,
        detail: Option<String>,
    },

    /// One frame carried a payload that does not parse. Non-fatal: the
    /// frame is skipped and decoding continues.
    #[error("malformed frame: {0}")]
    FrameParse(String),

    /// The byte stream failed after payload bytes had been read.
    #[error("stream error: {0}")]
    Stream(String),

    /// The stream ended without ever emitting a terminal event.
    #[error("stream ended before a terminal event")]
    ProtocolViolation,
}

impl ChatError {
    /// Whether this error ends the current turn. Only malformed frames are
    /// absorbed; everything else finalizes the turn as failed.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ChatError::FrameParse(_))
    }

    /// Text persisted as the error message content when this error ends a
    /// turn. Server-supplied detail wins over the generic fallback.
    pub fn user_message(&self) -> &str {
        match self {
            ChatError::Connection {
                detail: Some(detail),
                ..
            } => detail,
            _ => FALLBACK_ERROR_TEXT,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ChatError::Connection {
                reason: err.to_string(),
                detail: None,
            }
        } else {
            ChatError::Stream(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_parse_is_not_fatal() {
        assert!(!ChatError::FrameParse("bad json".to_string()).is_fatal());
        assert!(ChatError::ProtocolViolation.is_fatal());
        assert!(ChatError::Stream("reset".to_string()).is_fatal());
    }

    #[test]
    fn user_message_prefers_server_detail() {
        let err = ChatError::Connection {
            reason: "HTTP 500".to_string(),
            detail: Some("An error occurred while processing your request.".to_string()),
        };
        assert_eq!(
            err.user_message(),
            "An error occurred while processing your request."
        );
    }

    #[test]
    fn user_message_falls_back_without_detail() {
        let err = ChatError::Connection {
            reason: "connection refused".to_string(),
            detail: None,
        };
        assert_eq!(err.user_message(), FALLBACK_ERROR_TEXT);
        assert_eq!(ChatError::ProtocolViolation.user_message(), FALLBACK_ERROR_TEXT);
    }
}
