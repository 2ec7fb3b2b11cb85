//! Event classification for decoded frame payloads

use crate::error::ChatError;
use crate::protocol::{AgentReply, ReasoningStep};
use serde::Deserialize;

/// One classified event from the response stream.
///
/// Events are consumed by the conversation state and never persisted
/// themselves.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// An intermediate step recorded while the answer is being produced
    Reasoning { data: ReasoningStep },

    /// The final answer; terminal for the turn
    Complete { data: AgentReply },

    /// A failure reported by the producer; terminal for the turn
    Error { message: String },

    /// An event kind this client does not know about. Ignored without
    /// failing the turn.
    #[serde(other)]
    Unrecognized,
}

impl StreamEvent {
    /// Whether this event ends the turn.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Complete { .. } | StreamEvent::Error { .. })
    }
}

/// Classify one frame payload.
///
/// A payload that is not valid JSON, or that carries a known event kind with
/// a malformed body, fails with [`ChatError::FrameParse`]; the caller skips
/// that frame and continues. A payload with a missing or unknown
/// discriminator classifies as [`StreamEvent::Unrecognized`].
pub fn classify_frame(payload: &str) -> Result<StreamEvent, ChatError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| ChatError::FrameParse(e.to_string()))?;

    if !value.get("type").is_some_and(serde_json::Value::is_string) {
        return Ok(StreamEvent::Unrecognized);
    }

    serde_json::from_value(value).map_err(|e| ChatError::FrameParse(e.to_string()))
}
