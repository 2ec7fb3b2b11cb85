//! HTTP error mapping utilities

use crate::error::ChatError;
use reqwest::StatusCode;
use serde_json::Value;

/// Map a non-success HTTP status and optional response body to a
/// [`ChatError::Connection`], mining the body for service-supplied detail.
pub fn map_status_error(status: StatusCode, body: Option<String>) -> ChatError {
    let detail = body.as_deref().and_then(extract_detail);
    ChatError::Connection {
        reason: format!("HTTP error {}", status.as_u16()),
        detail,
    }
}

/// Extract a human-readable detail string from an error response body.
fn extract_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    // FastAPI format: { "detail": "..." }
    if let Some(detail) = json.get("detail").and_then(Value::as_str) {
        return Some(detail.to_string());
    }

    // Generic formats: { "message": "..." } or { "error": "..." }
    if let Some(message) = json.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    if let Some(error) = json.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fastapi_detail() {
        let err = map_status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(r#"{"detail":"An error occurred while processing your request. Please try again."}"#.to_string()),
        );
        assert_eq!(
            err.user_message(),
            "An error occurred while processing your request. Please try again."
        );
    }

    #[test]
    fn extracts_generic_message_field() {
        let err = map_status_error(
            StatusCode::BAD_GATEWAY,
            Some(r#"{"message":"upstream unavailable"}"#.to_string()),
        );
        assert_eq!(err.user_message(), "upstream unavailable");
    }

    #[test]
    fn non_json_body_has_no_detail() {
        let err = map_status_error(StatusCode::BAD_GATEWAY, Some("<html>502</html>".to_string()));
        assert!(matches!(err, ChatError::Connection { detail: None, .. }));
    }

    #[test]
    fn missing_body_has_no_detail() {
        let err = map_status_error(StatusCode::SERVICE_UNAVAILABLE, None);
        match err {
            ChatError::Connection { reason, detail } => {
                assert_eq!(reason, "HTTP error 503");
                assert!(detail.is_none());
            }
            other => panic!("expected connection error, got {other:?}"),
        }
    }
}
