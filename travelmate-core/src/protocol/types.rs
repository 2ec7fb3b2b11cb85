//! Core types for the travel assistant conversation
//!
//! The wire-facing structures (`ChatRequest`, `AgentReply`, `ReasoningStep`,
//! `Suggestion`) match the service's JSON shapes exactly. `Message` is the
//! client-side persisted form: immutable once appended to history.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User input message
    User,
    /// Assistant (service) response
    Assistant,
}

/// One intermediate action recorded while the service works on an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// Name of the sub-process that acted
    pub agent: String,

    /// Short description of what it did
    pub action: String,

    /// Justification for the action
    pub reason: String,
}

/// A suggested follow-up query the user can submit as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Display label
    pub text: String,

    /// Query text submitted when the suggestion is chosen
    pub query: String,
}

/// Structured payload carried by a completed answer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentReply {
    /// Natural-language answer text
    #[serde(default)]
    pub final_response: String,

    /// Location the answer is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Weather summary for the location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_info: Option<String>,

    /// Ordered list of place names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub places_info: Option<Vec<String>>,

    /// Trace reported by the service alongside the final answer. The trace
    /// the session observed live is the one persisted on the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_trace: Option<Vec<ReasoningStep>>,

    /// Suggested follow-up queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,
}

/// One finalized message in the conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,

    /// Message text
    pub content: String,

    /// Structured data carried by a completed assistant reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<AgentReply>,

    /// Reasoning steps observed live while this reply streamed, in arrival
    /// order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reasoning: Vec<ReasoningStep>,

    /// Whether this message records a failed turn
    #[serde(default)]
    pub is_error: bool,

    /// Creation time as a Unix timestamp
    pub created: i64,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content, false)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content, false)
    }

    /// Create an error-flagged assistant message
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content, true)
    }

    fn new(role: MessageRole, content: impl Into<String>, is_error: bool) -> Self {
        Self {
            role,
            content: content.into(),
            payload: None,
            reasoning: Vec::new(),
            is_error,
            created: unix_timestamp(),
        }
    }
}

/// One `{role, content}` pair sent back to the service as context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
}

/// Body of a chat request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The query being submitted
    pub query: String,

    /// Prior finalized turns, oldest first
    #[serde(default)]
    pub conversation_history: Vec<HistoryEntry>,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(query: impl Into<String>, conversation_history: Vec<HistoryEntry>) -> Self {
        Self {
            query: query.into(),
            conversation_history,
        }
    }
}

fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn chat_request_wire_shape() {
        let request = ChatRequest::new(
            "What's the weather in Paris?",
            vec![HistoryEntry {
                role: MessageRole::Assistant,
                content: "Hi!".to_string(),
            }],
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query"], "What's the weather in Paris?");
        assert_eq!(json["conversation_history"][0]["role"], "assistant");
        assert_eq!(json["conversation_history"][0]["content"], "Hi!");
    }

    #[test]
    fn agent_reply_parses_minimal_payload() {
        let reply: AgentReply =
            serde_json::from_str(r#"{"final_response":"It is 18°C in Paris"}"#).unwrap();
        assert_eq!(reply.final_response, "It is 18°C in Paris");
        assert!(reply.location.is_none());
        assert!(reply.suggestions.is_none());
    }

    #[test]
    fn agent_reply_parses_full_payload() {
        let reply: AgentReply = serde_json::from_str(
            r#"{
                "final_response": "Plenty to see in Tokyo.",
                "location": "Tokyo",
                "weather_info": "22°C, clear",
                "places_info": ["Senso-ji", "Meiji Shrine"],
                "reasoning_trace": [
                    {"agent": "PlacesAgent", "action": "lookup", "reason": "user asked for attractions"}
                ],
                "suggestions": [
                    {"text": "Weather tomorrow?", "query": "What is the weather in Tokyo tomorrow?"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(reply.location.as_deref(), Some("Tokyo"));
        assert_eq!(reply.places_info.as_ref().unwrap().len(), 2);
        assert_eq!(reply.reasoning_trace.as_ref().unwrap()[0].agent, "PlacesAgent");
        assert_eq!(reply.suggestions.as_ref().unwrap()[0].text, "Weather tomorrow?");
    }

    #[test]
    fn error_message_is_flagged() {
        let message = Message::error("upstream timeout");
        assert!(message.is_error);
        assert_eq!(message.role, MessageRole::Assistant);
        assert!(message.reasoning.is_empty());
    }
}
