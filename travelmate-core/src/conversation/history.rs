//! Projection of persisted messages into outgoing request context

use crate::protocol::{HistoryEntry, Message};

/// Project the persisted message list into the `{role, content}` pairs sent
/// with the next request.
///
/// The first message is the static greeting seed and is always excluded.
/// Order is preserved; no truncation or summarization happens here.
pub fn conversation_context(messages: &[Message]) -> Vec<HistoryEntry> {
    messages
        .iter()
        .skip(1)
        .map(|message| HistoryEntry {
            role: message.role,
            content: message.content.clone(),
        })
        .collect()
}
