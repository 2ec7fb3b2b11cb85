//! Conversation state: persisted history, the single live turn, and the
//! submit-to-finalize pipeline
//!
//! The session is the only writer of conversation state. Reading the next
//! byte chunk is its only suspension point, so between awaits no other code
//! mutates the turn and no locking is needed.

pub mod history;
pub mod session;
pub mod turn;

pub use history::conversation_context;
pub use session::ChatSession;
pub use turn::Turn;
