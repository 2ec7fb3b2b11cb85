//! Protocol module for the travel assistant wire and session structures
//!
//! This module defines the data models shared by the HTTP connector, the
//! streaming pipeline, and the conversation state. These structures are:
//! - Faithful to the service's wire shapes
//! - Forward-compatible through optional fields
//! - Type-safe and serializable

pub mod types;

pub use types::{
    AgentReply, ChatRequest, HistoryEntry, Message, MessageRole, ReasoningStep, Suggestion,
};
