//! TravelMate Core Library
//!
//! This crate provides the client-side engine for the TravelMate streaming
//! travel assistant: it opens one chat request per submitted query, rebuilds
//! discrete event frames from the arbitrarily-chunked response bytes,
//! classifies each frame, accumulates the in-flight reasoning trace, and
//! finalizes exactly one message (success or error) into the conversation
//! history. Rendering is out of scope; a UI layer reads the session state
//! and calls back in through [`conversation::ChatSession::submit`].

pub mod config;
pub mod conversation;
pub mod error;
pub mod http;
pub mod protocol;
pub mod stream;

/// Returns the version of the TravelMate core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
