//! HTTP layer for the travel assistant service
//!
//! This module implements the outbound side of the client:
//! - A connector trait that opens one streaming chat request and exposes the
//!   response as raw byte chunks
//! - A pooled reqwest implementation of that trait
//! - Error mapping from failure statuses and bodies
//!
//! The connector never interprets payload content; framing and
//! classification live in [`crate::stream`].

pub mod client;
pub mod error;

pub use client::HttpConnector;

use crate::error::ChatError;
use crate::protocol::HistoryEntry;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Raw byte chunks of one response, in arrival order.
pub type ByteStream = BoxStream<'static, Result<Bytes, ChatError>>;

/// Opens one streaming chat request per submitted query.
///
/// This is the seam between the conversation state and the transport; tests
/// substitute scripted implementations.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    /// Issue the outbound request and return the response bytes as they
    /// arrive.
    ///
    /// Fails with [`ChatError::Connection`] if the transport cannot be
    /// opened or the response reports failure before any payload bytes are
    /// read.
    async fn open_stream(
        &self,
        query: &str,
        history: &[HistoryEntry],
    ) -> Result<ByteStream, ChatError>;
}
