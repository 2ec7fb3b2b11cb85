//! Streaming pipeline: frame decoding and event classification
//!
//! The service pushes its answer as a sequence of text frames separated by a
//! blank line, each carrying one JSON object after a `data: ` marker. The
//! bytes arrive chunked at arbitrary boundaries, so [`FrameDecoder`] carries
//! partial frames and partial multi-byte characters across chunks, and
//! [`classify_frame`] turns each completed frame into a [`StreamEvent`] for
//! the conversation state to consume.

pub mod decoder;
pub mod event;

pub use decoder::FrameDecoder;
pub use event::{classify_frame, StreamEvent};
