//! Incremental frame decoder for the response byte stream
//!
//! Network chunks end at arbitrary byte offsets: inside a multi-byte
//! character, inside the frame delimiter, or mid-frame. The decoder carries
//! every kind of partial state across calls, so the emitted frame sequence
//! is identical no matter how the stream was chunked.

use tracing::trace;

/// Marker introducing the payload line of a frame.
const DATA_PREFIX: &str = "data: ";

/// Blank-line delimiter separating frames on the wire.
const FRAME_DELIMITER: &str = "\n\n";

/// Decodes raw byte chunks into complete frame payloads.
///
/// One decoder is private to a single response stream and must not be
/// reused across streams.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Bytes held back because the chunk ended inside a multi-byte
    /// character.
    carry: Vec<u8>,

    /// Decoded text of the trailing, not-yet-delimited frame.
    buffer: String,
}

impl FrameDecoder {
    /// Create a decoder with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk and collect every frame payload it completes,
    /// in order.
    ///
    /// A payload is the text after the frame's `data: ` line. Frames without
    /// that marker (comments, keep-alives) are silently dropped. The final,
    /// possibly-incomplete segment stays buffered until a later delimiter
    /// completes it.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode_text(chunk);
        self.drain_frames()
    }

    /// Whether undelivered partial state remains buffered.
    pub fn has_partial(&self) -> bool {
        !self.buffer.is_empty() || !self.carry.is_empty()
    }

    /// Decode carried plus incoming bytes, holding back an incomplete
    /// trailing sequence for the next chunk. Invalid sequences decode to
    /// U+FFFD.
    fn decode_text(&mut self, chunk: &[u8]) {
        let mut bytes = std::mem::take(&mut self.carry);
        bytes.extend_from_slice(chunk);

        let mut offset = 0;
        while offset < bytes.len() {
            match std::str::from_utf8(&bytes[offset..]) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    offset = bytes.len();
                }
                Err(err) => {
                    let valid_end = offset + err.valid_up_to();
                    if let Ok(text) = std::str::from_utf8(&bytes[offset..valid_end]) {
                        self.buffer.push_str(text);
                    }
                    match err.error_len() {
                        Some(invalid_len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            offset = valid_end + invalid_len;
                        }
                        // The trailing bytes may be the start of a character
                        // completed by the next chunk.
                        None => {
                            self.carry = bytes[valid_end..].to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Split complete frames off the buffer, keeping the trailing partial
    /// segment.
    fn drain_frames(&mut self) -> Vec<String> {
        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.find(FRAME_DELIMITER) {
            let rest = self.buffer.split_off(pos + FRAME_DELIMITER.len());
            let mut frame = std::mem::replace(&mut self.buffer, rest);
            frame.truncate(pos);
            match extract_payload(&frame) {
                Some(payload) => payloads.push(payload.to_string()),
                None => trace!("dropping frame without data marker: {:?}", frame),
            }
        }
        payloads
    }
}

/// The payload of a frame: the text after its `data: ` line.
fn extract_payload(frame: &str) -> Option<&str> {
    frame
        .lines()
        .find_map(|line| line.strip_prefix(DATA_PREFIX))
}
