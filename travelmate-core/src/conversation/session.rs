//! The chat session: state aggregation and the streaming pipeline driver

use crate::conversation::history::conversation_context;
use crate::conversation::turn::Turn;
use crate::error::ChatError;
use crate::http::StreamConnector;
use crate::protocol::{AgentReply, HistoryEntry, Message, ReasoningStep};
use crate::stream::{classify_frame, FrameDecoder, StreamEvent};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Owns the persisted message history and at most one live turn.
///
/// `submit` drives a query through connector, decoder, and classifier until
/// the turn finalizes; the event-level methods ([`ChatSession::begin_turn`],
/// [`ChatSession::apply_event`], [`ChatSession::abort_turn`],
/// [`ChatSession::finish_stream`]) are the aggregation contract itself and
/// can be driven directly.
pub struct ChatSession {
    connector: Arc<dyn StreamConnector>,
    messages: Vec<Message>,
    turn: Option<Turn>,
}

impl ChatSession {
    /// Create a session seeded with the assistant greeting. The seed is
    /// shown to the user but never sent back as context.
    pub fn new(connector: Arc<dyn StreamConnector>, greeting: impl Into<String>) -> Self {
        Self {
            connector,
            messages: vec![Message::assistant(greeting)],
            turn: None,
        }
    }

    /// Finalized messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Reasoning steps observed so far for the live turn. Empty while idle.
    pub fn live_reasoning(&self) -> &[ReasoningStep] {
        self.turn.as_ref().map(Turn::reasoning).unwrap_or(&[])
    }

    /// Whether a turn is currently streaming.
    pub fn is_streaming(&self) -> bool {
        self.turn.is_some()
    }

    /// Submit a query and drive it to a finalized message.
    ///
    /// Blank input and submissions while a turn is streaming are ignored.
    /// Failures never propagate past this method: every accepted submission
    /// appends exactly one message, success or error.
    pub async fn submit(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let Some(context) = self.begin_turn(query) else {
            return;
        };

        if let Err(err) = self.run_turn(query, &context).await {
            warn!("turn aborted: {}", err);
            self.abort_turn(&err);
        }
    }

    /// Begin a new turn: snapshot the outgoing context, persist the user
    /// message, and create the live turn.
    ///
    /// Returns `None` without mutating anything while a turn is already
    /// streaming; submissions are rejected rather than queued.
    pub fn begin_turn(&mut self, query: &str) -> Option<Vec<HistoryEntry>> {
        if self.turn.is_some() {
            debug!("submission ignored: a turn is already streaming");
            return None;
        }
        let context = conversation_context(&self.messages);
        self.messages.push(Message::user(query));
        self.turn = Some(Turn::new());
        Some(context)
    }

    /// Apply one classified event to the live turn.
    pub fn apply_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Reasoning { data } => {
                if let Some(turn) = self.turn.as_mut() {
                    turn.record_step(data);
                }
            }
            StreamEvent::Complete { data } => self.finalize_success(data),
            StreamEvent::Error { message } => self.finalize_error(message),
            StreamEvent::Unrecognized => trace!("ignoring unrecognized event"),
        }
    }

    /// Finalize the live turn as failed with the error's user-facing text.
    pub fn abort_turn(&mut self, err: &ChatError) {
        self.finalize_error(err.user_message().to_string());
    }

    /// End-of-stream guard: a turn still live when the source is exhausted
    /// must surface a failure rather than stay silently open.
    pub fn finish_stream(&mut self) {
        if self.turn.is_some() {
            self.abort_turn(&ChatError::ProtocolViolation);
        }
    }

    /// Pump the byte stream through decoding and classification until the
    /// source ends.
    async fn run_turn(&mut self, query: &str, context: &[HistoryEntry]) -> Result<(), ChatError> {
        let mut stream = self.connector.open_stream(query, context).await?;
        let mut decoder = FrameDecoder::new();

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                // A transport failure after the terminal event changes
                // nothing the user can see.
                Err(err) if self.turn.is_none() => {
                    debug!("ignoring post-terminal stream failure: {}", err);
                    break;
                }
                Err(err) => return Err(err),
            };

            for payload in decoder.push_chunk(&chunk) {
                match classify_frame(&payload) {
                    Ok(event) => self.apply_event(event),
                    Err(err) => warn!("skipping malformed frame: {}", err),
                }
            }
        }

        if decoder.has_partial() {
            debug!("stream ended with a partial frame still buffered");
        }

        if self.turn.is_some() {
            Err(ChatError::ProtocolViolation)
        } else {
            Ok(())
        }
    }

    /// Consume the live turn into a successful assistant message. The
    /// client-accumulated reasoning is what the message carries; the
    /// server-supplied trace stays inside the structured payload.
    fn finalize_success(&mut self, reply: AgentReply) {
        let Some(turn) = self.turn.take() else {
            debug!("duplicate terminal event ignored");
            return;
        };
        let steps = turn.into_steps();
        info!(
            "turn finalized: {} reasoning steps observed",
            steps.len()
        );

        let mut message = Message::assistant(reply.final_response.clone());
        message.reasoning = steps;
        message.payload = Some(reply);
        self.messages.push(message);
    }

    /// Consume the live turn into an error message, discarding accumulated
    /// reasoning.
    fn finalize_error(&mut self, message: String) {
        if self.turn.take().is_none() {
            debug!("duplicate terminal event ignored");
            return;
        }
        warn!("turn failed: {}", message);
        self.messages.push(Message::error(message));
    }
}
