//! HTTP connector implementation using reqwest

use crate::config::ClientConfig;
use crate::error::ChatError;
use crate::http::error::map_status_error;
use crate::http::{ByteStream, StreamConnector};
use crate::protocol::{AgentReply, ChatRequest, HistoryEntry};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Endpoint serving buffered chat responses.
const CHAT_ENDPOINT: &str = "/api/tourism/chat";

/// Endpoint serving the event stream consumed by [`crate::stream`].
const STREAM_ENDPOINT: &str = "/api/tourism/chat/stream";

/// Endpoint for service health probes.
const HEALTH_ENDPOINT: &str = "/api/tourism/health";

/// Default user agent
const USER_AGENT: &str = concat!("travelmate/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP connector with connection pooling.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    client: Client,
    base_url: String,
}

impl HttpConnector {
    /// Create a connector from client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ChatError> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| ChatError::Connection {
                reason: format!("failed to create HTTP client: {e}"),
                detail: None,
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Buffered request/response call to the chat endpoint.
    ///
    /// The streaming path through [`StreamConnector::open_stream`] is what
    /// the conversation pipeline uses; this call returns the whole reply at
    /// once for callers that do not need live reasoning.
    pub async fn chat(
        &self,
        query: &str,
        history: &[HistoryEntry],
    ) -> Result<AgentReply, ChatError> {
        let request_id = Uuid::new_v4();
        info!("sending chat request [request_id: {}]", request_id);

        let response = self
            .post_chat(CHAT_ENDPOINT, query, history, request_id)
            .await?;
        let response = Self::check_status(response, request_id).await?;

        response
            .json::<AgentReply>()
            .await
            .map_err(|e| ChatError::Stream(format!("invalid response body: {e}")))
    }

    /// Probe the service health endpoint.
    pub async fn health_check(&self) -> Result<(), ChatError> {
        let response = self
            .client
            .get(self.url(HEALTH_ENDPOINT))
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.ok();
            Err(map_status_error(status, body))
        }
    }

    async fn post_chat(
        &self,
        endpoint: &str,
        query: &str,
        history: &[HistoryEntry],
        request_id: Uuid,
    ) -> Result<Response, ChatError> {
        let body = ChatRequest::new(query, history.to_vec());
        self.client
            .post(self.url(endpoint))
            .header("X-Request-ID", request_id.to_string())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("request failed [request_id: {}]: {}", request_id, e);
                connection_error(e)
            })
    }

    /// Reject non-success statuses, mining the body for service detail.
    async fn check_status(response: Response, request_id: Uuid) -> Result<Response, ChatError> {
        let status = response.status();
        debug!("response status: {} [request_id: {}]", status, request_id);
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.ok();
        warn!(
            "request rejected with status {} [request_id: {}]",
            status, request_id
        );
        Err(map_status_error(status, body))
    }
}

/// Failures before any payload bytes are read are connection errors.
fn connection_error(err: reqwest::Error) -> ChatError {
    ChatError::Connection {
        reason: err.to_string(),
        detail: None,
    }
}

#[async_trait]
impl StreamConnector for HttpConnector {
    async fn open_stream(
        &self,
        query: &str,
        history: &[HistoryEntry],
    ) -> Result<ByteStream, ChatError> {
        let request_id = Uuid::new_v4();
        info!("opening response stream [request_id: {}]", request_id);

        let response = self
            .post_chat(STREAM_ENDPOINT, query, history, request_id)
            .await?;
        let response = Self::check_status(response, request_id).await?;

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(ChatError::from))
            .boxed())
    }
}
