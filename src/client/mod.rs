//! HTTP client for the chat stream and task status endpoints.
//!
//! Credentials are passed per call; this client never stores them.

pub mod http;

use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::poll::{poll_task, PollOptions, ProgressObserver};
use crate::sse::{decode_stream, event_stream, DecodeSummary, EventConsumer};
use crate::types::{StreamEvent, TaskStatus};

use self::http::{bearer_headers, event_stream_headers, status_to_error};

/// Body of a chat turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn in_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    pub fn for_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// Thin transport over the Postcraft REST API.
///
/// # Example
/// ```no_run
/// use postcraft::client::{ApiClient, ChatRequest};
/// use postcraft::config::ClientConfig;
/// use postcraft::types::StreamEvent;
///
/// # async fn example() -> postcraft::error::Result<()> {
/// let client = ApiClient::new(ClientConfig::from_env())?;
/// let request = ChatRequest::new("Draft a launch post").for_platform("linkedin");
/// client
///     .stream_chat("token", &request, &mut |event: StreamEvent| println!("{event:?}"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a chat turn and push each streamed event to `consumer`.
    ///
    /// A rejected request fails before any decoding happens.
    pub async fn stream_chat<C>(
        &self,
        token: &str,
        request: &ChatRequest,
        consumer: &mut C,
    ) -> Result<DecodeSummary>
    where
        C: EventConsumer + ?Sized,
    {
        let resp = self.open_chat_stream(token, request).await?;
        decode_stream(resp.bytes_stream(), consumer).await
    }

    /// Send a chat turn and return its events as a stream.
    pub async fn chat_events(
        &self,
        token: &str,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent>>> {
        let resp = self.open_chat_stream(token, request).await?;
        Ok(event_stream(resp.bytes_stream()))
    }

    /// Fetch the current snapshot of a background task.
    pub async fn get_task_status(&self, token: &str, task_id: &str) -> Result<TaskStatus> {
        let url = self.config.resource_url("tasks", task_id)?;
        debug!(task_id, "Fetching task status");

        let resp = self
            .http
            .get(url)
            .headers(bearer_headers(token))
            .timeout(self.config.request_timeout())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Poll a task until it completes or fails.
    pub async fn wait_for_task(
        &self,
        token: &str,
        task_id: &str,
        options: &PollOptions,
        observer: Option<ProgressObserver<'_>>,
    ) -> Result<TaskStatus> {
        poll_task(
            task_id,
            options,
            move || self.get_task_status(token, task_id),
            observer,
        )
        .await
    }

    /// Default poll options derived from the configured interval.
    pub fn poll_options(&self) -> PollOptions {
        PollOptions::builder()
            .interval(self.config.poll_interval())
            .build()
    }

    async fn open_chat_stream(&self, token: &str, request: &ChatRequest) -> Result<reqwest::Response> {
        let url = self.config.endpoint("chat/stream");
        debug!(
            conversation_id = request.conversation_id.as_deref(),
            "Opening chat stream"
        );

        let resp = self
            .http
            .post(&url)
            .headers(event_stream_headers(token))
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }
        Ok(resp)
    }
}
