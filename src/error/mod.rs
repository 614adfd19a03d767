//! Error types for Postcraft.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all Postcraft client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Request failed (status {status}): {message}")]
    Request { status: u16, message: String },

    #[error("Stream read error: {0}")]
    StreamRead(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Malformed event: {message}")]
    MalformedEvent {
        line: String,
        message: String,
    },

    #[error("Task {task_id} failed: {message}")]
    TaskFailed { task_id: String, message: String },

    #[error("Polling task {task_id} failed: {source}")]
    PollTransport {
        task_id: String,
        #[source]
        source: Box<ClientError>,
    },

    #[error("Operation canceled")]
    Canceled,

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a request error for a rejected HTTP status.
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Create a task failure, falling back to a generic message.
    pub fn task_failed(task_id: impl Into<String>, message: Option<String>) -> Self {
        Self::TaskFailed {
            task_id: task_id.into(),
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Task failed".to_string()),
        }
    }

    /// Wrap a failed status fetch.
    pub fn poll_transport(task_id: impl Into<String>, source: ClientError) -> Self {
        Self::PollTransport {
            task_id: task_id.into(),
            source: Box::new(source),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Request { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::StreamRead(_) | Self::Network(_) => ErrorCategory::Network,
            Self::MalformedEvent { .. } | Self::Serialization(_) => ErrorCategory::Serialization,
            Self::TaskFailed { .. } => ErrorCategory::Task,
            Self::PollTransport { source, .. } => source.category(),
            Self::Canceled => ErrorCategory::Canceled,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Io(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether this error is potentially retryable by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::RateLimit
            | ErrorCategory::Network
            | ErrorCategory::Server => RecoverySuggestion::RetryLater,
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Task => RecoverySuggestion::ResubmitTask,
            ErrorCategory::Canceled => RecoverySuggestion::NoAction,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ClientError>;
