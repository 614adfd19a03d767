//! Convenience re-exports for common use.

pub use crate::client::{ApiClient, ChatRequest};
pub use crate::config::ClientConfig;
pub use crate::error::{ClientError, Result};
pub use crate::poll::{poll_task, OverlapPolicy, PollOptions};
pub use crate::sse::{decode_stream, DecodeSummary, EventConsumer, SseDecoder};
pub use crate::types::{StreamEvent, TaskState, TaskStatus, TaskType};
