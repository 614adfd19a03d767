//! Core types shared across the client.

pub mod stream;
pub mod task;

pub use stream::{Arguments, StreamEvent, TokenUsage, ToolCallRecord};
pub use task::{TaskState, TaskStatus, TaskType};
