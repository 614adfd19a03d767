//! Events carried by the chat SSE stream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema-less argument mapping as sent by the backend.
pub type Arguments = Map<String, Value>;

/// A single event decoded from the chat stream, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// The agent moved to a new step.
    Progress {
        #[serde(default)]
        step: String,
        #[serde(default)]
        message: String,
    },
    /// A tool is about to run.
    FunctionCall {
        tool: String,
        #[serde(default)]
        display_name: String,
        #[serde(default)]
        arguments: Arguments,
        #[serde(default)]
        current: u32,
        #[serde(default)]
        total: u32,
        #[serde(default)]
        message: String,
    },
    /// A tool finished.
    FunctionResult {
        tool: String,
        success: bool,
        #[serde(default)]
        message: String,
    },
    /// Final response; terminates the stream.
    Done {
        #[serde(default)]
        response: String,
        #[serde(default)]
        conversation_id: String,
        #[serde(default)]
        tool_calls: Vec<ToolCallRecord>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<TokenUsage>,
    },
    /// Backend-reported failure; terminates the stream.
    Error { message: String },
}

impl StreamEvent {
    /// Returns true if this event terminates the stream (`done` or `error`).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }

    /// The wire discriminator of this event.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Progress { .. } => "progress",
            Self::FunctionCall { .. } => "function_call",
            Self::FunctionResult { .. } => "function_result",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
        }
    }
}

/// A tool invocation reported in the `done` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub arguments: Arguments,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// Token usage for a completed chat turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}
