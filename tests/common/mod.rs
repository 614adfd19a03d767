//! Shared test helpers.
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use postcraft::types::{TaskState, TaskStatus, TaskType};

/// A processing/pending/terminal snapshot for `task_id`.
pub fn snapshot(task_id: &str, status: TaskState, progress: u8) -> TaskStatus {
    TaskStatus {
        task_id: task_id.to_string(),
        task_type: TaskType::Content,
        status,
        progress: f64::from(progress),
        result: None,
        error_message: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        started_at: None,
        completed_at: None,
        duration_seconds: None,
    }
}

/// A well-formed chat stream exercising every event type.
pub fn full_stream() -> String {
    [
        r#"data: {"type":"progress","step":"planning","message":"Thinking about your brand voice"}"#,
        r#"data: {"type":"function_call","tool":"search_trends","display_name":"Searching trends","arguments":{"topic":"café culture","limit":5},"current":1,"total":2,"message":"Looking up trends"}"#,
        r#"data: {"type":"function_result","tool":"search_trends","success":true,"message":"Found 5 trends"}"#,
        r#"data: {"type":"progress","step":"writing","message":"Drafting posts ✍️"}"#,
        r#"data: {"type":"done","response":"Here are three posts ☕","conversation_id":"conv-1","tool_calls":[{"tool":"search_trends","arguments":{"topic":"café culture"},"success":true}],"usage":{"input_tokens":120,"output_tokens":80,"total_tokens":200}}"#,
    ]
    .iter()
    .map(|line| format!("{line}\n\n"))
    .collect()
}

/// Split `bytes` at the given ascending offsets.
pub fn split_at_offsets(bytes: &[u8], offsets: &[usize]) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for &offset in offsets {
        chunks.push(bytes[start..offset].to_vec());
        start = offset;
    }
    chunks.push(bytes[start..].to_vec());
    chunks
}
