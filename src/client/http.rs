//! Header construction and HTTP status mapping.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::error::ClientError;

/// Build default headers for a Bearer-token request.
///
/// An empty token produces no `Authorization` header.
pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let token = token.trim();
    if !token.is_empty() {
        if let Ok(val) = HeaderValue::from_str(&format!("Bearer {token}")) {
            headers.insert(AUTHORIZATION, val);
        }
    }
    headers
}

/// Headers for a request whose response body is an SSE stream.
pub fn event_stream_headers(token: &str) -> HeaderMap {
    let mut headers = bearer_headers(token);
    headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
    headers
}

/// Map a non-success status to a [`ClientError::Request`].
pub fn status_to_error(status: u16, body: &str) -> ClientError {
    ClientError::request(status, extract_error_message(body))
}

fn extract_error_message(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["detail", "message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(str::to_string))
        });
    match message {
        Some(message) => message,
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}
