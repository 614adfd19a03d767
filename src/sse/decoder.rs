//! Incremental decoder for the chat SSE wire format.

use tracing::{debug, warn};

use crate::error::ClientError;
use crate::types::StreamEvent;

const EVENT_SEPARATOR: &[u8] = b"\n\n";
const DATA_PREFIX: &str = "data: ";

/// Buffers arbitrarily-chunked bytes and yields complete [`StreamEvent`]s.
///
/// Bytes are held until a blank-line separator is seen, so chunk boundaries
/// may fall anywhere, including inside a multi-byte UTF-8 character.
///
/// # Example
/// ```
/// use postcraft::sse::SseDecoder;
///
/// let mut decoder = SseDecoder::new();
/// assert!(decoder.push(b"data: {\"type\":\"progress\",").is_empty());
/// let events = decoder.push(b"\"step\":\"draft\",\"message\":\"Writing\"}\n\n");
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    /// Length of `buffer` already searched for a separator.
    scanned: usize,
    terminated: bool,
    malformed: usize,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return every event completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut consumed = 0;
        // A separator may straddle the previous chunk's last byte.
        let mut search_from = self.scanned.saturating_sub(EVENT_SEPARATOR.len() - 1);
        while let Some(offset) = find_separator(&self.buffer[search_from..]) {
            let block_end = search_from + offset;
            let block = String::from_utf8_lossy(&self.buffer[consumed..block_end]).into_owned();
            consumed = block_end + EVENT_SEPARATOR.len();
            search_from = consumed;
            self.decode_block(&block, &mut events);
        }
        self.buffer.drain(..consumed);
        self.scanned = self.buffer.len();

        events
    }

    /// Whether a `done` or `error` event has been decoded.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Number of `data:` lines dropped because they failed to parse.
    pub fn malformed_count(&self) -> usize {
        self.malformed
    }

    /// End of input. Returns the number of trailing bytes discarded.
    pub fn finish(self) -> usize {
        if !self.buffer.is_empty() {
            debug!(
                bytes = self.buffer.len(),
                "Discarding incomplete trailing SSE block"
            );
        }
        self.buffer.len()
    }

    fn decode_block(&mut self, block: &str, events: &mut Vec<StreamEvent>) {
        for line in block.split('\n') {
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };

            let event = match serde_json::from_str::<StreamEvent>(payload) {
                Ok(event) => event,
                Err(e) => {
                    self.malformed += 1;
                    let err = ClientError::MalformedEvent {
                        line: payload.to_string(),
                        message: e.to_string(),
                    };
                    warn!(error = %err, "Skipping malformed stream event");
                    continue;
                }
            };

            if self.terminated {
                debug!(kind = event.kind(), "Ignoring event after stream termination");
                continue;
            }
            self.terminated = event.is_terminal();
            events.push(event);
        }
    }
}

fn find_separator(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(EVENT_SEPARATOR.len())
        .position(|window| window == EVENT_SEPARATOR)
}
