//! Server-sent-event decoding for the chat stream.
//!
//! [`decode_stream`] drives an [`SseDecoder`] over a byte stream and pushes
//! each event to an [`EventConsumer`]. [`event_stream`] exposes the same
//! decoding as a pull-based `Stream`.

pub mod decoder;

pub use decoder::SseDecoder;

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::types::StreamEvent;

/// Receives decoded stream events, one call per event.
pub trait EventConsumer {
    fn on_event(&mut self, event: StreamEvent);
}

impl<F> EventConsumer for F
where
    F: FnMut(StreamEvent),
{
    fn on_event(&mut self, event: StreamEvent) {
        self(event)
    }
}

/// Outcome of decoding a complete stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeSummary {
    /// Events handed to the consumer.
    pub delivered: usize,
    /// `data:` lines dropped as malformed.
    pub malformed: usize,
    /// The `done` or `error` event, if the stream produced one.
    pub terminal: Option<StreamEvent>,
    /// Trailing bytes discarded at end of input.
    pub discarded_bytes: usize,
}

/// Decode `stream` to completion, delivering every event to `consumer`.
///
/// All events completed by a chunk are delivered before the next chunk is
/// polled. A read error aborts decoding with [`ClientError::StreamRead`];
/// malformed lines are logged and skipped.
pub async fn decode_stream<S, B, E, C>(stream: S, consumer: &mut C) -> Result<DecodeSummary>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
    C: EventConsumer + ?Sized,
{
    futures::pin_mut!(stream);
    let mut decoder = SseDecoder::new();
    let mut summary = DecodeSummary::default();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ClientError::StreamRead(Box::new(e)))?;
        for event in decoder.push(chunk.as_ref()) {
            if event.is_terminal() {
                summary.terminal = Some(event.clone());
            }
            summary.delivered += 1;
            consumer.on_event(event);
        }
    }

    summary.malformed = decoder.malformed_count();
    summary.discarded_bytes = decoder.finish();
    debug!(
        delivered = summary.delivered,
        malformed = summary.malformed,
        "Stream decoding finished"
    );
    Ok(summary)
}

/// Decode `stream` lazily into a stream of events.
///
/// A read error is yielded once and ends the stream.
pub fn event_stream<S, B, E>(stream: S) -> BoxStream<'static, Result<StreamEvent>>
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let events = async_stream::stream! {
        futures::pin_mut!(stream);
        let mut decoder = SseDecoder::new();

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(chunk) => {
                    for event in decoder.push(chunk.as_ref()) {
                        yield Ok(event);
                    }
                }
                Err(e) => {
                    yield Err(ClientError::StreamRead(Box::new(e)));
                    break;
                }
            }
        }

        decoder.finish();
    };

    Box::pin(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn ok_chunks(chunks: &[&'static str]) -> Vec<std::result::Result<&'static [u8], std::io::Error>> {
        chunks.iter().map(|c| Ok(c.as_bytes())).collect()
    }

    #[tokio::test]
    async fn decode_stream_reports_terminal_event() {
        let chunks = ok_chunks(&[
            "data: {\"type\":\"progress\",\"step\":\"x\",\"message\":\"y\"}\n\n",
            "data: {\"type\":\"done\",\"response\":\"ok\",\"conversation_id\":\"c1\",\"tool_calls\":[]}\n\n",
        ]);
        let mut seen = Vec::new();
        let summary = decode_stream(stream::iter(chunks), &mut |e: StreamEvent| seen.push(e))
            .await
            .unwrap();

        assert_eq!(summary.delivered, 2);
        assert_eq!(seen.len(), 2);
        assert!(matches!(summary.terminal, Some(StreamEvent::Done { .. })));
    }

    #[tokio::test]
    async fn decode_stream_fails_on_read_error() {
        let chunks: Vec<std::result::Result<&'static [u8], std::io::Error>> = vec![
            Ok(b"data: {\"type\":\"progress\",\"step\":\"x\",\"message\":\"y\"}\n\n".as_slice()),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ];
        let mut seen = 0;
        let result = decode_stream(stream::iter(chunks), &mut |_e: StreamEvent| seen += 1).await;

        assert!(matches!(result, Err(ClientError::StreamRead(_))));
        assert_eq!(seen, 1);
    }

    #[tokio::test]
    async fn event_stream_yields_error_once_and_stops() {
        let chunks: Vec<std::result::Result<&'static [u8], std::io::Error>> = vec![
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone")),
            Ok(b"data: {\"type\":\"error\",\"message\":\"never\"}\n\n".as_slice()),
        ];
        let items: Vec<_> = event_stream(stream::iter(chunks)).collect().await;

        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }
}
