//! Server-sent event decoder.
//!
//! Turns a stream of arbitrary byte chunks (an HTTP response body) into a
//! lazy stream of `data:` payload strings. Protocol-generic: it knows
//! nothing about what the payloads contain.
//!
//! Line splitting, CRLF handling and UTF-8 reassembly across chunks are done
//! by [`eventsource_stream`]. Every `data:` line becomes its own payload, so
//! an event carrying several data lines yields them one by one. The body is
//! followed by a blank line before it ends, which makes a final
//! unterminated `data:` line count as a complete event.

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use eventsource_stream::{EventStream, Eventsource};
use futures_util::stream::{self, Chain, Iter, Map};
use futures_util::{Stream, StreamExt};
use pin_project_lite::pin_project;

use pressroom_types::error::ConferenceError;

/// One body chunk, or the blank line appended after the last one.
enum BodyChunk<B> {
    Bytes(B),
    End,
}

impl<B: AsRef<[u8]>> AsRef<[u8]> for BodyChunk<B> {
    fn as_ref(&self) -> &[u8] {
        match self {
            BodyChunk::Bytes(bytes) => bytes.as_ref(),
            BodyChunk::End => b"\n\n",
        }
    }
}

type Terminated<S, B, E> = Chain<
    Map<S, fn(Result<B, E>) -> Result<BodyChunk<B>, E>>,
    Iter<std::iter::Once<Result<BodyChunk<B>, E>>>,
>;

fn wrap_chunk<B, E>(chunk: Result<B, E>) -> Result<BodyChunk<B>, E> {
    chunk.map(BodyChunk::Bytes)
}

pin_project! {
    /// Lazy, pull-based `data:` payload stream over a byte-chunk stream.
    ///
    /// Not restartable. Dropping it drops the inner body stream, which
    /// releases the connection. The first error ends the stream.
    pub struct EventStreamDecoder<S, B, E> {
        #[pin]
        events: EventStream<Terminated<S, B, E>>,
        pending: VecDeque<String>,
        finished: bool,
    }
}

impl<S, B, E> EventStreamDecoder<S, B, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    pub fn new(inner: S) -> Self {
        let body: Terminated<S, B, E> = inner
            .map(wrap_chunk as fn(Result<B, E>) -> Result<BodyChunk<B>, E>)
            .chain(stream::iter(std::iter::once(Ok(BodyChunk::End))));
        Self {
            events: body.eventsource(),
            pending: VecDeque::new(),
            finished: false,
        }
    }
}

impl<S, B, E> Stream for EventStreamDecoder<S, B, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    type Item = Result<String, ConferenceError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(payload) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(payload)));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            match ready!(this.events.as_mut().poll_next(cx)) {
                Some(Ok(event)) => {
                    this.pending.extend(event.data.split('\n').map(str::to_owned));
                }
                Some(Err(err)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(ConferenceError::Transport(format!(
                        "response body read: {err}"
                    )))));
                }
                None => *this.finished = true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{StreamExt, stream};

    async fn decode(chunks: &[&'static [u8]]) -> Vec<String> {
        let body = stream::iter(chunks.iter().copied().map(Ok::<_, std::io::Error>));
        EventStreamDecoder::new(body)
            .map(|item| item.unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_data_prefix_variants() {
        let payloads = decode(&[
            b"data: {\"a\":1}\n\ndata:{\"a\":2}\r\n\r\ndata:  two spaces\n\n   data: indented\n\n",
        ])
        .await;
        assert_eq!(payloads, vec!["{\"a\":1}", "{\"a\":2}", " two spaces"]);
    }

    #[tokio::test]
    async fn test_only_data_lines_are_yielded() {
        let payloads = decode(&[
            b": ping\n\nevent: chunk\ndata: first\n\nid: 7\ndata: second\n\n",
        ])
        .await;
        assert_eq!(payloads, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_consecutive_data_lines_are_separate_payloads() {
        let payloads = decode(&[b"data: one\ndata: two\n\n"]).await;
        assert_eq!(payloads, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_lines_split_across_chunks() {
        let payloads = decode(&[b"da", b"ta: hel", b"lo\r", b"\n\ndata: wor", b"ld\n"]).await;
        assert_eq!(payloads, vec!["hello", "world"]);
    }

    #[tokio::test]
    async fn test_multibyte_utf8_split_across_chunks() {
        // "é" is 0xC3 0xA9
        let payloads = decode(&[b"data: caf\xC3", b"\xA9\n\n"]).await;
        assert_eq!(payloads, vec!["café"]);
    }

    #[tokio::test]
    async fn test_unterminated_final_line_is_decoded() {
        let payloads = decode(&[b"data: one\n\n", b"data: two"]).await;
        assert_eq!(payloads, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_byte_at_a_time_matches_single_chunk() {
        const BODY: &[u8] = b"data: {\"x\":\"a\"}\r\n\r\n: comment\ndata: {\"x\":\"b\"}\n\n";
        let whole = decode(&[BODY]).await;
        let bytewise = decode(&BODY.chunks(1).collect::<Vec<_>>()).await;
        assert_eq!(whole, bytewise);
        assert_eq!(whole.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_body() {
        assert!(decode(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_body_error_surfaces_as_transport_error_and_ends() {
        let body = stream::iter(vec![
            Ok(b"data: ok\n\n".to_vec()),
            Err("connection reset by peer"),
            Ok(b"data: never\n\n".to_vec()),
        ]);
        let items: Vec<_> = EventStreamDecoder::new(body).collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_deref().ok(), Some("ok"));
        match &items[1] {
            Err(ConferenceError::Transport(msg)) => assert!(msg.contains("connection reset")),
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
