//! Turn aggregation: one model response stream in, one `TurnResult` out.

use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use pressroom_types::conference::TurnResult;
use pressroom_types::error::ConferenceError;
use pressroom_types::llm::StreamEvent;

use super::sink::TurnSink;

/// Drain one model turn's event stream.
///
/// Every non-empty text fragment is forwarded to `sink` the moment it is
/// pulled, then appended to the result, so `result.text` is exactly the
/// ordered concatenation of what the sink saw. Recoverable stream errors are
/// skipped; the first fatal error aborts and is returned with no partial
/// result.
///
/// An empty result is not an error here; the caller decides what an empty
/// turn means.
pub async fn aggregate_turn<S, K>(stream: S, sink: &mut K) -> Result<TurnResult, ConferenceError>
where
    S: Stream<Item = Result<StreamEvent, ConferenceError>>,
    K: TurnSink + ?Sized,
{
    let mut stream = std::pin::pin!(stream);
    let mut result = TurnResult::default();

    while let Some(item) = stream.next().await {
        let event = match item {
            Ok(event) => event,
            Err(err) if !err.is_fatal() => {
                debug!(error = %err, "skipping recoverable stream error");
                continue;
            }
            Err(err) => return Err(err),
        };

        match event {
            StreamEvent::TextDelta { text } => {
                if text.is_empty() {
                    continue;
                }
                sink.fragment(&text);
                result.text.push_str(&text);
                result.fragments += 1;
            }
            StreamEvent::Finished { reason } => {
                result.finish_reason = Some(reason);
            }
            StreamEvent::Blocked { reason } => {
                warn!(reason = %reason, "model endpoint blocked the prompt");
                result.block_reason = Some(reason);
            }
            StreamEvent::Connected => {}
            StreamEvent::Done => break,
        }
    }

    debug!(
        fragments = result.fragments,
        chars = result.text.len(),
        finish_reason = ?result.finish_reason,
        "model turn aggregated"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn delta(text: &str) -> Result<StreamEvent, ConferenceError> {
        Ok(StreamEvent::TextDelta {
            text: text.to_string(),
        })
    }

    #[tokio::test]
    async fn test_hello_in_two_fragments() {
        let events = stream::iter(vec![
            Ok(StreamEvent::Connected),
            delta("Hel"),
            delta("lo"),
            Ok(StreamEvent::Done),
        ]);
        let mut sink: Vec<String> = Vec::new();
        let result = aggregate_turn(events, &mut sink).await.unwrap();

        assert_eq!(result.text, "Hello");
        assert_eq!(result.fragments, 2);
        assert_eq!(sink, vec!["Hel".to_string(), "lo".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_stream_yields_empty_turn() {
        let events = stream::iter(vec![Ok(StreamEvent::Connected), Ok(StreamEvent::Done)]);
        let mut sink: Vec<String> = Vec::new();
        let result = aggregate_turn(events, &mut sink).await.unwrap();
        assert!(result.is_empty());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_empty_deltas_are_not_sunk() {
        let events = stream::iter(vec![delta(""), delta("a"), delta(""), delta("b")]);
        let mut sink: Vec<String> = Vec::new();
        let result = aggregate_turn(events, &mut sink).await.unwrap();
        assert_eq!(result.text, "ab");
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_event_error_is_skipped() {
        let events = stream::iter(vec![
            delta("one "),
            Err(ConferenceError::MalformedEvent("not json".into())),
            delta("two"),
        ]);
        let mut sink: Vec<String> = Vec::new();
        let result = aggregate_turn(events, &mut sink).await.unwrap();
        assert_eq!(result.text, "one two");
    }

    #[tokio::test]
    async fn test_transport_error_aborts() {
        let events = stream::iter(vec![
            delta("partial "),
            Err(ConferenceError::Transport("connection reset".into())),
            delta("never"),
        ]);
        let mut sink: Vec<String> = Vec::new();
        let err = aggregate_turn(events, &mut sink).await.unwrap_err();
        assert!(matches!(err, ConferenceError::Transport(_)));
        // Already-rendered fragments stay rendered.
        assert_eq!(sink, vec!["partial ".to_string()]);
    }

    #[tokio::test]
    async fn test_finish_and_block_reasons_recorded() {
        let events = stream::iter(vec![
            Ok(StreamEvent::Blocked {
                reason: "SAFETY".into(),
            }),
            Ok(StreamEvent::Finished {
                reason: "SAFETY".into(),
            }),
            Ok(StreamEvent::Done),
        ]);
        let mut sink: Vec<String> = Vec::new();
        let result = aggregate_turn(events, &mut sink).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.block_reason.as_deref(), Some("SAFETY"));
        assert_eq!(result.finish_reason.as_deref(), Some("SAFETY"));
        assert!(result.is_abnormal());
    }

    #[tokio::test]
    async fn test_stops_pulling_after_done() {
        let events = stream::iter(vec![delta("a"), Ok(StreamEvent::Done), delta("b")]);
        let mut sink: Vec<String> = Vec::new();
        let result = aggregate_turn(events, &mut sink).await.unwrap();
        assert_eq!(result.text, "a");
    }
}
