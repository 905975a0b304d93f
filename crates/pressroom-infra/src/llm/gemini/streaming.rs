//! Gemini SSE stream adapter.
//!
//! With `alt=sse`, `streamGenerateContent` answers with a server-sent event
//! body where every `data:` line holds one `GenerateContentResponse` JSON
//! object:
//!
//! ```text
//! data: {"candidates":[{"content":{"parts":[{"text":"Hel"}],"role":"model"}}]}
//!
//! data: {"candidates":[{"content":{"parts":[{"text":"lo"}]},"finishReason":"STOP"}]}
//! ```

use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};

use pressroom_core::llm::provider::TurnStream;
use pressroom_types::error::ConferenceError;
use pressroom_types::llm::StreamEvent;

use super::super::sse::EventStreamDecoder;
use super::extract::extract_payload;
use super::types::GeminiRequest;

/// Open a streaming connection to `url` and decode it into [`StreamEvent`]s.
///
/// Nothing is sent until the returned stream is first polled. A non-success
/// status becomes the stream's only item (`HttpStatus` with the response
/// body); transport failures end the stream with `Transport`. Payloads that
/// fail to parse are logged and skipped. The stream ends with
/// [`StreamEvent::Done`] once the body is exhausted.
///
/// The key travels as a query parameter, so every reqwest error is stripped
/// of its URL before it is formatted.
pub fn create_gemini_stream(
    client: &reqwest::Client,
    url: &str,
    body: GeminiRequest,
    api_key: &SecretString,
) -> TurnStream {
    let client = client.clone();
    let url = url.to_string();
    let api_key = SecretString::from(api_key.expose_secret().to_owned());

    Box::pin(async_stream::try_stream! {
        let response = client
            .post(&url)
            .query(&[("alt", "sse"), ("key", api_key.expose_secret())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ConferenceError::Transport(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = match response.text().await {
                Ok(text) => text,
                Err(err) => format!("<error body unreadable: {}>", err.without_url()),
            };
            tracing::warn!(status = %status, body = %error_body, "Gemini stream API error response");
            let never: std::convert::Infallible = Err(ConferenceError::HttpStatus {
                status: status.as_u16(),
                body: error_body,
            })?;
            match never {}
        }

        yield StreamEvent::Connected;

        let body_stream = response.bytes_stream().map(|chunk| chunk.map_err(|e| e.without_url()));
        let mut payloads = std::pin::pin!(EventStreamDecoder::new(body_stream));

        while let Some(payload) = payloads.next().await {
            let payload = payload?;
            match extract_payload(&payload) {
                Ok(extracted) => {
                    for event in extracted.into_events() {
                        yield event;
                    }
                }
                Err(err) => {
                    tracing::debug!(error = %err, "skipping malformed Gemini payload");
                }
            }
        }

        yield StreamEvent::Done;
    })
}
