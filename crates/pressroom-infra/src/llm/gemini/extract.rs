//! Text extraction from one Gemini SSE payload.
//!
//! Only the first candidate is consulted. Parts without text (or with empty
//! text) are skipped, so every fragment returned is non-empty.

use pressroom_types::error::ConferenceError;
use pressroom_types::llm::StreamEvent;

use super::types::GenerateContentChunk;

/// Everything one payload contributes to a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPayload {
    pub fragments: Vec<String>,
    pub finish_reason: Option<String>,
    pub block_reason: Option<String>,
}

impl ExtractedPayload {
    /// Provider-agnostic events, in order: text, then block, then finish.
    pub fn into_events(self) -> Vec<StreamEvent> {
        let mut events: Vec<StreamEvent> = self
            .fragments
            .into_iter()
            .map(|text| StreamEvent::TextDelta { text })
            .collect();
        if let Some(reason) = self.block_reason {
            events.push(StreamEvent::Blocked { reason });
        }
        if let Some(reason) = self.finish_reason {
            events.push(StreamEvent::Finished { reason });
        }
        events
    }
}

/// Parse one payload.
///
/// Fails with [`ConferenceError::MalformedEvent`] when the payload is not a
/// JSON object of the expected shape; callers skip such payloads.
pub fn extract_payload(payload: &str) -> Result<ExtractedPayload, ConferenceError> {
    let chunk: GenerateContentChunk = serde_json::from_str(payload)
        .map_err(|e| ConferenceError::MalformedEvent(format!("generateContent chunk: {e}")))?;

    let block_reason = chunk.prompt_feedback.and_then(|f| f.block_reason);

    let Some(candidate) = chunk.candidates.and_then(|c| c.into_iter().next()) else {
        return Ok(ExtractedPayload {
            block_reason,
            ..Default::default()
        });
    };

    let fragments = candidate
        .content
        .and_then(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .filter(|text| !text.is_empty())
        .collect();

    Ok(ExtractedPayload {
        fragments,
        finish_reason: candidate.finish_reason,
        block_reason,
    })
}

/// Text fragments of one payload; malformed payloads contribute nothing.
pub fn fragments(payload: &str) -> Vec<String> {
    extract_payload(payload)
        .map(|p| p.fragments)
        .unwrap_or_default()
}
