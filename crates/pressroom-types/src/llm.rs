//! Model request and streaming event types.
//!
//! These are provider-agnostic: the Gemini adapter in `pressroom-infra`
//! translates a [`TurnRequest`] into its own wire body and maps the wire
//! events back into [`StreamEvent`]s.

use serde::{Deserialize, Serialize};

use crate::transcript::{Transcript, Turn};

/// One request for the next model turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    pub model: String,
    pub system_instruction: String,
    pub turns: Vec<Turn>,
}

impl TurnRequest {
    /// Snapshot the transcript so far into a request.
    pub fn from_transcript(model: impl Into<String>, transcript: &Transcript) -> Self {
        Self {
            model: model.into(),
            system_instruction: transcript.instruction().to_string(),
            turns: transcript.turns().to_vec(),
        }
    }
}

/// Events emitted while a model turn streams in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Response headers received with a success status.
    Connected,

    /// One text fragment, in arrival order.
    TextDelta { text: String },

    /// The endpoint reported why generation stopped (e.g. "STOP", "SAFETY").
    Finished { reason: String },

    /// The endpoint refused the prompt and produced no candidates.
    Blocked { reason: String },

    /// The response body has ended.
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Role;

    #[test]
    fn test_turn_request_from_transcript() {
        let mut t = Transcript::seeded("ctx", "Begin.");
        t.push_model("Question one?").unwrap();
        t.push_human("Answer.").unwrap();

        let req = TurnRequest::from_transcript("gemini-2.0-flash", &t);
        assert_eq!(req.model, "gemini-2.0-flash");
        assert_eq!(req.system_instruction, "ctx");
        assert_eq!(req.turns.len(), 3);
        assert_eq!(req.turns[1].role, Role::Model);
    }

    #[test]
    fn test_stream_event_serde_tagged() {
        let ev = StreamEvent::TextDelta { text: "Hel".into() };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"type":"text_delta","text":"Hel"}"#);
        let parsed: StreamEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ev);
    }
}
