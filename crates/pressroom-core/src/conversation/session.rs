//! Session state for one conference.
//!
//! Wraps the `Transcript` with the driver state and the most recent model
//! turn. The driver owns the transitions; the session records them and
//! refuses appends that would break role alternation.

use tracing::debug;

use pressroom_types::conference::{ConferenceState, SessionInfo, TurnResult};
use pressroom_types::error::TranscriptError;
use pressroom_types::transcript::Transcript;

/// One conference: transcript, state and last model turn.
pub struct Session {
    info: SessionInfo,
    transcript: Transcript,
    state: ConferenceState,
    last_turn: Option<TurnResult>,
}

impl Session {
    /// Start a session seeded with the instruction context and opening turn.
    pub fn new(instruction: impl Into<String>, opening: impl Into<String>) -> Self {
        Self {
            info: SessionInfo::new(),
            transcript: Transcript::seeded(instruction, opening),
            state: ConferenceState::Seed,
            last_turn: None,
        }
    }

    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Consume the session, keeping only its transcript.
    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    pub fn state(&self) -> ConferenceState {
        self.state
    }

    /// Whether the session reached `Terminated` or `Cancelled`.
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// The most recent model turn, once one has arrived.
    pub fn last_turn(&self) -> Option<&TurnResult> {
        self.last_turn.as_ref()
    }

    /// Move to `next`.
    pub fn transition(&mut self, next: ConferenceState) {
        debug!(session = %self.info.short_id(), from = %self.state, to = %next, "state transition");
        self.state = next;
    }

    /// Append a finished model turn.
    pub fn record_model_turn(&mut self, result: TurnResult) -> Result<(), TranscriptError> {
        self.transcript.push_model(result.text.clone())?;
        self.last_turn = Some(result);
        Ok(())
    }

    /// Append a human reply.
    pub fn record_human_turn(&mut self, text: impl Into<String>) -> Result<(), TranscriptError> {
        self.transcript.push_human(text)
    }
}
