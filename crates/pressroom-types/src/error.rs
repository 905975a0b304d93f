use thiserror::Error;

use crate::transcript::Role;

/// Errors from appending to a [`Transcript`](crate::transcript::Transcript).
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("out of turn: expected a {expected} turn, got a {got} turn")]
    OutOfTurn { expected: Role, got: Role },

    #[error("instruction context can only be set when the transcript is created")]
    MisplacedInstruction,
}

/// Errors that can end (or, for malformed events, interrupt) a conference.
///
/// Only `MalformedEvent` is recoverable; it is logged and skipped where it
/// occurs and never propagates out of the stream pipeline.
#[derive(Debug, Error)]
pub enum ConferenceError {
    #[error("{var} is not set")]
    MissingCredential { var: String },

    #[error("API error {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed event: {0}")]
    MalformedEvent(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}

impl ConferenceError {
    /// Whether this error ends the session.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConferenceError::MalformedEvent(_))
    }
}
