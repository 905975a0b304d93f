//! Conference lifecycle types: driver states, outcomes, per-turn results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// States of the conversation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConferenceState {
    Seed,
    AwaitModel,
    CheckTermination,
    AwaitHuman,
    Terminated,
    Cancelled,
}

impl ConferenceState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ConferenceState::Terminated | ConferenceState::Cancelled)
    }
}

impl fmt::Display for ConferenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConferenceState::Seed => write!(f, "seed"),
            ConferenceState::AwaitModel => write!(f, "await_model"),
            ConferenceState::CheckTermination => write!(f, "check_termination"),
            ConferenceState::AwaitHuman => write!(f, "await_human"),
            ConferenceState::Terminated => write!(f, "terminated"),
            ConferenceState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Why the human abandoned the conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    QuitKeyword,
    EndOfInput,
    Interrupted,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::QuitKeyword => write!(f, "quit_keyword"),
            CancelReason::EndOfInput => write!(f, "end_of_input"),
            CancelReason::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// How a conference that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ConferenceOutcome {
    /// The model emitted the termination sentinel.
    Concluded,
    /// The human left early.
    Cancelled(CancelReason),
}

/// Everything one streamed model response produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Ordered concatenation of every fragment.
    pub text: String,
    /// How many fragments were forwarded to the sink.
    pub fragments: usize,
    /// Last finish reason the endpoint reported, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Block reason when the endpoint refused the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

impl TurnResult {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether this turn carries the termination sentinel.
    pub fn contains_sentinel(&self, sentinel: &str) -> bool {
        !sentinel.is_empty() && self.text.contains(sentinel)
    }

    /// Whether the endpoint signalled something other than a normal stop.
    ///
    /// An empty turn with a block reason or a non-`STOP` finish reason is the
    /// refusal case; callers surface it instead of treating it as silence.
    pub fn is_abnormal(&self) -> bool {
        self.block_reason.is_some()
            || self
                .finish_reason
                .as_deref()
                .is_some_and(|r| !r.eq_ignore_ascii_case("STOP"))
    }
}

/// Identity and start time of one session, for logs and the banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl SessionInfo {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
        }
    }

    /// First eight characters of the id.
    pub fn short_id(&self) -> String {
        self.id.to_string().chars().take(8).collect()
    }
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self::new()
    }
}
