//! The conference driver: a turn-taking state machine.
//!
//! ```text
//! SEED -> AWAIT_MODEL -> CHECK_TERMINATION -> TERMINATED
//!              ^                 |
//!              |                 v
//!              +------------ AWAIT_HUMAN -> CANCELLED
//! ```
//!
//! Exactly one model request is in flight at a time. Cancellation is only
//! checked in `AWAIT_HUMAN`, between turns; a streaming turn always runs to
//! the end of its response.

use tracing::{info, info_span, warn};

use pressroom_types::conference::{CancelReason, ConferenceOutcome, ConferenceState, TurnResult};
use pressroom_types::config::ConferenceConfig;
use pressroom_types::error::ConferenceError;
use pressroom_types::llm::TurnRequest;

use crate::llm::provider::ModelEndpoint;
use crate::llm::span::StreamInSpan;

use super::aggregator::aggregate_turn;
use super::input::{HumanInput, InputEvent, Reply, classify};
use super::session::Session;
use super::sink::TurnSink;

/// Markers the driver reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSettings {
    /// Substring in a model turn that ends the conference.
    pub sentinel: String,
    /// Reply that abandons the conference.
    pub quit_keyword: String,
}

impl From<&ConferenceConfig> for DriverSettings {
    fn from(config: &ConferenceConfig) -> Self {
        Self {
            sentinel: config.sentinel.clone(),
            quit_keyword: config.quit_keyword.clone(),
        }
    }
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self::from(&ConferenceConfig::default())
    }
}

/// Runs conferences against one model endpoint.
pub struct ConferenceDriver<E> {
    endpoint: E,
    settings: DriverSettings,
}

impl<E: ModelEndpoint> ConferenceDriver<E> {
    pub fn new(endpoint: E, settings: DriverSettings) -> Self {
        Self { endpoint, settings }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// Drive `session` until the sentinel appears, the human leaves, or a
    /// fatal error occurs.
    ///
    /// On error the session is left in `Terminated` with its transcript
    /// intact up to the last complete turn; a partially streamed model turn
    /// is never appended.
    pub async fn run<K, I>(
        &self,
        session: &mut Session,
        sink: &mut K,
        input: &mut I,
    ) -> Result<ConferenceOutcome, ConferenceError>
    where
        K: TurnSink + ?Sized,
        I: HumanInput,
    {
        if session.is_finished() {
            return Err(ConferenceError::InvalidRequest(format!(
                "session {} has already ended ({})",
                session.info().short_id(),
                session.state()
            )));
        }

        info!(
            session = %session.info().short_id(),
            provider = self.endpoint.name(),
            model = self.endpoint.model(),
            "conference started"
        );

        loop {
            match session.state() {
                ConferenceState::Seed | ConferenceState::AwaitModel => {
                    session.transition(ConferenceState::AwaitModel);
                    let result = match self.request_turn(session, sink).await {
                        Ok(result) => result,
                        Err(err) => {
                            warn!(error = %err, "model turn failed, ending conference");
                            session.transition(ConferenceState::Terminated);
                            return Err(err);
                        }
                    };
                    if let Err(err) = session.record_model_turn(result) {
                        session.transition(ConferenceState::Terminated);
                        return Err(err.into());
                    }
                    session.transition(ConferenceState::CheckTermination);
                }

                ConferenceState::CheckTermination => {
                    let concluded = session
                        .last_turn()
                        .is_some_and(|turn| turn.contains_sentinel(&self.settings.sentinel));
                    if concluded {
                        session.transition(ConferenceState::Terminated);
                        info!(
                            turns = session.transcript().len(),
                            "sentinel observed, conference concluded"
                        );
                        return Ok(ConferenceOutcome::Concluded);
                    }
                    session.transition(ConferenceState::AwaitHuman);
                }

                ConferenceState::AwaitHuman => {
                    let cancelled = match input.read_reply().await {
                        InputEvent::Eof => Some(CancelReason::EndOfInput),
                        InputEvent::Interrupted => Some(CancelReason::Interrupted),
                        InputEvent::Line(line) => match classify(&line, &self.settings.quit_keyword) {
                            Reply::Quit => Some(CancelReason::QuitKeyword),
                            Reply::Blank => continue,
                            Reply::Answer(text) => {
                                if let Err(err) = session.record_human_turn(text) {
                                    session.transition(ConferenceState::Terminated);
                                    return Err(err.into());
                                }
                                session.transition(ConferenceState::AwaitModel);
                                None
                            }
                        },
                    };
                    if let Some(reason) = cancelled {
                        session.transition(ConferenceState::Cancelled);
                        info!(reason = %reason, turns = session.transcript().len(), "conference cancelled");
                        return Ok(ConferenceOutcome::Cancelled(reason));
                    }
                }

                ConferenceState::Terminated | ConferenceState::Cancelled => {
                    unreachable!("terminal states return from the loop")
                }
            }
        }
    }

    /// Send the transcript so far and aggregate the streamed reply.
    async fn request_turn<K>(&self, session: &Session, sink: &mut K) -> Result<TurnResult, ConferenceError>
    where
        K: TurnSink + ?Sized,
    {
        let request = TurnRequest::from_transcript(self.endpoint.model(), session.transcript());

        let span = info_span!(
            "gen_ai.stream_turn",
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = self.endpoint.name(),
            gen_ai.request.model = %request.model,
            turn = session.transcript().model_turns() + 1,
        );

        sink.turn_started();
        let stream = span.in_scope(|| self.endpoint.stream_turn(request));
        let stream = StreamInSpan::new(stream, span);
        let result = aggregate_turn(stream, sink).await?;

        if result.is_abnormal() {
            warn!(
                finish_reason = ?result.finish_reason,
                block_reason = ?result.block_reason,
                empty = result.is_empty(),
                "model turn ended abnormally"
            );
        }
        sink.turn_finished(&result);
        Ok(result)
    }
}
