//! The streaming conversation engine.
//!
//! - `sink`: where streamed fragments go (terminal, test recorder)
//! - `input`: where human replies come from, and how they are classified
//! - `aggregator`: folds one model turn's event stream into a `TurnResult`
//! - `session`: transcript plus state for one conference
//! - `driver`: the turn-taking state machine

pub mod aggregator;
pub mod driver;
pub mod input;
pub mod session;
pub mod sink;
