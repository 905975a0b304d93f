//! Conversation engine and port trait definitions for Pressroom.
//!
//! This crate defines the "ports" the infrastructure layer implements
//! (`ModelEndpoint`) and the ones the CLI implements (`TurnSink`,
//! `HumanInput`), plus the turn aggregator and the conference driver state
//! machine. It depends only on `pressroom-types` -- never on
//! `pressroom-infra` or any HTTP/IO crate.

pub mod conversation;
pub mod llm;
