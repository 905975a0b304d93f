//! Shared domain types for Pressroom.
//!
//! This crate contains the types every other Pressroom crate speaks:
//! the conversation transcript, model turn requests and stream events,
//! conference state/outcomes, configuration, and the error taxonomy.
//!
//! No infrastructure dependencies: the runtime deps are serde, uuid, chrono
//! and thiserror.

pub mod conference;
pub mod config;
pub mod error;
pub mod llm;
pub mod transcript;
