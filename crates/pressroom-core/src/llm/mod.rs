//! Model endpoint abstractions for Pressroom.
//!
//! - `ModelEndpoint`: trait for streaming model backends
//! - `StreamInSpan`: keeps a tracing span entered while a turn streams

pub mod provider;
pub mod span;
