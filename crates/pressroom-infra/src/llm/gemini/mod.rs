//! Gemini `streamGenerateContent` endpoint.
//!
//! [`GeminiEndpoint`] implements
//! [`ModelEndpoint`](pressroom_core::llm::provider::ModelEndpoint) over the
//! SSE variant of the API (`alt=sse`).

pub mod client;
pub mod extract;
pub mod streaming;
pub mod types;

pub use client::GeminiEndpoint;
