//! ModelEndpoint trait definition.
//!
//! This is the seam between the conversation driver and the remote model.
//! `stream_turn` returns `Pin<Box<dyn Stream>>` so the trait stays
//! object-safe and endpoints can be swapped at runtime or faked in tests.

use std::pin::Pin;

use futures_util::Stream;

use pressroom_types::error::ConferenceError;
use pressroom_types::llm::{StreamEvent, TurnRequest};

/// Boxed stream of events for one model turn.
pub type TurnStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, ConferenceError>> + Send + 'static>>;

/// Trait for streaming model backends.
///
/// Implementations live in pressroom-infra (e.g. `GeminiEndpoint`).
///
/// The returned stream owns the underlying HTTP response: dropping it at any
/// point closes the connection. A non-success HTTP status must surface as the
/// stream's first item (`ConferenceError::HttpStatus`), never as silence.
pub trait ModelEndpoint: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Send the transcript so far and stream the next model turn back.
    fn stream_turn(&self, request: TurnRequest) -> TurnStream;
}

impl<T: ModelEndpoint + ?Sized> ModelEndpoint for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn model(&self) -> &str {
        (**self).model()
    }

    fn stream_turn(&self, request: TurnRequest) -> TurnStream {
        (**self).stream_turn(request)
    }
}
