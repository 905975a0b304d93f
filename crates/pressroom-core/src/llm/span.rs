use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use pin_project_lite::pin_project;
use tracing::Span;

pin_project! {
    /// Stream wrapper that enters `span` on every poll, so events logged by
    /// the endpoint while a turn streams are attributed to that turn.
    pub struct StreamInSpan<S> {
        #[pin]
        inner: S,
        span: Span,
    }
}

impl<S> StreamInSpan<S> {
    pub fn new(inner: S, span: Span) -> Self {
        Self { inner, span }
    }
}

impl<S: Stream> Stream for StreamInSpan<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let _enter = this.span.enter();
        this.inner.poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
