//! Tracing support for effects.
//!
//! This module provides the `Instrument` combinator and `instrument` method
//! for wrapping effect runs in tracing spans. Feature-gated behind
//! `#[cfg(feature = "tracing")]`.
//!
//! Independently of spans, the library itself emits `debug` and `trace`
//! events when a run observes cancellation, when a Try step captures a panic
//! or a cancellation, and when a shared effect caches or replays its result.

use std::future::Future;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::trait_def::{Carrier, Effect, Input};

/// An effect whose runs execute inside a tracing span.
///
/// Created by [`EffectTracingExt::instrument`].
#[derive(Debug)]
pub struct Instrument<E> {
    pub(crate) inner: E,
    pub(crate) span: tracing::Span,
}

impl<E> Effect for Instrument<E>
where
    E: Effect,
{
    type Kind = E::Kind;
    type Output = E::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        use tracing::Instrument as _;
        self.inner.run(input, cancel).instrument(self.span.clone())
    }
}

/// Extension trait for adding tracing instrumentation to effects.
pub trait EffectTracingExt: Effect + Sized {
    /// Run this effect inside `span`.
    ///
    /// The span is entered each time the effect is polled, on every run.
    ///
    /// ```rust
    /// use eddy::effect::prelude::*;
    /// use tracing::info_span;
    ///
    /// # tokio_test::block_on(async {
    /// let lookup = reader::asks(|port: &u16| *port + 1)
    ///     .instrument(info_span!("next_port"));
    /// assert_eq!(lookup.run(8080, &CancellationToken::new()).await, Ok(8081));
    /// # });
    /// ```
    fn instrument(self, span: tracing::Span) -> Instrument<Self> {
        Instrument { inner: self, span }
    }
}

impl<E: Effect> EffectTracingExt for E {}
