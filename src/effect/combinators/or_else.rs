//! Recovery combinators - continue after a short-circuit.

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::{Kind, Step};
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// Runs an alternate effect, with the same input, when the source
/// short-circuits. A successful carrier passes through.
///
/// Created by [`EffectExt::catch`](crate::effect::EffectExt::catch).
pub struct Catch<E, A> {
    pub(crate) inner: E,
    pub(crate) alternate: A,
}

impl<E, A> std::fmt::Debug for Catch<E, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catch")
            .field("inner", &"<effect>")
            .field("alternate", &"<effect>")
            .finish()
    }
}

impl<E, A> Effect for Catch<E, A>
where
    E: Effect,
    A: Effect<Kind = E::Kind, Output = E::Output>,
{
    type Kind = E::Kind;
    type Output = E::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = self.inner.run(input.clone(), cancel).await?;
            checkpoint(cancel)?;
            if <E::Kind as Kind>::halted::<E::Output>(&carrier).is_some() {
                self.alternate.run(input, cancel).await
            } else {
                Ok(carrier)
            }
        })
    }
}

/// Hands the short-circuit payload to a handler that picks the effect to
/// run instead.
///
/// Created by [`EffectExt::or_else`](crate::effect::EffectExt::or_else).
pub struct OrElse<E, F> {
    pub(crate) inner: E,
    pub(crate) f: F,
}

impl<E, F> std::fmt::Debug for OrElse<E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrElse")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<E, F, E2> Effect for OrElse<E, F>
where
    E: Effect,
    F: Fn(<E::Kind as Kind>::Halt) -> E2 + Send + Sync,
    E2: Effect<Kind = E::Kind, Output = E::Output>,
{
    type Kind = E::Kind;
    type Output = E::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = self.inner.run(input.clone(), cancel).await?;
            checkpoint(cancel)?;
            match <E::Kind as Kind>::decompose::<E::Output>(carrier) {
                Step::Continue(value, trace) => Ok(<E::Kind as Kind>::recompose(value, trace)),
                Step::Halt(halt) => (self.f)(halt).run(input, cancel).await,
            }
        })
    }
}
