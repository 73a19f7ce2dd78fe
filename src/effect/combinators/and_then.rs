//! Bind combinators - chain a dependent effect.

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::{Kind, Step};
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// Runs `f(value)` after the inner effect succeeds.
///
/// The continuation receives the input derived from the first step's
/// context: the same environment, the state the first step produced. Its
/// output is appended after the first step's output. A short-circuit skips
/// the continuation.
///
/// Created by [`EffectExt::and_then`](crate::effect::EffectExt::and_then).
pub struct AndThen<E, F> {
    pub(crate) inner: E,
    pub(crate) f: F,
}

impl<E, F> std::fmt::Debug for AndThen<E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndThen")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<E, F, E2> Effect for AndThen<E, F>
where
    E: Effect,
    F: Fn(E::Output) -> E2 + Send + Sync,
    E2: Effect<Kind = E::Kind>,
{
    type Kind = E::Kind;
    type Output = E2::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let first = self.inner.run(input.clone(), cancel).await?;
            checkpoint(cancel)?;
            match <E::Kind as Kind>::decompose::<E::Output>(first) {
                Step::Continue(value, trace) => {
                    let next = (self.f)(value);
                    let second = next
                        .run(<E::Kind as Kind>::advance(&input, &trace), cancel)
                        .await?;
                    checkpoint(cancel)?;
                    Ok(<E::Kind as Kind>::follow::<E2::Output>(trace, second))
                }
                Step::Halt(halt) => Ok(<E::Kind as Kind>::halt::<E2::Output>(halt)),
            }
        })
    }
}

/// Two-source bind: selects a second effect from the first value, then
/// projects both values into the result.
///
/// Created by [`EffectExt::and_then_with`](crate::effect::EffectExt::and_then_with).
pub struct AndThenWith<E, F, P> {
    pub(crate) inner: E,
    pub(crate) select: F,
    pub(crate) project: P,
}

impl<E, F, P> std::fmt::Debug for AndThenWith<E, F, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndThenWith")
            .field("inner", &"<effect>")
            .field("select", &"<function>")
            .field("project", &"<function>")
            .finish()
    }
}

impl<E, F, P, E2, V> Effect for AndThenWith<E, F, P>
where
    E: Effect,
    F: Fn(&E::Output) -> E2 + Send + Sync,
    E2: Effect<Kind = E::Kind>,
    P: Fn(E::Output, E2::Output) -> V + Send + Sync,
    V: Send + 'static,
{
    type Kind = E::Kind;
    type Output = V;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let first = self.inner.run(input.clone(), cancel).await?;
            checkpoint(cancel)?;
            let (value, trace) = match <E::Kind as Kind>::decompose::<E::Output>(first) {
                Step::Continue(value, trace) => (value, trace),
                Step::Halt(halt) => return Ok(<E::Kind as Kind>::halt::<V>(halt)),
            };
            let next = (self.select)(&value);
            let second = next
                .run(<E::Kind as Kind>::advance(&input, &trace), cancel)
                .await?;
            checkpoint(cancel)?;
            match <E::Kind as Kind>::decompose::<E2::Output>(second) {
                Step::Continue(other, second_trace) => Ok(<E::Kind as Kind>::recompose(
                    (self.project)(value, other),
                    <E::Kind as Kind>::merge(trace, second_trace),
                )),
                Step::Halt(halt) => Ok(<E::Kind as Kind>::halt::<V>(halt)),
            }
        })
    }
}
