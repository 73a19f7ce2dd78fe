//! Map combinators - transform the success value of an effect.

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::{Kind, Step};
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// Transforms the success value; a short-circuit passes through and `f`
/// is never called.
///
/// Created by [`EffectExt::map`](crate::effect::EffectExt::map).
pub struct Map<E, F> {
    pub(crate) inner: E,
    pub(crate) f: F,
}

impl<E, F> std::fmt::Debug for Map<E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<E, F, U> Effect for Map<E, F>
where
    E: Effect,
    F: Fn(E::Output) -> U + Send + Sync,
    U: Send + 'static,
{
    type Kind = E::Kind;
    type Output = U;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = self.inner.run(input, cancel).await?;
            checkpoint(cancel)?;
            Ok(<E::Kind as Kind>::map_carrier::<E::Output, U, _>(
                carrier, &self.f,
            ))
        })
    }
}

/// Transforms the success value with an asynchronous function.
///
/// Created by [`EffectExt::map_async`](crate::effect::EffectExt::map_async).
pub struct MapAsync<E, F> {
    pub(crate) inner: E,
    pub(crate) f: F,
}

impl<E, F> std::fmt::Debug for MapAsync<E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapAsync")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<E, F, Fut> Effect for MapAsync<E, F>
where
    E: Effect,
    F: Fn(E::Output) -> Fut + Send + Sync,
    Fut: Future + Send,
    Fut::Output: Send + 'static,
{
    type Kind = E::Kind;
    type Output = Fut::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = self.inner.run(input, cancel).await?;
            checkpoint(cancel)?;
            match <E::Kind as Kind>::decompose::<E::Output>(carrier) {
                Step::Continue(value, trace) => {
                    let mapped = (self.f)(value).await;
                    checkpoint(cancel)?;
                    Ok(<E::Kind as Kind>::recompose(mapped, trace))
                }
                Step::Halt(halt) => Ok(<E::Kind as Kind>::halt::<Fut::Output>(halt)),
            }
        })
    }
}
