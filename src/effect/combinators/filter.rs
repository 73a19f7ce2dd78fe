//! Filter combinator - reject present values that fail a predicate.

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::OptionKind;
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// Turns a present value into `None` when the predicate rejects it.
///
/// Created by [`OptionEffectExt::filter`](crate::effect::option::OptionEffectExt::filter).
pub struct Filter<E, P> {
    pub(crate) inner: E,
    pub(crate) predicate: P,
}

impl<E, P> std::fmt::Debug for Filter<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("inner", &"<effect>")
            .field("predicate", &"<function>")
            .finish()
    }
}

impl<E, P> Effect for Filter<E, P>
where
    E: Effect<Kind = OptionKind>,
    P: Fn(&E::Output) -> bool + Send + Sync,
{
    type Kind = OptionKind;
    type Output = E::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = self.inner.run(input, cancel).await?;
            checkpoint(cancel)?;
            Ok(carrier.filter(|value| (self.predicate)(value)))
        })
    }
}
