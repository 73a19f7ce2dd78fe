//! Zip combinator for Option effects.

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::OptionKind;
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// Runs both sources, then combines their values when both are present.
///
/// Unlike bind, the second source runs even when the first produced
/// `None`, so side effects of both always happen.
///
/// Created by [`OptionEffectExt::zip`](crate::effect::option::OptionEffectExt::zip).
pub struct ZipWith<E1, E2, F> {
    pub(crate) first: E1,
    pub(crate) second: E2,
    pub(crate) f: F,
}

impl<E1, E2, F> std::fmt::Debug for ZipWith<E1, E2, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipWith")
            .field("first", &"<effect>")
            .field("second", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<E1, E2, F, U> Effect for ZipWith<E1, E2, F>
where
    E1: Effect<Kind = OptionKind>,
    E2: Effect<Kind = OptionKind>,
    F: Fn(E1::Output, E2::Output) -> U + Send + Sync,
    U: Send + 'static,
{
    type Kind = OptionKind;
    type Output = U;

    fn run(
        &self,
        _input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let left = self.first.run((), cancel).await?;
            checkpoint(cancel)?;
            let right = self.second.run((), cancel).await?;
            checkpoint(cancel)?;
            Ok(left.zip(right).map(|(a, b)| (self.f)(a, b)))
        })
    }
}
