//! Merge combinator for Option effects.

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::OptionKind;
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// Runs sources in order and collects their values.
///
/// Produces `None` as soon as one source is absent; the sources after it
/// do not run. With every source present the values come back in source
/// order. An empty merge produces `Some(vec![])`.
///
/// Created by [`option::merge`](crate::effect::option::merge).
pub struct Merge<E> {
    pub(crate) sources: Vec<E>,
}

impl<E> std::fmt::Debug for Merge<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Merge")
            .field("sources", &self.sources.len())
            .finish()
    }
}

impl<E> Effect for Merge<E>
where
    E: Effect<Kind = OptionKind>,
{
    type Kind = OptionKind;
    type Output = Vec<E::Output>;

    fn run(
        &self,
        _input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            let mut values = Vec::with_capacity(self.sources.len());
            for source in &self.sources {
                checkpoint(cancel)?;
                match source.run((), cancel).await? {
                    Some(value) => values.push(value),
                    None => return Ok(None),
                }
            }
            checkpoint(cancel)?;
            Ok(Some(values))
        })
    }
}
