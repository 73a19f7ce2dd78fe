//! Share combinator - memoize the first completed run.

use std::future::Future;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::Kind;
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// An effect whose first completed carrier is cached and replayed.
///
/// The cache lives behind an `Arc`, so every clone of a `Shared` sees the
/// same cell. No lock is held while the source runs: concurrent first runs
/// may each execute the source, and the first carrier stored wins. Runs that
/// end in cancellation are not cached.
///
/// Later runs ignore their input and replay the cached carrier.
///
/// Created by [`EffectExt::share`](crate::effect::EffectExt::share).
pub struct Shared<E: Effect> {
    inner: Arc<E>,
    cache: Arc<OnceCell<Carrier<E>>>,
}

impl<E: Effect> Shared<E> {
    pub(crate) fn new(inner: E) -> Self {
        Shared {
            inner: Arc::new(inner),
            cache: Arc::new(OnceCell::new()),
        }
    }

    /// Whether a carrier has been cached yet.
    pub fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }
}

impl<E: Effect> Clone for Shared<E> {
    fn clone(&self) -> Self {
        Shared {
            inner: Arc::clone(&self.inner),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<E: Effect> std::fmt::Debug for Shared<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared")
            .field("inner", &"<effect>")
            .field("cached", &self.is_cached())
            .finish()
    }
}

impl<E> Effect for Shared<E>
where
    E: Effect,
    Carrier<E>: Clone + Sync,
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
            if let Some(carrier) = self.cache.get() {
                crate::trace_event!(
                    trace,
                    kind = <E::Kind as Kind>::NAME,
                    "shared effect replayed from cache"
                );
                return Ok(carrier.clone());
            }
            let carrier = self.inner.run(input, cancel).await?;
            if !<E::Kind as Kind>::cacheable::<E::Output>(&carrier) {
                return Ok(carrier);
            }
            let stored = self.cache.get_or_init(|| carrier);
            crate::trace_event!(
                debug,
                kind = <E::Kind as Kind>::NAME,
                "shared effect cached its result"
            );
            Ok(stored.clone())
        })
    }
}
