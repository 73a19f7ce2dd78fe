//! Leaf effects built from user functions.

use std::future::Future;
use std::marker::PhantomData;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::Kind;
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// Effect from a synchronous function of the run input.
///
/// The function runs each time the effect is run, on the task polling the
/// run, and never at construction. Each kind's `create` wraps its own
/// closure shape into one of these.
pub struct FromFn<K, F, T> {
    pub(crate) f: F,
    pub(crate) _marker: PhantomData<fn() -> (K, T)>,
}

impl<K, F, T> FromFn<K, F, T> {
    /// Wrap a function producing the carrier.
    pub fn new(f: F) -> Self {
        FromFn {
            f,
            _marker: PhantomData,
        }
    }
}

impl<K, F: Clone, T> Clone for FromFn<K, F, T> {
    fn clone(&self) -> Self {
        FromFn::new(self.f.clone())
    }
}

impl<K, F, T> std::fmt::Debug for FromFn<K, F, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").field("f", &"<function>").finish()
    }
}

impl<K, F, T> Effect for FromFn<K, F, T>
where
    K: Kind,
    F: Fn(K::Input) -> K::Carrier<T> + Send + Sync,
    T: Send + 'static,
{
    type Kind = K;
    type Output = T;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            Ok((self.f)(input))
        })
    }
}

/// Effect from an asynchronous function of the run input.
pub struct FromAsync<K, F, T> {
    pub(crate) f: F,
    pub(crate) _marker: PhantomData<fn() -> (K, T)>,
}

impl<K, F, T> FromAsync<K, F, T> {
    /// Wrap a function returning a future of the carrier.
    pub fn new(f: F) -> Self {
        FromAsync {
            f,
            _marker: PhantomData,
        }
    }
}

impl<K, F: Clone, T> Clone for FromAsync<K, F, T> {
    fn clone(&self) -> Self {
        FromAsync::new(self.f.clone())
    }
}

impl<K, F, T> std::fmt::Debug for FromAsync<K, F, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromAsync")
            .field("f", &"<function>")
            .finish()
    }
}

impl<K, F, Fut, T> Effect for FromAsync<K, F, T>
where
    K: Kind,
    F: Fn(K::Input) -> Fut + Send + Sync,
    Fut: Future<Output = K::Carrier<T>> + Send,
    T: Send + 'static,
{
    type Kind = K;
    type Output = T;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = (self.f)(input).await;
            checkpoint(cancel)?;
            Ok(carrier)
        })
    }
}
