//! BoxedEffect - type-erased effect for opt-in boxing.
//!
//! Use `BoxedEffect` when you need to:
//! - Store different effect types in a collection (for example `option::merge`)
//! - Return different effects from match arms
//! - Create recursive effect functions
//!
//! The erased effect sits behind an `Arc`, so cloning a `BoxedEffect` is
//! cheap and every clone runs the same effect.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::kind::Kind;
use crate::effect::trait_def::Effect;

trait ErasedEffect<K: Kind, T: Send + 'static>: Send + Sync {
    fn run_boxed<'a>(
        &'a self,
        input: K::Input,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, RunResult<K::Carrier<T>>>;
}

impl<E: Effect> ErasedEffect<E::Kind, E::Output> for E {
    fn run_boxed<'a>(
        &'a self,
        input: <E::Kind as Kind>::Input,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, RunResult<<E::Kind as Kind>::Carrier<E::Output>>> {
        Box::pin(self.run(input, cancel))
    }
}

/// A type-erased effect of kind `K` producing `T`.
///
/// # Example
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// fn countdown(n: u32) -> BoxedEffect<OptionKind, u32> {
///     if n == 0 {
///         option::some(0).boxed()
///     } else {
///         option::some(n)
///             .and_then(move |x| countdown(x - 1).map(move |sum| x + sum))
///             .boxed()
///     }
/// }
///
/// # tokio_test::block_on(async {
/// assert_eq!(countdown(4).run_standalone().await, Ok(Some(10)));
/// # });
/// ```
pub struct BoxedEffect<K: Kind, T: Send + 'static> {
    inner: Arc<dyn ErasedEffect<K, T>>,
}

impl<K: Kind, T: Send + 'static> BoxedEffect<K, T> {
    /// Erase the type of `effect`.
    pub fn new<E>(effect: E) -> Self
    where
        E: Effect<Kind = K, Output = T> + 'static,
    {
        BoxedEffect {
            inner: Arc::new(effect),
        }
    }
}

impl<K: Kind, T: Send + 'static> Clone for BoxedEffect<K, T> {
    fn clone(&self) -> Self {
        BoxedEffect {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Kind, T: Send + 'static> std::fmt::Debug for BoxedEffect<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedEffect")
            .field("kind", &K::NAME)
            .field("inner", &"<effect>")
            .finish()
    }
}

impl<K: Kind, T: Send + 'static> Effect for BoxedEffect<K, T> {
    type Kind = K;
    type Output = T;

    fn run(
        &self,
        input: K::Input,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<K::Carrier<T>>> + Send {
        async move { self.inner.run_boxed(input, cancel).await }
    }
}
