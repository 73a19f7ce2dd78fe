//! Leaf effects that produce a fixed value or a fixed short-circuit.

use std::future::Future;
use std::marker::PhantomData;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::Kind;
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// An effect that produces a value without touching the context.
///
/// The value is cloned on every run.
///
/// # Example
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = option::some(42);
/// assert_eq!(effect.run_standalone().await, Ok(Some(42)));
/// # });
/// ```
pub struct Pure<K, T> {
    pub(crate) value: T,
    pub(crate) _kind: PhantomData<fn() -> K>,
}

impl<K, T> Pure<K, T> {
    /// Wrap a value.
    pub fn new(value: T) -> Self {
        Pure {
            value,
            _kind: PhantomData,
        }
    }
}

impl<K, T: std::fmt::Debug> std::fmt::Debug for Pure<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pure").field("value", &self.value).finish()
    }
}

impl<K, T: Clone> Clone for Pure<K, T> {
    fn clone(&self) -> Self {
        Pure::new(self.value.clone())
    }
}

impl<K, T> Effect for Pure<K, T>
where
    K: Kind,
    T: Clone + Send + Sync + 'static,
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
            Ok(K::pure(self.value.clone(), &input))
        })
    }
}

/// An effect that always short-circuits with a fixed payload.
///
/// `option::none`, `either::left` and `fallible::throw` are built on it.
pub struct Fail<K: Kind, T> {
    pub(crate) halt: K::Halt,
    pub(crate) _output: PhantomData<fn() -> T>,
}

impl<K: Kind, T> Fail<K, T> {
    /// Short-circuit with `halt` on every run.
    pub fn new(halt: K::Halt) -> Self {
        Fail {
            halt,
            _output: PhantomData,
        }
    }
}

impl<K: Kind, T> std::fmt::Debug for Fail<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fail").field("kind", &K::NAME).finish()
    }
}

impl<K, T> Clone for Fail<K, T>
where
    K: Kind,
    K::Halt: Clone,
{
    fn clone(&self) -> Self {
        Fail::new(self.halt.clone())
    }
}

impl<K, T> Effect for Fail<K, T>
where
    K: Kind,
    K::Halt: Clone + Sync,
    T: Send + 'static,
{
    type Kind = K;
    type Output = T;

    fn run(
        &self,
        _input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            Ok(K::halt::<T>(self.halt.clone()))
        })
    }
}
