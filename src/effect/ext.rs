//! Extension trait providing combinator methods for all effects.
//!
//! `EffectExt` is implemented for every [`Effect`], whatever its kind. The
//! same `map`, `and_then` or `share` works for an Option effect and for an
//! RWS effect; the kind decides how contexts are threaded.

use std::future::Future;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::boxed::BoxedEffect;
use crate::effect::combinators::{
    AndThen, AndThenWith, Catch, Censor, IfThen, IfThenAsync, Listen, Map, MapAsync, OrElse,
    Shared, Tap, TapHalt, TapOutput, TapState, TapValue,
};
use crate::effect::kind::{Accumulates, Kind, Stateful};
use crate::effect::trait_def::{Carrier, Effect, Input};

/// Combinator methods available on every effect.
///
/// # Example
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = fallible::success(21)
///     .map(|x| x * 2)
///     .and_then(|x| fallible::success(x + 1));
///
/// assert_eq!(effect.run_standalone().await, Ok(Ok(43)));
/// # });
/// ```
#[allow(async_fn_in_trait)]
pub trait EffectExt: Effect + Sized {
    /// Transform the success value.
    ///
    /// A short-circuited carrier passes through and `f` is not called.
    ///
    /// ```rust
    /// use eddy::effect::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let effect = either::left::<&str, i32>("no config").map(|x| x + 1);
    /// assert_eq!(effect.run_standalone().await, Ok(Either::left("no config")));
    /// # });
    /// ```
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U + Send + Sync,
        U: Send + 'static,
    {
        Map { inner: self, f }
    }

    /// Transform the success value asynchronously.
    fn map_async<F, Fut>(self, f: F) -> MapAsync<Self, F>
    where
        F: Fn(Self::Output) -> Fut + Send + Sync,
        Fut: Future + Send,
        Fut::Output: Send + 'static,
    {
        MapAsync { inner: self, f }
    }

    /// Chain a dependent effect of the same kind.
    ///
    /// ```rust
    /// use eddy::effect::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let counter = state::get::<i32>()
    ///     .and_then(|n| state::put(n + 1))
    ///     .and_then(|_| state::get());
    ///
    /// let result = counter.run(10, &CancellationToken::new()).await.unwrap();
    /// assert_eq!((result.state, result.value), (11, 11));
    /// # });
    /// ```
    fn and_then<E2, F>(self, f: F) -> AndThen<Self, F>
    where
        E2: Effect<Kind = Self::Kind>,
        F: Fn(Self::Output) -> E2 + Send + Sync,
    {
        AndThen { inner: self, f }
    }

    /// Chain a second effect chosen from the first value, then combine both
    /// values with `project`.
    ///
    /// ```rust
    /// use eddy::effect::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let effect = option::some(6)
    ///     .and_then_with(|n| option::some(n * 7), |n, product| format!("{n} -> {product}"));
    /// assert_eq!(effect.run_standalone().await, Ok(Some("6 -> 42".to_string())));
    /// # });
    /// ```
    fn and_then_with<E2, F, P, V>(self, select: F, project: P) -> AndThenWith<Self, F, P>
    where
        E2: Effect<Kind = Self::Kind>,
        F: Fn(&Self::Output) -> E2 + Send + Sync,
        P: Fn(Self::Output, E2::Output) -> V + Send + Sync,
        V: Send + 'static,
    {
        AndThenWith {
            inner: self,
            select,
            project,
        }
    }

    /// Observe the full carrier without changing it.
    fn tap<F>(self, f: F) -> Tap<Self, F>
    where
        F: Fn(&Carrier<Self>) + Send + Sync,
    {
        Tap { inner: self, f }
    }

    /// Observe the success value, if there is one.
    fn tap_value<F>(self, f: F) -> TapValue<Self, F>
    where
        F: Fn(&Self::Output) + Send + Sync,
    {
        TapValue { inner: self, f }
    }

    /// Observe the short-circuit payload, if the run short-circuited.
    fn tap_halt<F>(self, f: F) -> TapHalt<Self, F>
    where
        F: Fn(&<Self::Kind as Kind>::Halt) + Send + Sync,
    {
        TapHalt { inner: self, f }
    }

    /// Observe the accumulated output of a Writer or RWS effect.
    fn tap_output<F>(self, f: F) -> TapOutput<Self, F>
    where
        Self::Kind: Accumulates,
        F: Fn(&<Self::Kind as Accumulates>::Log) + Send + Sync,
    {
        TapOutput { inner: self, f }
    }

    /// Observe the state reported by a State or RWS effect.
    fn tap_state<F>(self, f: F) -> TapState<Self, F>
    where
        Self::Kind: Stateful,
        F: Fn(&<Self::Kind as Stateful>::State) + Send + Sync,
    {
        TapState { inner: self, f }
    }

    /// Run `alternate` instead when `predicate` holds for this effect's
    /// carrier.
    ///
    /// ```rust
    /// use eddy::effect::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let effect = option::some(0).if_then(|c| c == &Some(0), option::some(1));
    /// assert_eq!(effect.run_standalone().await, Ok(Some(1)));
    /// # });
    /// ```
    fn if_then<P, A>(self, predicate: P, alternate: A) -> IfThen<Self, P, A>
    where
        P: Fn(&Carrier<Self>) -> bool + Send + Sync,
        A: Effect<Kind = Self::Kind, Output = Self::Output>,
    {
        IfThen {
            inner: self,
            predicate,
            alternate,
        }
    }

    /// [`if_then`](EffectExt::if_then) with an asynchronous predicate.
    fn if_then_async<P, Fut, A>(self, predicate: P, alternate: A) -> IfThenAsync<Self, P, A>
    where
        P: Fn(&Carrier<Self>) -> Fut + Send + Sync,
        Fut: Future<Output = bool> + Send,
        A: Effect<Kind = Self::Kind, Output = Self::Output>,
    {
        IfThenAsync {
            inner: self,
            predicate,
            alternate,
        }
    }

    /// Run `alternate` with the same input when this effect short-circuits.
    fn catch<A>(self, alternate: A) -> Catch<Self, A>
    where
        A: Effect<Kind = Self::Kind, Output = Self::Output>,
    {
        Catch {
            inner: self,
            alternate,
        }
    }

    /// Pick a replacement effect from the short-circuit payload.
    fn or_else<E2, F>(self, f: F) -> OrElse<Self, F>
    where
        E2: Effect<Kind = Self::Kind, Output = Self::Output>,
        F: Fn(<Self::Kind as Kind>::Halt) -> E2 + Send + Sync,
    {
        OrElse { inner: self, f }
    }

    /// Pair the value with the output accumulated by this run.
    fn listen(self) -> Listen<Self>
    where
        Self::Kind: Accumulates,
        <Self::Kind as Accumulates>::Log: Clone,
    {
        Listen { inner: self }
    }

    /// Rewrite the accumulated output.
    fn censor<F>(self, f: F) -> Censor<Self, F>
    where
        Self::Kind: Accumulates,
        F: Fn(<Self::Kind as Accumulates>::Log) -> <Self::Kind as Accumulates>::Log
            + Send
            + Sync,
    {
        Censor { inner: self, f }
    }

    /// Memoize the first completed run.
    ///
    /// The cache is shared by every clone of the returned effect.
    ///
    /// ```rust
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    /// use eddy::effect::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let runs = Arc::new(AtomicUsize::new(0));
    /// let counted = runs.clone();
    /// let shared = io::create(move || counted.fetch_add(1, Ordering::SeqCst)).share();
    ///
    /// assert_eq!(shared.run_standalone().await, Ok(0));
    /// assert_eq!(shared.clone().run_standalone().await, Ok(0));
    /// assert_eq!(runs.load(Ordering::SeqCst), 1);
    /// # });
    /// ```
    fn share(self) -> Shared<Self>
    where
        Carrier<Self>: Clone + Sync,
    {
        Shared::new(self)
    }

    /// Erase the concrete type.
    ///
    /// The boxed effect is cheap to clone.
    fn boxed(self) -> BoxedEffect<Self::Kind, Self::Output>
    where
        Self: 'static,
    {
        BoxedEffect::new(self)
    }

    /// Run with a token that is never cancelled.
    async fn execute(&self, input: Input<Self>) -> RunResult<Carrier<Self>> {
        self.run(input, &CancellationToken::new()).await
    }
}

impl<E: Effect> EffectExt for E {}
