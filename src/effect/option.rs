//! Option effects: values that may be absent.
//!
//! `None` short-circuits a chain: later `map` and `and_then` steps are
//! skipped and the absence propagates to the end.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use eddy::effect::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let ports = HashMap::from([("http", 80), ("https", 443)]);
//! let lookup = move |name: &'static str| {
//!     let ports = ports.clone();
//!     option::create(move || ports.get(name).copied())
//! };
//!
//! let https = lookup("https").filter(|port| *port > 100);
//! assert_eq!(https.run_standalone().await, Ok(Some(443)));
//!
//! let gopher = lookup("gopher").map(|port| port + 1);
//! assert_eq!(gopher.run_standalone().await, Ok(None));
//! # });
//! ```

use std::future::Future;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::combinators::{Fail, Filter, FromAsync, FromFn, Merge, Pure, TapNone, ZipWith};
use crate::effect::convert::{Convert, OptionToEither, OptionToTry};
use crate::effect::kind::{EitherKind, OptionKind, TryKind};
use crate::effect::trait_def::Effect;
use crate::exception::Exception;

/// An Option effect producing `Some(value)`.
pub fn some<T>(value: T) -> Pure<OptionKind, T> {
    Pure::new(value)
}

/// An Option effect producing `None`.
pub fn none<T>() -> Fail<OptionKind, T> {
    Fail::new(())
}

/// An Option effect producing a copy of `value` on every run.
pub fn from_option<T>(value: Option<T>) -> impl Effect<Kind = OptionKind, Output = T>
where
    T: Clone + Send + Sync + 'static,
{
    FromFn::new(move |()| value.clone())
}

/// An Option effect computed by `f` each time it runs.
pub fn create<T, F>(f: F) -> impl Effect<Kind = OptionKind, Output = T>
where
    F: Fn() -> Option<T> + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(move |()| f())
}

/// An Option effect computed by an asynchronous function.
pub fn create_async<T, F, Fut>(f: F) -> impl Effect<Kind = OptionKind, Output = T>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Option<T>> + Send,
    T: Send + 'static,
{
    FromAsync::new(move |()| f())
}

/// Run `sources` in order and collect their values.
///
/// The result is `None` as soon as one source is absent, and the sources
/// after it do not run. To mix different effect types, box them first.
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let all = option::merge(vec![option::some(1).boxed(), option::some(2).boxed()]);
/// assert_eq!(all.run_standalone().await, Ok(Some(vec![1, 2])));
///
/// let gap = option::merge(vec![option::some(1).boxed(), option::none().boxed()]);
/// assert_eq!(gap.run_standalone().await, Ok(None));
/// # });
/// ```
pub fn merge<I, E>(sources: I) -> Merge<E>
where
    I: IntoIterator<Item = E>,
    E: Effect<Kind = OptionKind>,
{
    Merge {
        sources: sources.into_iter().collect(),
    }
}

/// Methods specific to Option effects.
#[allow(async_fn_in_trait)]
pub trait OptionEffectExt: Effect<Kind = OptionKind> + Sized {
    /// Keep a present value only if `predicate` accepts it.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Output) -> bool + Send + Sync,
    {
        Filter {
            inner: self,
            predicate,
        }
    }

    /// Run this effect and `other`, then combine both values with `f`.
    ///
    /// Both effects always run; the result is `None` if either was absent.
    fn zip<E2, F, U>(self, other: E2, f: F) -> ZipWith<Self, E2, F>
    where
        E2: Effect<Kind = OptionKind>,
        F: Fn(Self::Output, E2::Output) -> U + Send + Sync,
        U: Send + 'static,
    {
        ZipWith {
            first: self,
            second: other,
            f,
        }
    }

    /// Call `f` when the value is absent.
    fn tap_none<F>(self, f: F) -> TapNone<Self, F>
    where
        F: Fn() + Send + Sync,
    {
        TapNone { inner: self, f }
    }

    /// Convert to Either, using `left` for an absent value.
    fn to_either<L>(self, left: L) -> Convert<Self, OptionToEither<L>, EitherKind<L>>
    where
        L: Clone + Send + Sync + 'static,
    {
        Convert::new(self, OptionToEither { left })
    }

    /// Convert to Try, failing with `exception` for an absent value.
    fn to_try(self, exception: impl Into<Exception>) -> Convert<Self, OptionToTry, TryKind> {
        Convert::new(
            self,
            OptionToTry {
                exception: exception.into(),
            },
        )
    }

    /// Run and dispatch on the outcome.
    async fn execute_with<FS, FN>(
        &self,
        cancel: &CancellationToken,
        on_some: FS,
        on_none: FN,
    ) -> RunResult<()>
    where
        FS: FnOnce(Self::Output),
        FN: FnOnce(),
    {
        match self.run((), cancel).await? {
            Some(value) => on_some(value),
            None => on_none(),
        }
        Ok(())
    }
}

impl<E: Effect<Kind = OptionKind>> OptionEffectExt for E {}
