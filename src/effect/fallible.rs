//! Try effects: computations that may fail with an [`Exception`].
//!
//! A failure short-circuits the chain like `Left` does for Either. In
//! addition, a Try step never escapes its carrier: a panic inside the step
//! becomes a failure (see [`Exception::is_panic`]) and so does a
//! cancellation (see [`Exception::is_cancellation`]). Running a Try effect
//! always resolves to `Ok(carrier)`.
//!
//! The module is called `fallible` because `try` is a reserved word.
//!
//! # Example
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let parse = |raw: &'static str| fallible::create(move || raw.parse::<i64>());
//!
//! let doubled = parse("21").map(|n| n * 2);
//! assert_eq!(doubled.run_standalone().await.unwrap().unwrap(), 42);
//!
//! let broken = parse("twenty").map(|n| n * 2).recover(|_| fallible::success(0));
//! assert_eq!(broken.run_standalone().await.unwrap().unwrap(), 0);
//! # });
//! ```

use std::future::Future;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::combinators::{Fail, FromAsync, FromFn, OrElse, Pure, TapHalt};
use crate::effect::convert::{Convert, TryToEither, TryToOption};
use crate::effect::kind::{EitherKind, OptionKind, TryKind};
use crate::effect::trait_def::Effect;
use crate::exception::Exception;

/// A Try effect that succeeds with `value`.
pub fn success<T>(value: T) -> Pure<TryKind, T> {
    Pure::new(value)
}

/// A Try effect that fails with `exception`.
pub fn throw<T>(exception: impl Into<Exception>) -> Fail<TryKind, T> {
    Fail::new(exception.into())
}

/// A Try effect reproducing `result` on every run.
pub fn from_result<T, E>(result: Result<T, E>) -> impl Effect<Kind = TryKind, Output = T>
where
    T: Clone + Send + Sync + 'static,
    E: Into<Exception>,
{
    let result = result.map_err(Into::into);
    FromFn::new(move |()| result.clone())
}

/// A Try effect computed by a fallible function each time it runs.
///
/// Any error convertible into an [`Exception`] works, which covers every
/// `std::error::Error + Send + Sync + 'static`.
pub fn create<T, E, F>(f: F) -> impl Effect<Kind = TryKind, Output = T>
where
    F: Fn() -> Result<T, E> + Send + Sync,
    E: Into<Exception>,
    T: Send + 'static,
{
    FromFn::new(move |()| f().map_err(Into::into))
}

/// A Try effect computed by an asynchronous fallible function.
pub fn create_async<T, E, F, Fut>(f: F) -> impl Effect<Kind = TryKind, Output = T>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send,
    E: Into<Exception>,
    T: Send + 'static,
{
    FromAsync::new(move |()| {
        let attempt = f();
        async move { attempt.await.map_err(Into::into) }
    })
}

/// Methods specific to Try effects.
#[allow(async_fn_in_trait)]
pub trait TryEffectExt: Effect<Kind = TryKind> + Sized {
    /// Replace a failure with the effect `f` picks for it.
    ///
    /// A cancelled run bypasses `f`: the carrier the caller receives is the
    /// cancellation failure itself.
    fn recover<E2, F>(self, f: F) -> OrElse<Self, F>
    where
        E2: Effect<Kind = TryKind, Output = Self::Output>,
        F: Fn(Exception) -> E2 + Send + Sync,
    {
        OrElse { inner: self, f }
    }

    /// Observe the exception, if the run failed.
    fn tap_failure<F>(self, f: F) -> TapHalt<Self, F>
    where
        F: Fn(&Exception) + Send + Sync,
    {
        TapHalt { inner: self, f }
    }

    /// Convert to Option, dropping the exception.
    fn to_option(self) -> Convert<Self, TryToOption, OptionKind> {
        Convert::new(self, TryToOption)
    }

    /// Convert to Either, projecting the exception into a `Left` value.
    fn to_either<L, F>(self, f: F) -> Convert<Self, TryToEither<F>, EitherKind<L>>
    where
        F: Fn(Exception) -> L + Send + Sync,
        L: Send + 'static,
    {
        Convert::new(self, TryToEither { f })
    }

    /// Run and dispatch on the outcome.
    ///
    /// A cancelled run reaches `on_failure` with a cancellation exception.
    async fn execute_with<FS, FF>(
        &self,
        cancel: &CancellationToken,
        on_success: FS,
        on_failure: FF,
    ) -> RunResult<()>
    where
        FS: FnOnce(Self::Output),
        FF: FnOnce(Exception),
    {
        match self.run((), cancel).await? {
            Ok(value) => on_success(value),
            Err(exception) => on_failure(exception),
        }
        Ok(())
    }
}

impl<E: Effect<Kind = TryKind>> TryEffectExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::prelude::*;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Timeout;

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "timed out")
        }
    }

    impl std::error::Error for Timeout {}

    #[tokio::test]
    async fn test_failure_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let effect = throw::<i32>(Timeout).and_then(move |x| {
            counted.fetch_add(1, Ordering::SeqCst);
            success(x)
        });

        let exception = effect.run_standalone().await.unwrap().unwrap_err();
        assert!(exception.downcast_ref::<Timeout>().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_panic_becomes_failure() {
        let effect = success(2).map(|x: i32| -> i32 {
            if x > 1 {
                panic!("too large: {x}");
            }
            x
        });

        let exception = effect.run_standalone().await.unwrap().unwrap_err();
        assert!(exception.is_panic());
        assert!(exception.to_string().contains("too large: 2"));
    }

    #[tokio::test]
    async fn test_cancellation_becomes_failure() {
        let token = CancellationToken::new();
        token.cancel();

        let result = success(1).run((), &token).await;
        let exception = result.unwrap().unwrap_err();
        assert!(exception.is_cancellation());
    }

    #[tokio::test]
    async fn test_cancellation_mid_chain_stops_later_steps() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        let later = Arc::new(AtomicUsize::new(0));
        let counted = later.clone();

        let effect = create(move || {
            trigger.cancel();
            Ok::<_, Exception>(1)
        })
        .and_then(move |x| {
            counted.fetch_add(1, Ordering::SeqCst);
            success(x)
        });

        let exception = effect.run((), &token).await.unwrap().unwrap_err();
        assert!(exception.is_cancellation());
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_from_result_and_create_async() {
        let stored = from_result(Err::<i32, _>(Timeout));
        let first = stored.run_standalone().await.unwrap().unwrap_err();
        let second = stored.run_standalone().await.unwrap().unwrap_err();
        assert!(first.ptr_eq(&second));

        let effect = create_async(|| async { Ok::<_, Timeout>("fetched") });
        assert_eq!(effect.run_standalone().await.unwrap().unwrap(), "fetched");
    }

    #[tokio::test]
    async fn test_recover_and_tap_failure() {
        let failures = Arc::new(AtomicUsize::new(0));
        let counted = failures.clone();
        let effect = throw::<&str>(Exception::msg("primary"))
            .tap_failure(move |_| {
                counted.fetch_add(1, Ordering::SeqCst);
            })
            .recover(|e| {
                let fallback = e.to_string() == "primary";
                success(if fallback { "fallback" } else { "?" })
            });

        assert_eq!(effect.run_standalone().await.unwrap().unwrap(), "fallback");
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_conversions() {
        assert_eq!(throw::<i32>(Timeout).to_option().run_standalone().await, Ok(None));
        assert_eq!(
            throw::<i32>(Timeout)
                .to_either(|e| e.to_string())
                .run_standalone()
                .await,
            Ok(Either::left("timed out".to_string()))
        );
        assert_eq!(success(1).to_option().run_standalone().await, Ok(Some(1)));
    }

    #[tokio::test]
    async fn test_execute_with_reports_cancellation_as_failure() {
        let token = CancellationToken::new();
        token.cancel();
        let outcome = std::cell::Cell::new("unset");

        success(1)
            .execute_with(&token, |_| outcome.set("success"), |e| {
                outcome.set(if e.is_cancellation() { "cancelled" } else { "failed" })
            })
            .await
            .unwrap();
        assert_eq!(outcome.get(), "cancelled");
    }

    #[tokio::test]
    async fn test_recover_is_bypassed_by_cancellation() {
        let handled = Arc::new(AtomicUsize::new(0));
        let counted = handled.clone();
        let effect = success(1).recover(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            success(0)
        });

        let token = CancellationToken::new();
        token.cancel();
        let exception = effect.run((), &token).await.unwrap().unwrap_err();

        assert!(exception.is_cancellation());
        assert_eq!(handled.load(Ordering::SeqCst), 0);
    }
}
