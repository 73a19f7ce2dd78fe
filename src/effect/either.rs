//! Either effects: a success value or a `Left` error value.
//!
//! `Left` short-circuits a chain and travels to the end unchanged, unless a
//! [`catch`](crate::effect::EffectExt::catch) or
//! [`or_else`](crate::effect::EffectExt::or_else) picks it up.
//!
//! # Example
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum ConfigError {
//!     Missing,
//!     Invalid(String),
//! }
//!
//! fn port(raw: Option<&'static str>) -> impl Effect<Kind = EitherKind<ConfigError>, Output = u16> {
//!     either::create(move || match raw {
//!         Some(text) => Either::from(
//!             text.parse::<u16>()
//!                 .map_err(|_| ConfigError::Invalid(text.to_string())),
//!         ),
//!         None => Either::left(ConfigError::Missing),
//!     })
//! }
//!
//! # tokio_test::block_on(async {
//! assert_eq!(port(Some("8080")).run_standalone().await, Ok(Either::right(8080)));
//! assert_eq!(
//!     port(Some("http")).map_left(|e: ConfigError| format!("{e:?}")).run_standalone().await,
//!     Ok(Either::left("Invalid(\"http\")".to_string()))
//! );
//! # });
//! ```

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::combinators::{Fail, FromAsync, FromFn, Pure, TapHalt};
use crate::effect::convert::{Convert, EitherToOption, EitherToTry};
use crate::effect::kind::{EitherKind, OptionKind, TryKind};
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};
use crate::either::Either;
use crate::exception::Exception;

/// An Either effect producing `Right(value)`.
pub fn right<L, T>(value: T) -> Pure<EitherKind<L>, T> {
    Pure::new(value)
}

/// An Either effect producing `Left(value)`.
pub fn left<L: Send + 'static, T>(value: L) -> Fail<EitherKind<L>, T> {
    Fail::new(value)
}

/// An Either effect producing a copy of `value` on every run.
pub fn from_either<L, T>(value: Either<L, T>) -> impl Effect<Kind = EitherKind<L>, Output = T>
where
    L: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    FromFn::new(move |()| value.clone())
}

/// An Either effect computed by `f` each time it runs.
pub fn create<L, T, F>(f: F) -> impl Effect<Kind = EitherKind<L>, Output = T>
where
    F: Fn() -> Either<L, T> + Send + Sync,
    L: Send + 'static,
    T: Send + 'static,
{
    FromFn::new(move |()| f())
}

/// An Either effect computed by an asynchronous function.
pub fn create_async<L, T, F, Fut>(f: F) -> impl Effect<Kind = EitherKind<L>, Output = T>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Either<L, T>> + Send,
    L: Send + 'static,
    T: Send + 'static,
{
    FromAsync::new(move |()| f())
}

/// Transforms the `Left` value, changing the effect's kind.
///
/// Created by [`EitherEffectExt::map_left`].
pub struct MapLeft<E, F> {
    inner: E,
    f: F,
}

impl<E, F> std::fmt::Debug for MapLeft<E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapLeft")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<E, F, L, L2> Effect for MapLeft<E, F>
where
    E: Effect<Kind = EitherKind<L>>,
    F: Fn(L) -> L2 + Send + Sync,
    L: Send + 'static,
    L2: Send + 'static,
{
    type Kind = EitherKind<L2>;
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
            Ok(carrier.map_left(|left| (self.f)(left)))
        })
    }
}

/// Methods specific to Either effects with `Left` type `L`.
#[allow(async_fn_in_trait)]
pub trait EitherEffectExt<L: Send + 'static>: Effect<Kind = EitherKind<L>> + Sized {
    /// Transform the `Left` value; `Right` passes through.
    fn map_left<L2, F>(self, f: F) -> MapLeft<Self, F>
    where
        F: Fn(L) -> L2 + Send + Sync,
        L2: Send + 'static,
    {
        MapLeft { inner: self, f }
    }

    /// Observe the `Left` value, if any.
    fn tap_left<F>(self, f: F) -> TapHalt<Self, F>
    where
        F: Fn(&L) + Send + Sync,
    {
        TapHalt { inner: self, f }
    }

    /// Convert to Option, dropping the `Left` value.
    fn to_option(self) -> Convert<Self, EitherToOption, OptionKind> {
        Convert::new(self, EitherToOption)
    }

    /// Convert to Try, turning the `Left` value into an exception with `f`.
    fn to_try<F>(self, f: F) -> Convert<Self, EitherToTry<F>, TryKind>
    where
        F: Fn(L) -> Exception + Send + Sync,
    {
        Convert::new(self, EitherToTry { f })
    }

    /// Run and dispatch on the outcome.
    async fn execute_with<FL, FR>(
        &self,
        cancel: &CancellationToken,
        on_left: FL,
        on_right: FR,
    ) -> RunResult<()>
    where
        FL: FnOnce(L),
        FR: FnOnce(Self::Output),
    {
        match self.run((), cancel).await? {
            Either::Left(left) => on_left(left),
            Either::Right(right) => on_right(right),
        }
        Ok(())
    }
}

impl<L, E> EitherEffectExt<L> for E
where
    L: Send + 'static,
    E: Effect<Kind = EitherKind<L>>,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::prelude::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_left_short_circuits() {
        let effect = left::<&str, i32>("boom")
            .map(|x| x * 2)
            .and_then(|x| right(x + 1));
        assert_eq!(effect.run_standalone().await, Ok(Either::left("boom")));
    }

    #[tokio::test]
    async fn test_map_left_leaves_right_alone() {
        let effect = right::<u8, _>("ok").map_left(|code: u8| code as u32 * 100);
        assert_eq!(effect.run_standalone().await, Ok(Either::right("ok")));

        let effect = left::<u8, &str>(4).map_left(|code: u8| code as u32 * 100);
        assert_eq!(effect.run_standalone().await, Ok(Either::left(400)));
    }

    #[tokio::test]
    async fn test_tap_left_observes_error_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let observe = move |e: &&str| sink.lock().unwrap().push(e.to_string());

        let failing = left::<&str, i32>("bad").tap_left(observe.clone());
        let passing = right::<&str, i32>(1).tap_left(observe);
        failing.run_standalone().await.unwrap();
        passing.run_standalone().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["bad".to_string()]);
    }

    #[tokio::test]
    async fn test_catch_recovers_from_left() {
        let effect = left::<&str, i32>("primary down").catch(right(7));
        assert_eq!(effect.run_standalone().await, Ok(Either::right(7)));
    }

    #[tokio::test]
    async fn test_or_else_sees_left_value() {
        let effect = left::<String, usize>("four".into()).or_else(|e| right(e.len()));
        assert_eq!(effect.run_standalone().await, Ok(Either::right(4)));
    }

    #[tokio::test]
    async fn test_conversions() {
        assert_eq!(left::<&str, i32>("x").to_option().run_standalone().await, Ok(None));

        let failed = left::<&str, i32>("disk full")
            .to_try(|e| Exception::msg(e))
            .run_standalone()
            .await
            .unwrap();
        assert_eq!(failed.unwrap_err().to_string(), "disk full");

        let succeeded = from_either(Either::<&str, i32>::right(5))
            .to_try(|e| Exception::msg(e))
            .run_standalone()
            .await
            .unwrap();
        assert_eq!(succeeded.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_create_async() {
        let effect = create_async(|| async { Either::<String, _>::right(3) });
        assert_eq!(effect.run_standalone().await, Ok(Either::right(3)));
    }

    #[tokio::test]
    async fn test_execute_with_dispatches() {
        let outcome = std::cell::Cell::new(0);
        right::<&str, i32>(12)
            .execute_with(
                &CancellationToken::new(),
                |_| outcome.set(-1),
                |v| outcome.set(v),
            )
            .await
            .unwrap();
        assert_eq!(outcome.get(), 12);
    }
}
