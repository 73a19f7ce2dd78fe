//! Reader effects: computations over a shared, read-only environment.
//!
//! A Reader is run with its environment as input. Every step of a chain
//! sees the same environment, except inside [`local`], which runs one
//! effect against a derived environment.
//!
//! # Example
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! #[derive(Clone)]
//! struct Config {
//!     host: String,
//!     port: u16,
//! }
//!
//! # tokio_test::block_on(async {
//! let address = reader::asks(|c: &Config| c.host.clone())
//!     .and_then(|host| reader::asks(move |c: &Config| format!("{host}:{}", c.port)));
//!
//! let config = Config { host: "localhost".into(), port: 8080 };
//! let token = CancellationToken::new();
//! assert_eq!(address.run(config, &token).await, Ok("localhost:8080".to_string()));
//! # });
//! ```

use std::future::Future;
use std::marker::PhantomData;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::combinators::{FromAsync, FromFn, Pure};
use crate::effect::convert::{Convert, IntoRws, ProvideEnv};
use crate::effect::kind::{IdentityKind, ReaderKind, RwsKind};
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};
use crate::monoid::Monoid;

/// A Reader effect producing `value` whatever the environment.
pub fn pure<Env, T>(value: T) -> Pure<ReaderKind<Env>, T> {
    Pure::new(value)
}

/// A Reader effect producing the environment itself.
pub fn ask<Env>() -> impl Effect<Kind = ReaderKind<Env>, Output = Env>
where
    Env: Clone + Send + Sync + 'static,
{
    FromFn::new(|env: Env| env)
}

/// A Reader effect producing a projection of the environment.
pub fn asks<Env, T, F>(f: F) -> impl Effect<Kind = ReaderKind<Env>, Output = T>
where
    Env: Clone + Send + Sync + 'static,
    F: Fn(&Env) -> T + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(move |env: Env| f(&env))
}

/// A Reader effect computed from an owned copy of the environment.
pub fn create<Env, T, F>(f: F) -> impl Effect<Kind = ReaderKind<Env>, Output = T>
where
    Env: Clone + Send + Sync + 'static,
    F: Fn(Env) -> T + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(f)
}

/// A Reader effect computed asynchronously from the environment.
pub fn create_async<Env, T, F, Fut>(f: F) -> impl Effect<Kind = ReaderKind<Env>, Output = T>
where
    Env: Clone + Send + Sync + 'static,
    F: Fn(Env) -> Fut + Send + Sync,
    Fut: Future<Output = T> + Send,
    T: Send + 'static,
{
    FromAsync::new(f)
}

/// Run `effect` against the environment derived by `f`.
///
/// The surrounding chain keeps the original environment.
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let port = reader::ask::<u16>();
/// let shifted = reader::local(|base: &u16| base + 1000, port);
/// assert_eq!(shifted.run(80, &CancellationToken::new()).await, Ok(1080));
/// # });
/// ```
pub fn local<E, F, Env2>(f: F, effect: E) -> Local<E, F, Env2> {
    Local::new(effect, f)
}

/// Runs the inner Reader against a derived environment.
///
/// Created by [`local`] or [`ReaderEffectExt::local`].
pub struct Local<E, F, Env2> {
    pub(crate) inner: E,
    pub(crate) f: F,
    pub(crate) _env: PhantomData<fn() -> Env2>,
}

impl<E, F, Env2> Local<E, F, Env2> {
    /// Wrap `inner`, deriving its environment with `f`.
    pub fn new(inner: E, f: F) -> Self {
        Local {
            inner,
            f,
            _env: PhantomData,
        }
    }
}

impl<E, F, Env2> std::fmt::Debug for Local<E, F, Env2> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Local")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<E, F, Env, Env2> Effect for Local<E, F, Env2>
where
    E: Effect<Kind = ReaderKind<Env>>,
    F: Fn(&Env2) -> Env + Send + Sync,
    Env: Clone + Send + Sync + 'static,
    Env2: Clone + Send + Sync + 'static,
{
    type Kind = ReaderKind<Env2>;
    type Output = E::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let inner_env = (self.f)(&input);
            self.inner.run(inner_env, cancel).await
        })
    }
}

/// Methods specific to Reader effects over `Env`.
#[allow(async_fn_in_trait)]
pub trait ReaderEffectExt<Env>: Effect<Kind = ReaderKind<Env>> + Sized
where
    Env: Clone + Send + Sync + 'static,
{
    /// Run against a wider environment `Env2`, narrowed by `f`.
    fn local<Env2, F>(self, f: F) -> Local<Self, F, Env2>
    where
        F: Fn(&Env2) -> Env + Send + Sync,
        Env2: Clone + Send + Sync + 'static,
    {
        Local::new(self, f)
    }

    /// Fix the environment, producing an Identity effect.
    fn provide(self, env: Env) -> Convert<Self, ProvideEnv<Env>, IdentityKind> {
        Convert::new(self, ProvideEnv { env })
    }

    /// Embed into RWS; the state passes through and nothing is written.
    fn into_rws<W, S>(self) -> Convert<Self, IntoRws, RwsKind<Env, W, S>>
    where
        W: Monoid + Send + Sync + 'static,
        S: Clone + Send + Sync + 'static,
    {
        Convert::new(self, IntoRws)
    }

    /// Run with `env` and hand the value to `on_value`.
    async fn execute_with<F>(
        &self,
        env: Env,
        cancel: &CancellationToken,
        on_value: F,
    ) -> RunResult<()>
    where
        F: FnOnce(Self::Output),
    {
        on_value(self.run(env, cancel).await?);
        Ok(())
    }
}

impl<Env, E> ReaderEffectExt<Env> for E
where
    Env: Clone + Send + Sync + 'static,
    E: Effect<Kind = ReaderKind<Env>>,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Settings {
        retries: u32,
        name: &'static str,
    }

    fn settings() -> Settings {
        Settings {
            retries: 3,
            name: "worker",
        }
    }

    #[tokio::test]
    async fn test_ask_returns_environment() {
        let effect = ask::<Settings>();
        let token = CancellationToken::new();
        assert_eq!(effect.run(settings(), &token).await, Ok(settings()));
    }

    #[tokio::test]
    async fn test_every_step_sees_same_environment() {
        let effect = asks(|s: &Settings| s.retries)
            .and_then(|retries| asks(move |s: &Settings| format!("{} x{retries}", s.name)));
        let token = CancellationToken::new();
        assert_eq!(
            effect.run(settings(), &token).await,
            Ok("worker x3".to_string())
        );
    }

    #[tokio::test]
    async fn test_local_only_affects_inner_effect() {
        let effect = ask::<Settings>()
            .local(|outer: &Settings| Settings {
                retries: outer.retries * 10,
                ..outer.clone()
            })
            .and_then(|inner| asks(move |outer: &Settings| (inner.retries, outer.retries)));

        let token = CancellationToken::new();
        assert_eq!(effect.run(settings(), &token).await, Ok((30, 3)));
    }

    #[tokio::test]
    async fn test_local_narrows_environment_type() {
        let name_len = asks(|name: &&'static str| name.len());
        let effect = local(|s: &Settings| s.name, name_len);
        let token = CancellationToken::new();
        assert_eq!(effect.run(settings(), &token).await, Ok(6));
    }

    #[tokio::test]
    async fn test_create_and_create_async() {
        let token = CancellationToken::new();
        let owned = create(|s: Settings| s.name.to_uppercase());
        assert_eq!(owned.run(settings(), &token).await, Ok("WORKER".to_string()));

        let later = create_async(|s: Settings| async move { s.retries + 1 });
        assert_eq!(later.run(settings(), &token).await, Ok(4));
    }

    #[tokio::test]
    async fn test_provide_fixes_environment() {
        let effect = asks(|s: &Settings| s.retries).provide(settings());
        assert_eq!(effect.run_standalone().await, Ok(3));
    }

    #[tokio::test]
    async fn test_into_rws_passes_state_through() {
        let effect = asks(|s: &Settings| s.retries).into_rws::<Vec<String>, i32>();
        let token = CancellationToken::new();
        assert_eq!(
            effect.run((settings(), 7), &token).await,
            Ok(RwsResult::new(3, vec![], 7))
        );
    }

    #[tokio::test]
    async fn test_execute_with() {
        let mut seen = 0;
        pure::<Settings, _>(5)
            .execute_with(settings(), &CancellationToken::new(), |v| seen = v)
            .await
            .unwrap();
        assert_eq!(seen, 5);
    }
}
