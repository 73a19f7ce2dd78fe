//! RWS effects: Reader, Writer and State in one.
//!
//! An RWS effect runs with `(environment, initial_state)` and produces an
//! [`RwsResult`] holding the value, the accumulated output and the final
//! state. A chain passes the same environment to every step, appends
//! outputs in run order, and starts each step from the state the previous
//! step reported.
//!
//! Every step reports an explicit state. Steps that do not touch the state
//! report the state they were given.
//!
//! # Example
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! #[derive(Clone)]
//! struct Limits {
//!     max_batch: usize,
//! }
//!
//! type Log = Vec<String>;
//!
//! # tokio_test::block_on(async {
//! // Take up to `max_batch` items from the queue held in state.
//! let take_batch = rws::asks(|l: &Limits| l.max_batch).and_then(|max| {
//!     rws::create(move |_: &Limits, mut queue: Vec<u32>| {
//!         let cut = queue.len().saturating_sub(max);
//!         let batch = queue.split_off(cut);
//!         let log: Log = vec![format!("took {}", batch.len())];
//!         RwsResult::new(batch, log, queue)
//!     })
//! });
//!
//! let token = CancellationToken::new();
//! let result = take_batch
//!     .run((Limits { max_batch: 2 }, vec![1, 2, 3]), &token)
//!     .await
//!     .unwrap();
//! assert_eq!(result.value, vec![2, 3]);
//! assert_eq!(result.output, vec!["took 2"]);
//! assert_eq!(result.state, vec![1]);
//! # });
//! ```

use std::future::Future;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::combinators::{FromAsync, FromFn, Pure};
use crate::effect::convert::{Convert, ProvideContext};
use crate::effect::kind::{IdentityKind, RwsKind};
use crate::effect::trait_def::Effect;
use crate::monoid::Monoid;
use crate::result::RwsResult;

/// An RWS effect producing `value`; nothing is written and the state is
/// left alone.
pub fn pure<Env, W, S, T>(value: T) -> Pure<RwsKind<Env, W, S>, T> {
    Pure::new(value)
}

/// An RWS effect producing the environment.
pub fn ask<Env, W, S>() -> impl Effect<Kind = RwsKind<Env, W, S>, Output = Env>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    FromFn::new(|(env, state): (Env, S)| RwsResult::new(env, W::empty(), state))
}

/// An RWS effect producing a projection of the environment.
pub fn asks<Env, W, S, T, F>(f: F) -> impl Effect<Kind = RwsKind<Env, W, S>, Output = T>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    F: Fn(&Env) -> T + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(move |(env, state): (Env, S)| RwsResult::new(f(&env), W::empty(), state))
}

/// An RWS effect producing the current state.
pub fn get<Env, W, S>() -> impl Effect<Kind = RwsKind<Env, W, S>, Output = S>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    FromFn::new(|(_, state): (Env, S)| RwsResult::new(state.clone(), W::empty(), state))
}

/// An RWS effect replacing the state with `state`.
pub fn put<Env, W, S>(state: S) -> impl Effect<Kind = RwsKind<Env, W, S>, Output = ()>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    FromFn::new(move |_: (Env, S)| RwsResult::new((), W::empty(), state.clone()))
}

/// Like [`put`], also producing the new state as the value.
pub fn put_get<Env, W, S>(state: S) -> impl Effect<Kind = RwsKind<Env, W, S>, Output = S>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    FromFn::new(move |_: (Env, S)| RwsResult::new(state.clone(), W::empty(), state.clone()))
}

/// An RWS effect replacing the state with `f(state)`.
pub fn with<Env, W, S, F>(f: F) -> impl Effect<Kind = RwsKind<Env, W, S>, Output = ()>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    F: Fn(S) -> S + Send + Sync,
{
    FromFn::new(move |(_, state): (Env, S)| RwsResult::new((), W::empty(), f(state)))
}

/// An RWS effect that appends `output`.
pub fn tell<Env, W, S>(output: W) -> impl Effect<Kind = RwsKind<Env, W, S>, Output = ()>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Clone + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    FromFn::new(move |(_, state): (Env, S)| RwsResult::new((), output.clone(), state))
}

/// An RWS effect over a `Vec` log that appends a single entry.
pub fn tell_one<Env, A, S>(item: A) -> impl Effect<Kind = RwsKind<Env, Vec<A>, S>, Output = ()>
where
    Env: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    tell(vec![item])
}

/// An RWS effect computed by `f` from the environment and the current
/// state.
pub fn create<Env, W, S, T, F>(f: F) -> impl Effect<Kind = RwsKind<Env, W, S>, Output = T>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    F: Fn(&Env, S) -> RwsResult<W, S, T> + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(move |(env, state): (Env, S)| f(&env, state))
}

/// An RWS effect computed asynchronously from the environment and the
/// current state.
pub fn create_async<Env, W, S, T, F, Fut>(
    f: F,
) -> impl Effect<Kind = RwsKind<Env, W, S>, Output = T>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    F: Fn(Env, S) -> Fut + Send + Sync,
    Fut: Future<Output = RwsResult<W, S, T>> + Send,
    T: Send + 'static,
{
    FromAsync::new(move |(env, state): (Env, S)| f(env, state))
}

/// Methods specific to RWS effects.
#[allow(async_fn_in_trait)]
pub trait RwsEffectExt<Env, W, S>: Effect<Kind = RwsKind<Env, W, S>> + Sized
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    /// Fix the environment and initial state, keeping only the value.
    fn provide_context(
        self,
        env: Env,
        initial: S,
    ) -> Convert<Self, ProvideContext<Env, S>, IdentityKind> {
        Convert::new(self, ProvideContext { env, initial })
    }

    /// Run and hand the value, output and final state to `on_result`.
    async fn execute_with<F>(
        &self,
        env: Env,
        initial: S,
        cancel: &CancellationToken,
        on_result: F,
    ) -> RunResult<()>
    where
        F: FnOnce(Self::Output, W, S),
    {
        let (value, output, state) = self.run((env, initial), cancel).await?.into_parts();
        on_result(value, output, state);
        Ok(())
    }
}

impl<Env, W, S, E> RwsEffectExt<Env, W, S> for E
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    E: Effect<Kind = RwsKind<Env, W, S>>,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Env {
        step: i32,
    }

    type Log = Vec<String>;

    fn env() -> Env {
        Env { step: 5 }
    }

    #[tokio::test]
    async fn test_bind_threads_all_three_contexts() {
        let effect = asks::<Env, Log, i32, _, _>(|e| e.step)
            .and_then(|step| with(move |n: i32| n + step))
            .and_then(|_| tell_one("stepped".to_string()))
            .and_then(|_| get())
            .and_then(|n| tell(vec![format!("now {n}")]).map(move |_| n));

        let token = CancellationToken::new();
        let result = effect.run((env(), 10), &token).await.unwrap();
        assert_eq!(result.value, 15);
        assert_eq!(result.output, vec!["stepped", "now 15"]);
        assert_eq!(result.state, 15);
    }

    #[tokio::test]
    async fn test_untouched_state_falls_through() {
        let effect = put::<Env, Log, i32>(3)
            .and_then(|_| ask())
            .and_then(|_| tell(vec!["no state change".to_string()]));

        let token = CancellationToken::new();
        let result = effect.run((env(), 0), &token).await.unwrap();
        assert_eq!(result.state, 3);
    }

    #[tokio::test]
    async fn test_put_get_and_pure() {
        let effect = pure::<Env, Log, i32, _>('p')
            .and_then(|_| put_get(8))
            .map(|n| n * 2);

        let token = CancellationToken::new();
        assert_eq!(
            effect.run((env(), 1), &token).await,
            Ok(RwsResult::new(16, vec![], 8))
        );
    }

    #[tokio::test]
    async fn test_listen_and_censor() {
        let effect = tell::<Env, Log, u8>(vec!["a".to_string(), "b".to_string()])
            .listen()
            .map(|((), log)| log.len())
            .censor(|log| log.into_iter().map(|line| line.to_uppercase()).collect());

        let token = CancellationToken::new();
        let result = effect.run((env(), 0), &token).await.unwrap();
        assert_eq!(result.value, 2);
        assert_eq!(result.output, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_create_async_sees_env_and_state() {
        let effect = create_async(|e: Env, n: i32| async move {
            RwsResult::new(e.step * n, Log::new(), n + 1)
        });

        let token = CancellationToken::new();
        assert_eq!(
            effect.run((env(), 4), &token).await,
            Ok(RwsResult::new(20, vec![], 5))
        );
    }

    #[tokio::test]
    async fn test_provide_context() {
        let effect = create(|e: &Env, n: i32| RwsResult::new(e.step + n, Log::new(), n))
            .provide_context(env(), 1);
        assert_eq!(effect.run_standalone().await, Ok(6));
    }

    #[tokio::test]
    async fn test_execute_with() {
        let mut seen = None;
        with::<Env, Log, i32, _>(|n| n - 1)
            .execute_with(env(), 10, &CancellationToken::new(), |value, output, state| {
                seen = Some((value, output.len(), state))
            })
            .await
            .unwrap();
        assert_eq!(seen, Some(((), 0, 9)));
    }
}
