//! State effects: computations that thread a state value.
//!
//! A State effect is run with an initial state and reports the state after
//! the run next to its value. In a chain, each step starts from the state
//! the previous step left behind.
//!
//! # Example
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! # tokio_test::block_on(async {
//! // Pop the top of a stack, if any.
//! let pop = state::create(|mut stack: Vec<i32>| {
//!     let top = stack.pop();
//!     StateResult::new(stack, top)
//! });
//!
//! let result = pop.run(vec![1, 2, 3], &CancellationToken::new()).await.unwrap();
//! assert_eq!(result.value, Some(3));
//! assert_eq!(result.state, vec![1, 2]);
//! # });
//! ```

use std::future::Future;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::combinators::{FromAsync, FromFn, Pure};
use crate::effect::convert::{Convert, IntoRws, ProvideState};
use crate::effect::kind::{IdentityKind, RwsKind, StateKind};
use crate::effect::trait_def::Effect;
use crate::monoid::Monoid;
use crate::result::StateResult;

/// A State effect producing `value`; the state is left alone.
pub fn pure<S, T>(value: T) -> Pure<StateKind<S>, T> {
    Pure::new(value)
}

/// A State effect producing the current state.
pub fn get<S>() -> impl Effect<Kind = StateKind<S>, Output = S>
where
    S: Clone + Send + Sync + 'static,
{
    FromFn::new(|state: S| StateResult::new(state.clone(), state))
}

/// A State effect producing a projection of the current state.
pub fn gets<S, T, F>(f: F) -> impl Effect<Kind = StateKind<S>, Output = T>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(&S) -> T + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(move |state: S| {
        let value = f(&state);
        StateResult::new(state, value)
    })
}

/// A State effect replacing the state with `state`.
pub fn put<S>(state: S) -> impl Effect<Kind = StateKind<S>, Output = ()>
where
    S: Clone + Send + Sync + 'static,
{
    FromFn::new(move |_previous: S| StateResult::new(state.clone(), ()))
}

/// Like [`put`], also producing the new state as the value.
pub fn put_get<S>(state: S) -> impl Effect<Kind = StateKind<S>, Output = S>
where
    S: Clone + Send + Sync + 'static,
{
    FromFn::new(move |_previous: S| StateResult::new(state.clone(), state.clone()))
}

/// A State effect replacing the state with `f(state)`.
pub fn modify<S, F>(f: F) -> impl Effect<Kind = StateKind<S>, Output = ()>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S) -> S + Send + Sync,
{
    FromFn::new(move |state: S| StateResult::new(f(state), ()))
}

/// A State effect computed by `f` from the current state.
pub fn create<S, T, F>(f: F) -> impl Effect<Kind = StateKind<S>, Output = T>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S) -> StateResult<S, T> + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(f)
}

/// A State effect computed asynchronously from the current state.
pub fn create_async<S, T, F, Fut>(f: F) -> impl Effect<Kind = StateKind<S>, Output = T>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S) -> Fut + Send + Sync,
    Fut: Future<Output = StateResult<S, T>> + Send,
    T: Send + 'static,
{
    FromAsync::new(f)
}

/// Methods specific to State effects over `S`.
#[allow(async_fn_in_trait)]
pub trait StateEffectExt<S>: Effect<Kind = StateKind<S>> + Sized
where
    S: Clone + Send + Sync + 'static,
{
    /// Fix the initial state and keep only the value.
    fn provide_state(self, initial: S) -> Convert<Self, ProvideState<S>, IdentityKind> {
        Convert::new(self, ProvideState { initial })
    }

    /// Embed into RWS; the environment is ignored and nothing is written.
    fn into_rws<Env, W>(self) -> Convert<Self, IntoRws, RwsKind<Env, W, S>>
    where
        Env: Clone + Send + Sync + 'static,
        W: Monoid + Send + Sync + 'static,
    {
        Convert::new(self, IntoRws)
    }

    /// Run from `initial` and hand the value and final state to
    /// `on_result`.
    async fn execute_with<F>(
        &self,
        initial: S,
        cancel: &CancellationToken,
        on_result: F,
    ) -> RunResult<()>
    where
        F: FnOnce(Self::Output, S),
    {
        let (state, value) = self.run(initial, cancel).await?.into_parts();
        on_result(value, state);
        Ok(())
    }
}

impl<S, E> StateEffectExt<S> for E
where
    S: Clone + Send + Sync + 'static,
    E: Effect<Kind = StateKind<S>>,
{
}
