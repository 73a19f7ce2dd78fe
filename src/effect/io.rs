//! IO effects: deferred side-effecting computations.
//!
//! IO carries the bare value like Identity. The separate kind marks
//! computations that touch the outside world, so they do not mix with pure
//! values by accident; `into_identity` makes the change explicit.
//!
//! A synchronous IO closure runs inline on the task that polls the run.
//! Blocking work belongs in [`create_async`] behind whatever executor
//! facility the caller prefers.

use std::future::Future;

use crate::effect::combinators::{FromAsync, FromFn, Pure};
use crate::effect::kind::IoKind;
use crate::effect::trait_def::Effect;

/// An IO effect producing `value`.
pub fn pure<T>(value: T) -> Pure<IoKind, T> {
    Pure::new(value)
}

/// An IO effect running `f` each time it runs.
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let now = io::create(|| std::process::id());
/// assert_eq!(now.run_standalone().await, Ok(std::process::id()));
/// # });
/// ```
pub fn create<T, F>(f: F) -> impl Effect<Kind = IoKind, Output = T>
where
    F: Fn() -> T + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(move |()| f())
}

/// An IO effect running an asynchronous function each time it runs.
pub fn create_async<T, F, Fut>(f: F) -> impl Effect<Kind = IoKind, Output = T>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = T> + Send,
    T: Send + 'static,
{
    FromAsync::new(move |()| f())
}
