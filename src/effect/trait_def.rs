//! The `Effect` trait: a lazily-executed, re-runnable computation.
//!
//! An effect value describes work without doing any. Nothing happens until
//! [`Effect::run`] is awaited, and because `run` borrows the effect, the same
//! value can be run any number of times with different inputs.
//!
//! # Design Philosophy
//!
//! Like `Future` and `Iterator`, combinators return concrete types; use
//! [`boxed`](crate::effect::EffectExt::boxed) when you need type erasure.
//! The carrier a run produces and the input it takes come from the effect's
//! [`Kind`].

use std::future::Future;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::kind::Kind;

/// A deferred computation of some [`Kind`].
///
/// # Example
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let counter = state::get::<i32>().and_then(|n| state::put(n + 1));
/// let token = CancellationToken::new();
///
/// let first = counter.run(1, &token).await.unwrap();
/// let second = counter.run(first.state, &token).await.unwrap();
/// assert_eq!(second.state, 3);
/// # });
/// ```
pub trait Effect: Send + Sync {
    /// The kind this effect belongs to.
    type Kind: Kind;

    /// The value produced on the success channel.
    type Output: Send + 'static;

    /// Run the effect.
    ///
    /// Resolves to the kind's carrier, or to [`Cancelled`](crate::cancel::Cancelled)
    /// if `cancel` fires before the run completes. Try effects report
    /// cancellation as a failure carrier instead.
    fn run(
        &self,
        input: <Self::Kind as Kind>::Input,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<<Self::Kind as Kind>::Carrier<Self::Output>>> + Send;
}

/// The input type of an effect.
pub type Input<E> = <<E as Effect>::Kind as Kind>::Input;

/// The carrier type an effect produces.
pub type Carrier<E> = <<E as Effect>::Kind as Kind>::Carrier<<E as Effect>::Output>;

/// The halt payload type of an effect.
pub type Halt<E> = <<E as Effect>::Kind as Kind>::Halt;

/// Run the body of a step under its kind's supervision.
pub(crate) fn supervised<E, F>(run: F) -> impl Future<Output = RunResult<Carrier<E>>> + Send
where
    E: Effect,
    F: Future<Output = RunResult<Carrier<E>>> + Send,
{
    <E::Kind as Kind>::supervise::<E::Output, F>(run)
}
