//! Conditional combinators.
//!
//! Instance forms ([`IfThen`], [`IfThenAsync`]) run the source first and
//! decide from what it produced. Static forms ([`Choose`], [`ChooseAsync`])
//! decide before running anything and then run only the chosen effect.

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// Runs the source, then replaces its carrier with the alternate's when
/// the predicate holds. The alternate runs with the source's input.
///
/// Created by [`EffectExt::if_then`](crate::effect::EffectExt::if_then).
pub struct IfThen<E, P, A> {
    pub(crate) inner: E,
    pub(crate) predicate: P,
    pub(crate) alternate: A,
}

impl<E, P, A> std::fmt::Debug for IfThen<E, P, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IfThen")
            .field("inner", &"<effect>")
            .field("predicate", &"<function>")
            .field("alternate", &"<effect>")
            .finish()
    }
}

impl<E, P, A> Effect for IfThen<E, P, A>
where
    E: Effect,
    P: Fn(&Carrier<E>) -> bool + Send + Sync,
    A: Effect<Kind = E::Kind, Output = E::Output>,
{
    type Kind = E::Kind;
    type Output = E::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = self.inner.run(input.clone(), cancel).await?;
            checkpoint(cancel)?;
            if (self.predicate)(&carrier) {
                self.alternate.run(input, cancel).await
            } else {
                Ok(carrier)
            }
        })
    }
}

/// [`IfThen`] with an asynchronous predicate.
///
/// The predicate borrows the carrier only to build its future; the future
/// itself must own whatever it needs.
pub struct IfThenAsync<E, P, A> {
    pub(crate) inner: E,
    pub(crate) predicate: P,
    pub(crate) alternate: A,
}

impl<E, P, A> std::fmt::Debug for IfThenAsync<E, P, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IfThenAsync")
            .field("inner", &"<effect>")
            .field("predicate", &"<function>")
            .field("alternate", &"<effect>")
            .finish()
    }
}

impl<E, P, Fut, A> Effect for IfThenAsync<E, P, A>
where
    E: Effect,
    P: Fn(&Carrier<E>) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
    A: Effect<Kind = E::Kind, Output = E::Output>,
{
    type Kind = E::Kind;
    type Output = E::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = self.inner.run(input.clone(), cancel).await?;
            checkpoint(cancel)?;
            let replace = (self.predicate)(&carrier).await;
            checkpoint(cancel)?;
            if replace {
                self.alternate.run(input, cancel).await
            } else {
                Ok(carrier)
            }
        })
    }
}

/// Evaluates a condition that does not depend on any result, then runs
/// exactly one of two effects.
///
/// Created by [`choose`].
pub struct Choose<C, A, B> {
    pub(crate) condition: C,
    pub(crate) when_true: A,
    pub(crate) when_false: B,
}

impl<C, A, B> std::fmt::Debug for Choose<C, A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Choose")
            .field("condition", &"<function>")
            .field("when_true", &"<effect>")
            .field("when_false", &"<effect>")
            .finish()
    }
}

impl<C, A, B> Effect for Choose<C, A, B>
where
    C: Fn() -> bool + Send + Sync,
    A: Effect,
    B: Effect<Kind = A::Kind, Output = A::Output>,
{
    type Kind = A::Kind;
    type Output = A::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            if (self.condition)() {
                self.when_true.run(input, cancel).await
            } else {
                self.when_false.run(input, cancel).await
            }
        })
    }
}

/// [`Choose`] with an asynchronous condition.
///
/// Created by [`choose_async`].
pub struct ChooseAsync<C, A, B> {
    pub(crate) condition: C,
    pub(crate) when_true: A,
    pub(crate) when_false: B,
}

impl<C, A, B> std::fmt::Debug for ChooseAsync<C, A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChooseAsync")
            .field("condition", &"<function>")
            .field("when_true", &"<effect>")
            .field("when_false", &"<effect>")
            .finish()
    }
}

impl<C, Fut, A, B> Effect for ChooseAsync<C, A, B>
where
    C: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
    A: Effect,
    B: Effect<Kind = A::Kind, Output = A::Output>,
{
    type Kind = A::Kind;
    type Output = A::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let pick_first = (self.condition)().await;
            checkpoint(cancel)?;
            if pick_first {
                self.when_true.run(input, cancel).await
            } else {
                self.when_false.run(input, cancel).await
            }
        })
    }
}

/// Run `when_true` if `condition()` holds, `when_false` otherwise.
///
/// Neither effect runs before the condition is evaluated, and the one not
/// chosen never runs.
///
/// # Example
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let verbose = false;
/// let effect = choose(move || verbose, option::some("loud"), option::some("quiet"));
/// assert_eq!(effect.run_standalone().await, Ok(Some("quiet")));
/// # });
/// ```
pub fn choose<C, A, B>(condition: C, when_true: A, when_false: B) -> Choose<C, A, B>
where
    C: Fn() -> bool + Send + Sync,
    A: Effect,
    B: Effect<Kind = A::Kind, Output = A::Output>,
{
    Choose {
        condition,
        when_true,
        when_false,
    }
}

/// [`choose`] with an asynchronous condition.
pub fn choose_async<C, Fut, A, B>(condition: C, when_true: A, when_false: B) -> ChooseAsync<C, A, B>
where
    C: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
    A: Effect,
    B: Effect<Kind = A::Kind, Output = A::Output>,
{
    ChooseAsync {
        condition,
        when_true,
        when_false,
    }
}
