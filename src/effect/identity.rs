//! Identity effects: deferred values with no context.
//!
//! Identity is the simplest kind. Its carrier is the bare value, and it
//! can be lifted into every other kind; see [`PlainEffectExt`].
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let total = identity::create(|| 40).map(|n| n + 2);
//! assert_eq!(total.run_standalone().await, Ok(42));
//!
//! // The same computation as a Reader that ignores its environment.
//! let as_reader = total.into_reader::<String>();
//! assert_eq!(as_reader.run("unused".into(), &CancellationToken::new()).await, Ok(42));
//! # });
//! ```

use std::future::Future;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::combinators::{FromAsync, FromFn, Pure};
use crate::effect::convert::{Convert, Lift};
use crate::effect::kind::{
    EitherKind, IdentityKind, IoKind, Kind, OptionKind, Plain, ReaderKind, RwsKind, StateKind,
    TryKind, WriterKind,
};
use crate::effect::trait_def::Effect;
use crate::monoid::Monoid;

/// An Identity effect producing `value`.
pub fn pure<T>(value: T) -> Pure<IdentityKind, T> {
    Pure::new(value)
}

/// An Identity effect computed by `f` each time it runs.
pub fn create<T, F>(f: F) -> impl Effect<Kind = IdentityKind, Output = T>
where
    F: Fn() -> T + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(move |()| f())
}

/// An Identity effect computed by an asynchronous function.
pub fn create_async<T, F, Fut>(f: F) -> impl Effect<Kind = IdentityKind, Output = T>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = T> + Send,
    T: Send + 'static,
{
    FromAsync::new(move |()| f())
}

/// Conversions and runners for value-only effects (Identity and IO).
#[allow(async_fn_in_trait)]
pub trait PlainEffectExt: Effect + Sized
where
    Self::Kind: Plain,
{
    /// Lift into any kind; the value is produced without touching the
    /// target's context.
    fn lift<K: Kind>(self) -> Convert<Self, Lift, K> {
        Convert::new(self, Lift)
    }

    /// As an Identity effect.
    fn into_identity(self) -> Convert<Self, Lift, IdentityKind> {
        self.lift()
    }

    /// As an IO effect.
    fn into_io(self) -> Convert<Self, Lift, IoKind> {
        self.lift()
    }

    /// As an Option effect that is always present.
    fn into_option(self) -> Convert<Self, Lift, OptionKind> {
        self.lift()
    }

    /// As an Either effect that is always `Right`.
    fn into_either<L: Send + 'static>(self) -> Convert<Self, Lift, EitherKind<L>> {
        self.lift()
    }

    /// As a Try effect that succeeds unless the computation panics.
    fn into_try(self) -> Convert<Self, Lift, TryKind> {
        self.lift()
    }

    /// As a Reader effect that ignores its environment.
    fn into_reader<Env>(self) -> Convert<Self, Lift, ReaderKind<Env>>
    where
        Env: Clone + Send + Sync + 'static,
    {
        self.lift()
    }

    /// As a Writer effect with empty output.
    fn into_writer<W>(self) -> Convert<Self, Lift, WriterKind<W>>
    where
        W: Monoid + Send + Sync + 'static,
    {
        self.lift()
    }

    /// As a State effect that leaves the state alone.
    fn into_state<S>(self) -> Convert<Self, Lift, StateKind<S>>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.lift()
    }

    /// As an RWS effect that leaves the state alone and writes nothing.
    fn into_rws<Env, W, S>(self) -> Convert<Self, Lift, RwsKind<Env, W, S>>
    where
        Env: Clone + Send + Sync + 'static,
        W: Monoid + Send + Sync + 'static,
        S: Clone + Send + Sync + 'static,
    {
        self.lift()
    }

    /// Run and hand the value to `on_value`.
    async fn execute_with<F>(&self, cancel: &CancellationToken, on_value: F) -> RunResult<()>
    where
        F: FnOnce(Self::Output),
    {
        let carrier = self.run((), cancel).await?;
        on_value(<Self::Kind as Plain>::into_value::<Self::Output>(carrier));
        Ok(())
    }
}

impl<E> PlainEffectExt for E
where
    E: Effect,
    E::Kind: Plain,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_is_deferred_and_rerunnable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let effect = create(move || counted.fetch_add(1, Ordering::SeqCst) + 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(effect.run_standalone().await, Ok(1));
        assert_eq!(effect.run_standalone().await, Ok(2));
    }

    #[tokio::test]
    async fn test_create_async() {
        let effect = create_async(|| async { "ready" }).map(str::len);
        assert_eq!(effect.run_standalone().await, Ok(5));
    }

    #[tokio::test]
    async fn test_lift_into_context_kinds() {
        let token = CancellationToken::new();

        let writer = pure(3).into_writer::<Vec<String>>();
        assert_eq!(writer.run_standalone().await, Ok(WriterResult::new(3, vec![])));

        let state = pure(3).into_state::<&str>();
        assert_eq!(state.run("kept", &token).await, Ok(StateResult::new("kept", 3)));

        let rws = pure(3).into_rws::<u8, Vec<u8>, i64>();
        assert_eq!(rws.run((1, -5), &token).await, Ok(RwsResult::new(3, vec![], -5)));
    }

    #[tokio::test]
    async fn test_lift_into_short_circuit_kinds() {
        assert_eq!(pure('x').into_option().run_standalone().await, Ok(Some('x')));
        assert_eq!(
            pure('x').into_either::<String>().run_standalone().await,
            Ok(Either::right('x'))
        );
        assert_eq!(pure('x').into_try().run_standalone().await, Ok(Ok('x')));
        assert_eq!(pure('x').into_io().into_identity().run_standalone().await, Ok('x'));
    }

    #[tokio::test]
    async fn test_execute_with_hands_over_value() {
        let mut seen = None;
        pure(9)
            .execute_with(&CancellationToken::new(), |v| seen = Some(v))
            .await
            .unwrap();
        assert_eq!(seen, Some(9));
    }
}
