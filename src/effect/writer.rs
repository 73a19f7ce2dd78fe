//! Writer effects: values that accumulate output as they run.
//!
//! The output type is any [`Monoid`]. A chain combines outputs in run
//! order: the source's output first, then the continuation's. Use
//! [`listen`](crate::effect::EffectExt::listen) to see the output produced
//! so far and [`censor`](crate::effect::EffectExt::censor) to rewrite it.
//!
//! # Example
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let checkout = writer::tell_with(3, vec!["picked 3 items".to_string()])
//!     .and_then(|items| {
//!         writer::tell_one(format!("charged {}", items * 10)).map(move |_| items * 10)
//!     });
//!
//! let result = checkout.run_standalone().await.unwrap();
//! assert_eq!(result.value, 30);
//! assert_eq!(result.output, vec!["picked 3 items", "charged 30"]);
//! # });
//! ```

use std::future::Future;

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::combinators::{FromAsync, FromFn, Pure};
use crate::effect::convert::{Convert, DiscardOutput, IntoRws};
use crate::effect::kind::{IdentityKind, RwsKind, WriterKind};
use crate::effect::trait_def::Effect;
use crate::monoid::Monoid;
use crate::result::WriterResult;

/// A Writer effect producing `value` with empty output.
pub fn pure<W, T>(value: T) -> Pure<WriterKind<W>, T> {
    Pure::new(value)
}

/// A Writer effect that appends `output`.
pub fn tell<W>(output: W) -> impl Effect<Kind = WriterKind<W>, Output = ()>
where
    W: Monoid + Clone + Send + Sync + 'static,
{
    FromFn::new(move |()| WriterResult::new((), output.clone()))
}

/// A Writer effect over a `Vec` log that appends a single entry.
pub fn tell_one<A>(item: A) -> impl Effect<Kind = WriterKind<Vec<A>>, Output = ()>
where
    A: Clone + Send + Sync + 'static,
{
    tell(vec![item])
}

/// A Writer effect producing `value` and appending `output`.
pub fn tell_with<W, T>(value: T, output: W) -> impl Effect<Kind = WriterKind<W>, Output = T>
where
    W: Monoid + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    FromFn::new(move |()| WriterResult::new(value.clone(), output.clone()))
}

/// A Writer effect computed by `f` each time it runs.
pub fn create<W, T, F>(f: F) -> impl Effect<Kind = WriterKind<W>, Output = T>
where
    W: Monoid + Send + Sync + 'static,
    F: Fn() -> WriterResult<W, T> + Send + Sync,
    T: Send + 'static,
{
    FromFn::new(move |()| f())
}

/// A Writer effect computed by an asynchronous function.
pub fn create_async<W, T, F, Fut>(f: F) -> impl Effect<Kind = WriterKind<W>, Output = T>
where
    W: Monoid + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = WriterResult<W, T>> + Send,
    T: Send + 'static,
{
    FromAsync::new(move |()| f())
}

/// Methods specific to Writer effects with output `W`.
#[allow(async_fn_in_trait)]
pub trait WriterEffectExt<W>: Effect<Kind = WriterKind<W>> + Sized
where
    W: Monoid + Send + Sync + 'static,
{
    /// Drop the output, producing an Identity effect.
    fn discard_output(self) -> Convert<Self, DiscardOutput, IdentityKind> {
        Convert::new(self, DiscardOutput)
    }

    /// Embed into RWS; the state passes through untouched.
    fn into_rws<Env, S>(self) -> Convert<Self, IntoRws, RwsKind<Env, W, S>>
    where
        Env: Clone + Send + Sync + 'static,
        S: Clone + Send + Sync + 'static,
    {
        Convert::new(self, IntoRws)
    }

    /// Run and hand the value and the accumulated output to `on_result`.
    async fn execute_with<F>(&self, cancel: &CancellationToken, on_result: F) -> RunResult<()>
    where
        F: FnOnce(Self::Output, W),
    {
        let (value, output) = self.run((), cancel).await?.into_parts();
        on_result(value, output);
        Ok(())
    }
}

impl<W, E> WriterEffectExt<W> for E
where
    W: Monoid + Send + Sync + 'static,
    E: Effect<Kind = WriterKind<W>>,
{
}
