//! Output combinators for Writer and RWS effects.

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::{Accumulates, Kind};
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

/// Pairs the value with the output its run accumulated. The output stays in
/// the carrier as well.
///
/// # Example
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = writer::tell_one::<&str>("loaded").map(|_| 3).listen();
/// let result = effect.run_standalone().await.unwrap();
/// assert_eq!(result.value, (3, vec!["loaded"]));
/// assert_eq!(result.output, vec!["loaded"]);
/// # });
/// ```
pub struct Listen<E> {
    pub(crate) inner: E,
}

impl<E> std::fmt::Debug for Listen<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listen")
            .field("inner", &"<effect>")
            .finish()
    }
}

impl<E> Effect for Listen<E>
where
    E: Effect,
    E::Kind: Accumulates,
    <E::Kind as Accumulates>::Log: Clone,
{
    type Kind = E::Kind;
    type Output = (E::Output, <E::Kind as Accumulates>::Log);

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = self.inner.run(input, cancel).await?;
            checkpoint(cancel)?;
            let log = <E::Kind as Accumulates>::output::<E::Output>(&carrier).clone();
            Ok(<E::Kind as Kind>::map_carrier::<E::Output, Self::Output, _>(
                carrier,
                |value| (value, log),
            ))
        })
    }
}

/// Rewrites the accumulated output after the inner effect completes.
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = writer::tell_one(String::from("debug: cache miss"))
///     .and_then(|_| writer::tell_one(String::from("info: served")))
///     .censor(|lines| lines.into_iter().filter(|l| !l.starts_with("debug")).collect());
///
/// let result = effect.run_standalone().await.unwrap();
/// assert_eq!(result.output, vec!["info: served".to_string()]);
/// # });
/// ```
pub struct Censor<E, F> {
    pub(crate) inner: E,
    pub(crate) f: F,
}

impl<E, F> std::fmt::Debug for Censor<E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Censor")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<E, F> Effect for Censor<E, F>
where
    E: Effect,
    E::Kind: Accumulates,
    F: Fn(<E::Kind as Accumulates>::Log) -> <E::Kind as Accumulates>::Log + Send + Sync,
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
            let carrier = self.inner.run(input, cancel).await?;
            checkpoint(cancel)?;
            Ok(<E::Kind as Accumulates>::rewrite::<E::Output, _>(carrier, &self.f))
        })
    }
}
