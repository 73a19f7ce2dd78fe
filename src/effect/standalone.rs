//! Running effects that need no input.

use crate::cancel::{CancellationToken, RunResult};
use crate::effect::kind::Kind;
use crate::effect::trait_def::{Carrier, Effect};

/// Run an effect whose kind takes no input.
///
/// Covers Identity, IO, Option, Either, Try and Writer effects, and
/// anything converted into one of them. The run uses a token that is never
/// cancelled.
///
/// ```rust
/// use eddy::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let greeting = option::some("hello").map(str::len);
/// assert_eq!(greeting.run_standalone().await, Ok(Some(5)));
/// # });
/// ```
#[allow(async_fn_in_trait)]
pub trait RunStandalone: Effect + Sized {
    /// Run with `()` as input.
    async fn run_standalone(&self) -> RunResult<Carrier<Self>>;
}

impl<E> RunStandalone for E
where
    E: Effect,
    E::Kind: Kind<Input = ()>,
{
    async fn run_standalone(&self) -> RunResult<Carrier<Self>> {
        self.run((), &CancellationToken::new()).await
    }
}
