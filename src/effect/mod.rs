//! Lazily-executed, re-runnable effects of nine kinds.
//!
//! An effect is a value describing a computation. Building one does no
//! work; awaiting [`Effect::run`] does, and the same value can be run again
//! with a different input. What a run takes and produces depends on the
//! effect's [`Kind`](kind::Kind):
//!
//! | module        | kind       | run input  | run produces          |
//! |---------------|------------|------------|-----------------------|
//! | [`identity`]  | Identity   | `()`       | `T`                   |
//! | [`io`]        | IO         | `()`       | `T`                   |
//! | [`option`]    | Option     | `()`       | `Option<T>`           |
//! | [`either`]    | Either     | `()`       | `Either<L, T>`        |
//! | [`fallible`]  | Try        | `()`       | `TryResult<T>`        |
//! | [`reader`]    | Reader     | `Env`      | `T`                   |
//! | [`writer`]    | Writer     | `()`       | `WriterResult<W, T>`  |
//! | [`state`]     | State      | `S`        | `StateResult<S, T>`   |
//! | [`rws`]       | RWS        | `(Env, S)` | `RwsResult<W, S, T>`  |
//!
//! # One Algebra for Every Kind
//!
//! [`EffectExt`] gives every effect the same operators: `map`, `and_then`,
//! the `tap` family, `if_then`, `catch`, `or_else`, `share` and `boxed`.
//! They are written once; the kind decides how a chain threads its context.
//! Short-circuiting kinds stop at `None`, `Left` or a failed Try; the
//! context kinds pass the environment along, append outputs and thread
//! state.
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let found = option::some(20).map(|x| x + 1).and_then(|x| option::some(x * 2));
//! assert_eq!(found.run_standalone().await, Ok(Some(42)));
//!
//! let counted = state::get::<u32>().and_then(|n| state::put(n + 1)).map(|()| "done");
//! let result = counted.run(41, &CancellationToken::new()).await.unwrap();
//! assert_eq!((result.state, result.value), (42, "done"));
//! # });
//! ```
//!
//! # Kind-Specific Operations
//!
//! Each kind module holds its constructors and an extension trait with the
//! operations that only make sense there, such as
//! [`OptionEffectExt::filter`](option::OptionEffectExt::filter) or
//! [`ReaderEffectExt::local`](reader::ReaderEffectExt::local). Conversions
//! between kinds live on the same traits; see [`convert`].
//!
//! # Cancellation
//!
//! Every run takes a [`CancellationToken`](crate::cancel::CancellationToken).
//! Each step checks it before and after the work it wraps, and a cancelled
//! run resolves to `Err(Cancelled)`. Try effects are the exception: they
//! report cancellation as a failure carrier.
//!
//! # When to Use Boxing
//!
//! Combinators return concrete types, so no allocation happens per step.
//! Box with [`EffectExt::boxed`] to store different effects together,
//! return different effects from match arms, or write recursive effects.
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! fn lookup(cached: bool) -> BoxedEffect<OptionKind, &'static str> {
//!     if cached {
//!         option::some("from cache").boxed()
//!     } else {
//!         option::create(|| Some("from origin")).boxed()
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! assert_eq!(lookup(false).run_standalone().await, Ok(Some("from origin")));
//! # });
//! ```

pub mod boxed;
pub mod combinators;
pub mod convert;
pub mod either;
pub mod ext;
pub mod fallible;
pub mod identity;
pub mod io;
pub mod kind;
pub mod option;
pub mod prelude;
pub mod reader;
pub mod rws;
pub mod standalone;
pub mod state;
#[cfg(feature = "tracing")]
pub mod tracing;
mod trait_def;
pub mod writer;

// Re-export core trait and its type aliases
pub use trait_def::{Carrier, Effect, Halt, Input};

// Re-export extension traits
pub use either::EitherEffectExt;
pub use ext::EffectExt;
pub use fallible::TryEffectExt;
pub use identity::PlainEffectExt;
pub use option::OptionEffectExt;
pub use reader::ReaderEffectExt;
pub use rws::RwsEffectExt;
pub use standalone::RunStandalone;
pub use state::StateEffectExt;
pub use writer::WriterEffectExt;

// Re-export boxed types
pub use boxed::BoxedEffect;

// Re-export kinds
pub use kind::{
    EitherKind, IdentityKind, IoKind, Kind, OptionKind, ReaderKind, RwsKind, StateKind, TryKind,
    WriterKind,
};

// Re-export the static branch constructors
pub use combinators::{choose, choose_async};

// Re-export tracing (when tracing feature is enabled)
#[cfg(feature = "tracing")]
pub use self::tracing::{EffectTracingExt, Instrument};
