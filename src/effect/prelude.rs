//! Prelude module for convenient imports.
//!
//! One glob import brings in the core traits, every kind's extension
//! trait, the kind modules with their constructors, and the data types
//! runs produce.
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let effect = fallible::success(41)
//!     .map(|x| x + 1)
//!     .to_either(|e| e.to_string());
//!
//! assert_eq!(effect.run_standalone().await, Ok(Either::right(42)));
//! # });
//! ```
//!
//! Constructors stay qualified by their kind module (`option::some`,
//! `state::get`), since every kind has its own `pure` and `create`.

// Traits
pub use crate::effect::ext::EffectExt;
pub use crate::effect::standalone::RunStandalone;
pub use crate::effect::trait_def::Effect;
pub use crate::effect::{
    EitherEffectExt, OptionEffectExt, PlainEffectExt, ReaderEffectExt, RwsEffectExt,
    StateEffectExt, TryEffectExt, WriterEffectExt,
};

#[cfg(feature = "tracing")]
pub use crate::effect::tracing::EffectTracingExt;

// Kind modules
pub use crate::effect::{either, fallible, identity, io, option, reader, rws, state, writer};

// Kinds, for naming effect types
pub use crate::effect::kind::{
    EitherKind, IdentityKind, IoKind, Kind, OptionKind, ReaderKind, RwsKind, StateKind, TryKind,
    WriterKind,
};

// Branching and boxing
pub use crate::effect::boxed::BoxedEffect;
pub use crate::effect::combinators::{choose, choose_async};

// Cancellation
pub use crate::cancel::{CancellationToken, Cancelled, RunResult};

// Data types
pub use crate::either::Either;
pub use crate::exception::{Exception, TryResult};
pub use crate::monoid::{Monoid, Semigroup};
pub use crate::result::{RwsResult, StateResult, WriterResult};
