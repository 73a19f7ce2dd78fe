//! Concrete combinator types.
//!
//! Every combinator is written once, generically over the effect's
//! [`Kind`](crate::effect::kind::Kind). The methods on
//! [`EffectExt`](crate::effect::EffectExt) and the per-kind extension traits
//! return these types; most users never name them.

mod and_then;
mod branch;
mod filter;
mod from_fn;
mod listen;
mod map;
mod merge;
mod or_else;
mod pure;
mod share;
mod tap;
mod zip;

pub use and_then::{AndThen, AndThenWith};
pub use branch::{choose, choose_async, Choose, ChooseAsync, IfThen, IfThenAsync};
pub use filter::Filter;
pub use from_fn::{FromAsync, FromFn};
pub use listen::{Censor, Listen};
pub use map::{Map, MapAsync};
pub use merge::Merge;
pub use or_else::{Catch, OrElse};
pub use pure::{Fail, Pure};
pub use share::Shared;
pub use tap::{Tap, TapHalt, TapNone, TapOutput, TapState, TapValue};
pub use zip::ZipWith;
