//! # Eddy
//!
//! Composable, lazily-executed effect values.
//!
//! An effect describes a computation without running it. Effects come in
//! nine kinds: Identity, IO, Option, Either, Try, Reader, Writer, State and
//! RWS. Every kind shares one set of operators (`map`, `and_then`, `tap`,
//! `if_then`, `catch`, `share`, ...), written once over a kind strategy,
//! and effects convert between kinds without losing information.
//!
//! ## Philosophy
//!
//! - **Describe, then run**: building an effect does no work. Running it
//!   does, and the same value can run many times with different inputs.
//! - **Short-circuit by kind**: `None`, `Left` and a failed Try stop a
//!   chain; Reader, Writer and State thread their context through it.
//! - **Cooperative cancellation**: every run takes a
//!   [`CancellationToken`] and checks it between steps.
//!
//! ## Quick Example
//!
//! ```rust
//! use eddy::effect::prelude::*;
//!
//! #[derive(Clone)]
//! struct Env {
//!     threshold: i32,
//! }
//!
//! # tokio_test::block_on(async {
//! // Reader: classify a reading against a configured threshold.
//! let classify = |reading: i32| {
//!     reader::asks(move |env: &Env| if reading > env.threshold { "high" } else { "normal" })
//! };
//!
//! let token = CancellationToken::new();
//! let env = Env { threshold: 50 };
//! assert_eq!(classify(70).run(env.clone(), &token).await, Ok("high"));
//!
//! // Writer: keep an audit trail while computing.
//! let audited = writer::tell_one("loaded".to_string())
//!     .and_then(|_| writer::tell_with(3, vec!["counted".to_string()]));
//! let result = audited.run_standalone().await.unwrap();
//! assert_eq!(result.value, 3);
//! assert_eq!(result.output, vec!["loaded", "counted"]);
//!
//! // Try: panics and errors become failures instead of unwinding.
//! let parsed = fallible::create(|| "12x".parse::<i32>()).recover(|_| fallible::success(0));
//! assert_eq!(parsed.run_standalone().await.unwrap().unwrap(), 0);
//! # });
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): emit `tracing` events for cancellation, captured
//!   panics and shared-effect caching, and enable
//!   [`instrument`](effect::EffectTracingExt::instrument).
//! - `serde`: `Serialize`/`Deserialize` for [`Either`], [`Sum`](monoid::Sum)
//!   and the result carriers.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

/// Emit a `tracing` event when the `tracing` feature is enabled; expands to
/// nothing otherwise.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)+);
    }};
}

pub(crate) use trace_event;

pub mod cancel;
pub mod effect;
pub mod either;
pub mod exception;
pub mod monoid;
pub mod result;
pub mod testing;

// Re-exports
pub use cancel::{CancellationToken, Cancelled, RunResult};
pub use effect::{Effect, EffectExt};
pub use either::Either;
pub use exception::{Exception, TryResult};
pub use monoid::{Monoid, Semigroup};
pub use result::{RwsResult, StateResult, WriterResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::effect::prelude::*;
}
