//! Testing utilities for code built on effects.
//!
//! Laziness and short-circuiting are easiest to check by counting how often
//! a callback ran; [`CallCounter`] does that across clones and tasks. The
//! assertion macros unpack carriers and panic with a readable message when
//! the carrier is on the wrong side.
//!
//! # Examples
//!
//! ```rust
//! use eddy::effect::prelude::*;
//! use eddy::testing::CallCounter;
//! use eddy::{assert_none, assert_some};
//!
//! # tokio_test::block_on(async {
//! let calls = CallCounter::new();
//! let counted = calls.clone();
//! let lookup = option::none::<u32>().map(move |n| {
//!     counted.hit();
//!     n + 1
//! });
//!
//! assert_none!(lookup.run_standalone().await.unwrap());
//! assert_eq!(calls.count(), 0);
//!
//! let value = assert_some!(option::some(7).run_standalone().await.unwrap());
//! assert_eq!(value, 7);
//! # });
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A shared counter of callback invocations.
///
/// Clones share the count, so a clone can move into a closure while the
/// test keeps the original for assertions.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Arc<AtomicUsize>,
}

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call and return the number of calls so far.
    pub fn hit(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of calls recorded.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Set the count back to zero.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

/// Assert that an Option carrier is `Some`, evaluating to the value.
///
/// # Example
///
/// ```rust
/// use eddy::assert_some;
///
/// let value = assert_some!(Some(3));
/// assert_eq!(value, 3);
/// ```
#[macro_export]
macro_rules! assert_some {
    ($carrier:expr) => {
        match $carrier {
            ::std::option::Option::Some(value) => value,
            ::std::option::Option::None => panic!("Expected Some, got None"),
        }
    };
}

/// Assert that an Option carrier is `None`.
#[macro_export]
macro_rules! assert_none {
    ($carrier:expr) => {
        match $carrier {
            ::std::option::Option::None => {}
            ::std::option::Option::Some(value) => {
                panic!("Expected None, got Some: {:?}", value);
            }
        }
    };
}

/// Assert that an Either carrier is `Right`, evaluating to the value.
///
/// # Example
///
/// ```rust
/// use eddy::{assert_right, Either};
///
/// let value = assert_right!(Either::<String, i32>::right(8));
/// assert_eq!(value, 8);
/// ```
#[macro_export]
macro_rules! assert_right {
    ($carrier:expr) => {
        match $carrier {
            $crate::Either::Right(value) => value,
            $crate::Either::Left(left) => {
                panic!("Expected Right, got Left: {:?}", left);
            }
        }
    };
}

/// Assert that an Either carrier is `Left`, evaluating to the `Left` value.
#[macro_export]
macro_rules! assert_left {
    ($carrier:expr) => {
        match $carrier {
            $crate::Either::Left(left) => left,
            $crate::Either::Right(value) => {
                panic!("Expected Left, got Right: {:?}", value);
            }
        }
    };
}

/// Assert that a Try carrier succeeded, evaluating to the value.
///
/// # Example
///
/// ```rust
/// use eddy::{assert_success, TryResult};
///
/// let carrier: TryResult<&str> = Ok("ready");
/// assert_eq!(assert_success!(carrier), "ready");
/// ```
#[macro_export]
macro_rules! assert_success {
    ($carrier:expr) => {
        match $carrier {
            ::std::result::Result::Ok(value) => value,
            ::std::result::Result::Err(exception) => {
                panic!("Expected Success, got Failure: {}", exception);
            }
        }
    };
}

/// Assert that a Try carrier failed, evaluating to the exception.
///
/// # Example
///
/// ```rust
/// use eddy::{assert_failure, Exception, TryResult};
///
/// let carrier: TryResult<i32> = Err(Exception::msg("disk full"));
/// let exception = assert_failure!(carrier);
/// assert_eq!(exception.to_string(), "disk full");
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($carrier:expr) => {
        match $carrier {
            ::std::result::Result::Err(exception) => exception,
            ::std::result::Result::Ok(value) => {
                panic!("Expected Failure, got Success: {:?}", value);
            }
        }
    };
}
