//! The failure payload carried by Try effects.
//!
//! An [`Exception`] is a cheap, reference-counted handle to an error. Cloning
//! it never copies the underlying error, so a failure raised by user code
//! reaches the caller as the very same object:
//!
//! ```rust
//! use eddy::Exception;
//!
//! let original = Exception::msg("disk full");
//! let propagated = original.clone();
//! assert!(propagated.ptr_eq(&original));
//! assert_eq!(propagated.to_string(), "disk full");
//! ```
//!
//! Panics captured by Try effects and cancellations observed inside them are
//! also represented as exceptions, see [`Exception::is_panic`] and
//! [`Exception::is_cancellation`].

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::cancel::Cancelled;

/// The result carrier of Try effects.
pub type TryResult<T> = Result<T, Exception>;

/// A shared, immutable error handle.
///
/// Equality is identity: two exceptions are equal only when they point at
/// the same error object.
#[derive(Clone)]
pub struct Exception {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl Exception {
    /// Wrap an error value.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Exception {
            inner: Arc::new(error),
        }
    }

    /// Create an exception from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Exception::new(Message(message.into()))
    }

    /// The exception a Try effect reports when its run is cancelled.
    pub fn cancelled() -> Self {
        Exception::new(Cancelled)
    }

    /// Build an exception from a panic payload caught with `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "panic with a non-string payload".to_string()
        };
        Exception::new(Panicked(message))
    }

    /// Whether this failure stands for a cancelled run.
    pub fn is_cancellation(&self) -> bool {
        self.inner.is::<Cancelled>()
    }

    /// Whether this failure was produced by a captured panic.
    pub fn is_panic(&self) -> bool {
        self.inner.is::<Panicked>()
    }

    /// Attempt to view the underlying error as a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// The underlying error.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    /// Whether both handles refer to the same error object.
    pub fn ptr_eq(&self, other: &Exception) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<E> From<E> for Exception
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Exception::new(error)
    }
}

impl PartialEq for Exception {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Exception").field(&self.inner).finish()
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}

#[derive(Debug)]
struct Panicked(String);

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.0)
    }
}

impl StdError for Panicked {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct NotFound(u32);

    impl fmt::Display for NotFound {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "record {} not found", self.0)
        }
    }

    impl StdError for NotFound {}

    #[test]
    fn test_equality_is_identity() {
        let a = Exception::msg("boom");
        let b = Exception::msg("boom");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_downcast_keeps_concrete_error() {
        let ex: Exception = NotFound(7).into();
        assert_eq!(ex.downcast_ref::<NotFound>(), Some(&NotFound(7)));
        assert_eq!(ex.to_string(), "record 7 not found");
        assert!(!ex.is_cancellation());
    }

    #[test]
    fn test_cancelled_is_distinguishable() {
        assert!(Exception::cancelled().is_cancellation());
        assert!(Exception::from(Cancelled).is_cancellation());
        assert!(!Exception::msg("cancelled").is_cancellation());
    }

    #[test]
    fn test_from_panic_payloads() {
        let ex = Exception::from_panic(Box::new("static text"));
        assert!(ex.is_panic());
        assert_eq!(ex.to_string(), "panicked: static text");

        let ex = Exception::from_panic(Box::new(String::from("owned text")));
        assert_eq!(ex.to_string(), "panicked: owned text");

        let ex = Exception::from_panic(Box::new(42_u8));
        assert_eq!(ex.to_string(), "panicked: panic with a non-string payload");
    }
}
