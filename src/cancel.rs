//! Cooperative cancellation for effect runs.
//!
//! Every run receives a [`CancellationToken`]. Combinators call
//! [`checkpoint`] before a step starts and after each awaited sub-step, so a
//! cancelled token stops the chain before the next user callback executes.
//!
//! ```rust
//! use eddy::cancel::{checkpoint, Cancelled, CancellationToken};
//!
//! let token = CancellationToken::new();
//! assert_eq!(checkpoint(&token), Ok(()));
//!
//! token.cancel();
//! assert_eq!(checkpoint(&token), Err(Cancelled));
//! ```

use std::fmt;

pub use tokio_util::sync::CancellationToken;

/// The outcome of running an effect: its carrier, or [`Cancelled`].
pub type RunResult<T> = Result<T, Cancelled>;

/// Error returned when a run observes a cancelled token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect run was cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Fail with [`Cancelled`] if the token has been cancelled.
#[inline]
pub fn checkpoint(cancel: &CancellationToken) -> RunResult<()> {
    if cancel.is_cancelled() {
        crate::trace_event!(trace, "cancellation observed at checkpoint");
        Err(Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_passes_live_token() {
        let token = CancellationToken::new();
        assert_eq!(checkpoint(&token), Ok(()));
    }

    #[test]
    fn test_checkpoint_sees_parent_cancellation() {
        let parent = CancellationToken::new();
        let child = parent.child_token();
        parent.cancel();
        assert_eq!(checkpoint(&child), Err(Cancelled));
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(Cancelled.to_string(), "effect run was cancelled");
    }
}
