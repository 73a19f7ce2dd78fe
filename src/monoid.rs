//! Accumulation traits for Writer and RWS output.
//!
//! A [`Semigroup`] combines two values associatively; a [`Monoid`] adds an
//! identity element. Writer output starts from [`Monoid::empty`] and each step
//! appends its own output with [`Semigroup::combine`], so the accumulated
//! output of a chain is in execution order.
//!
//! ```rust
//! use eddy::{Monoid, Semigroup};
//!
//! let log: Vec<&str> = Monoid::empty();
//! let log = log.combine(vec!["connect"]).combine(vec!["query"]);
//! assert_eq!(log, vec!["connect", "query"]);
//! ```
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! M::empty().combine(a) == a == a.combine(M::empty())
//! ```

use std::ops::Add;

/// A type with an associative binary operation.
///
/// `combine` takes both operands by value; clone first to keep the originals.
pub trait Semigroup: Sized {
    /// Append `other` after `self`.
    fn combine(self, other: Self) -> Self;
}

/// A [`Semigroup`] with an identity element.
pub trait Monoid: Semigroup {
    /// The identity: combining with it on either side changes nothing.
    fn empty() -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl Monoid for String {
    fn empty() -> Self {
        String::new()
    }
}

impl Semigroup for () {
    fn combine(self, _other: Self) -> Self {}
}

impl Monoid for () {
    fn empty() -> Self {}
}

/// Numeric accumulation under addition.
///
/// ```rust
/// use eddy::monoid::Sum;
/// use eddy::Semigroup;
///
/// assert_eq!(Sum(2).combine(Sum(5)), Sum(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sum<T>(pub T);

impl<T: Add<Output = T>> Semigroup for Sum<T> {
    fn combine(self, other: Self) -> Self {
        Sum(self.0 + other.0)
    }
}

impl<T: Add<Output = T> + Default> Monoid for Sum<T> {
    fn empty() -> Self {
        Sum(T::default())
    }
}

macro_rules! impl_tuple_monoid {
    ($($idx:tt $T:ident),+) => {
        impl<$($T: Semigroup),+> Semigroup for ($($T,)+) {
            fn combine(self, other: Self) -> Self {
                ($(self.$idx.combine(other.$idx),)+)
            }
        }

        impl<$($T: Monoid),+> Monoid for ($($T,)+) {
            fn empty() -> Self {
                ($($T::empty(),)+)
            }
        }
    };
}

impl_tuple_monoid!(0 A, 1 B);
impl_tuple_monoid!(0 A, 1 B, 2 C);
impl_tuple_monoid!(0 A, 1 B, 2 C, 3 D);
