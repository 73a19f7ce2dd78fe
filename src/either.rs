//! The two-channel carrier used by Either effects.
//!
//! `Either<L, R>` holds exactly one of a `Left` or a `Right` value. The
//! carrier is right-biased: `Right` is the success channel, so [`Either::map`]
//! and [`Either::and_then`] act on it and leave a `Left` untouched.
//!
//! ```rust
//! use eddy::Either;
//!
//! fn parse_port(raw: &str) -> Either<String, u16> {
//!     match raw.parse() {
//!         Ok(port) => Either::right(port),
//!         Err(_) => Either::left(format!("not a port: {raw}")),
//!     }
//! }
//!
//! assert_eq!(parse_port("8080").map(|p| p + 1), Either::right(8081));
//! assert!(parse_port("http").is_left());
//! ```

/// A value that is either `Left(L)` or `Right(R)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The alternate (failure) channel.
    Left(L),
    /// The success channel.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Build a `Left`.
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Build a `Right`.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// `true` for `Left`.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// `true` for `Right`.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Borrow the left value, if this is a `Left`.
    #[inline]
    pub fn left_value(&self) -> Option<&L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Borrow the right value, if this is a `Right`.
    #[inline]
    pub fn right_value(&self) -> Option<&R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Take the left value, dropping a `Right`.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Take the right value, dropping a `Left`.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Transform the right value.
    ///
    /// ```rust
    /// use eddy::Either;
    ///
    /// let left: Either<&str, i32> = Either::left("missing");
    /// assert_eq!(left.map(|x| x * 2), Either::left("missing"));
    /// ```
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transform the left value.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Continue with `f` on a `Right`; a `Left` passes through.
    #[inline]
    pub fn and_then<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Either<L, R2>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r),
        }
    }

    /// Collapse both channels into one value.
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    /// Exchange the channels.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// `Right` becomes `Ok`, `Left` becomes `Err`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_channel_holds() {
        let left: Either<i32, &str> = Either::left(1);
        let right: Either<i32, &str> = Either::right("ok");

        assert!(left.is_left() && !left.is_right());
        assert!(right.is_right() && !right.is_left());
        assert_eq!(left.left_value(), Some(&1));
        assert_eq!(left.right_value(), None);
        assert_eq!(right.right_value(), Some(&"ok"));
    }

    #[test]
    fn test_map_is_right_biased() {
        let mut calls = 0;
        let left: Either<i32, i32> = Either::left(5);
        let mapped = left.map(|x| {
            calls += 1;
            x + 1
        });
        assert_eq!(mapped, Either::left(5));
        assert_eq!(calls, 0);

        assert_eq!(Either::<i32, i32>::left(5).map_left(|x| x * 10), Either::left(50));
    }

    #[test]
    fn test_and_then_and_fold() {
        let halve = |x: i32| {
            if x % 2 == 0 {
                Either::right(x / 2)
            } else {
                Either::left(format!("{x} is odd"))
            }
        };
        assert_eq!(Either::right(8).and_then(halve), Either::right(4));
        assert_eq!(
            Either::right(7)
                .and_then(halve)
                .fold(|e| e, |v| v.to_string()),
            "7 is odd"
        );
    }

    #[test]
    fn test_result_conversions() {
        let e: Either<&str, i32> = Ok(3).into();
        assert_eq!(e, Either::right(3));
        assert_eq!(Either::<&str, i32>::left("bad").into_result(), Err("bad"));
        assert_eq!(Either::<&str, i32>::left("bad").swap(), Either::right("bad"));
    }
}
