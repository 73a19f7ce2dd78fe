//! Kind strategies: how one generic combinator core serves nine effect kinds.
//!
//! Every effect belongs to a [`Kind`]. The kind fixes three things:
//!
//! - the **input** a run receives (`()`, an environment, a state, or both),
//! - the **carrier** a run produces (`T`, `Option<T>`, `StateResult<S, T>`, ...),
//! - how a carrier splits into a value plus a **trace** of context, or into a
//!   **halt** payload that short-circuits the rest of a chain.
//!
//! Combinators never inspect carriers directly. They call
//! [`Kind::decompose`] to get at the value, [`Kind::advance`] to derive the
//! input of the next step, and [`Kind::merge`] / [`Kind::recompose`] to
//! rebuild the carrier. For example bind is, for every kind:
//!
//! ```text
//! run first with input            -> carrier1
//! decompose carrier1              -> Halt(h)        => halt(h)
//!                                 -> Continue(v, t1)
//! run f(v) with advance(input, t1) -> carrier2
//! follow(t1, carrier2)            -> carrier
//! ```
//!
//! | kind      | input      | carrier                | trace     | halt        |
//! |-----------|------------|------------------------|-----------|-------------|
//! | Identity  | `()`       | `T`                    | `()`      | `Infallible`|
//! | IO        | `()`       | `T`                    | `()`      | `Infallible`|
//! | Option    | `()`       | `Option<T>`            | `()`      | `()`        |
//! | Either    | `()`       | `Either<L, T>`         | `()`      | `L`         |
//! | Try       | `()`       | `TryResult<T>`         | `()`      | `Exception` |
//! | Reader    | `Env`      | `T`                    | `()`      | `Infallible`|
//! | Writer    | `()`       | `WriterResult<W, T>`   | `W`       | `Infallible`|
//! | State     | `S`        | `StateResult<S, T>`    | `S`       | `Infallible`|
//! | RWS       | `(Env, S)` | `RwsResult<W, S, T>`   | `(W, S)`  | `Infallible`|

use std::convert::Infallible;
use std::future::Future;
use std::marker::PhantomData;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::cancel::{Cancelled, RunResult};
use crate::either::Either;
use crate::exception::{Exception, TryResult};
use crate::monoid::Monoid;
use crate::result::{RwsResult, StateResult, WriterResult};

/// A carrier split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T, Trace, Halt> {
    /// The step produced a value; keep going.
    Continue(T, Trace),
    /// The step short-circuited.
    Halt(Halt),
}

/// The strategy describing one effect kind.
///
/// Implemented by zero-sized marker types such as [`OptionKind`] and
/// [`StateKind`]. Most users never call these methods; they exist so that
/// combinators can be written once.
pub trait Kind: Send + Sync + 'static {
    /// What a run receives.
    type Input: Clone + Send + Sync + 'static;
    /// What a run produces for a value of type `T`.
    type Carrier<T: Send + 'static>: Send + 'static;
    /// Context produced next to a value (output, state).
    type Trace: Send + 'static;
    /// Payload of a short-circuit.
    type Halt: Send + 'static;

    /// Kind name used in log events.
    const NAME: &'static str;

    /// The trace of a step that did not touch the context.
    fn origin(input: &Self::Input) -> Self::Trace;

    /// Split a carrier.
    fn decompose<T: Send + 'static>(carrier: Self::Carrier<T>) -> Step<T, Self::Trace, Self::Halt>;

    /// Rebuild a carrier from a value and its trace.
    fn recompose<T: Send + 'static>(value: T, trace: Self::Trace) -> Self::Carrier<T>;

    /// Build a short-circuited carrier.
    fn halt<T: Send + 'static>(halt: Self::Halt) -> Self::Carrier<T>;

    /// The input of the step that follows one which produced `trace`.
    fn advance(input: &Self::Input, trace: &Self::Trace) -> Self::Input;

    /// Combine the traces of two consecutive steps.
    fn merge(first: Self::Trace, second: Self::Trace) -> Self::Trace;

    /// Borrow the value of a carrier that continues.
    fn value<T: Send + 'static>(carrier: &Self::Carrier<T>) -> Option<&T>;

    /// Borrow the halt payload of a carrier that short-circuited.
    fn halted<T: Send + 'static>(carrier: &Self::Carrier<T>) -> Option<&Self::Halt>;

    /// A carrier holding `value` produced without touching the context.
    fn pure<T: Send + 'static>(value: T, input: &Self::Input) -> Self::Carrier<T> {
        Self::recompose(value, Self::origin(input))
    }

    /// Prefix the trace of an earlier step onto a later carrier.
    fn follow<T: Send + 'static>(
        first: Self::Trace,
        carrier: Self::Carrier<T>,
    ) -> Self::Carrier<T> {
        match Self::decompose::<T>(carrier) {
            Step::Continue(value, second) => Self::recompose(value, Self::merge(first, second)),
            Step::Halt(halt) => Self::halt::<T>(halt),
        }
    }

    /// Apply `f` to the value of a carrier, keeping its trace.
    fn map_carrier<T, U, F>(carrier: Self::Carrier<T>, f: F) -> Self::Carrier<U>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnOnce(T) -> U,
    {
        match Self::decompose::<T>(carrier) {
            Step::Continue(value, trace) => Self::recompose(f(value), trace),
            Step::Halt(halt) => Self::halt::<U>(halt),
        }
    }

    /// Wrap the future of one step.
    ///
    /// Kinds that capture failures (Try) turn panics and cancellation into
    /// carriers here. The default passes the future through untouched.
    fn supervise<T, F>(run: F) -> impl Future<Output = RunResult<Self::Carrier<T>>> + Send
    where
        T: Send + 'static,
        F: Future<Output = RunResult<Self::Carrier<T>>> + Send,
    {
        run
    }

    /// Whether a produced carrier may be memoized by `share`.
    fn cacheable<T: Send + 'static>(_carrier: &Self::Carrier<T>) -> bool {
        true
    }
}

/// Kinds whose carrier is the bare value and whose input is `()`.
pub trait Plain: Kind<Input = (), Trace = ()> {
    /// Unwrap a carrier into its value.
    fn into_value<T: Send + 'static>(carrier: Self::Carrier<T>) -> T;
}

/// Kinds that accumulate monoidal output (Writer, RWS).
pub trait Accumulates: Kind {
    /// The accumulated output type.
    type Log: Monoid + Send + Sync + 'static;

    /// Borrow the output of a carrier.
    fn output<T: Send + 'static>(carrier: &Self::Carrier<T>) -> &Self::Log;

    /// Rewrite the output of a carrier.
    fn rewrite<T, F>(carrier: Self::Carrier<T>, f: F) -> Self::Carrier<T>
    where
        T: Send + 'static,
        F: FnOnce(Self::Log) -> Self::Log;
}

/// Kinds that thread a state (State, RWS).
pub trait Stateful: Kind {
    /// The threaded state type.
    type State: Clone + Send + Sync + 'static;

    /// Borrow the state a carrier reports.
    fn state<T: Send + 'static>(carrier: &Self::Carrier<T>) -> &Self::State;
}

macro_rules! value_kind {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Kind for $name {
            type Input = ();
            type Carrier<T: Send + 'static> = T;
            type Trace = ();
            type Halt = Infallible;

            const NAME: &'static str = $label;

            fn origin(_input: &()) {}

            fn decompose<T: Send + 'static>(carrier: T) -> Step<T, (), Infallible> {
                Step::Continue(carrier, ())
            }

            fn recompose<T: Send + 'static>(value: T, _trace: ()) -> T {
                value
            }

            fn halt<T: Send + 'static>(halt: Infallible) -> T {
                match halt {}
            }

            fn advance(_input: &(), _trace: &()) {}

            fn merge(_first: (), _second: ()) {}

            fn value<T: Send + 'static>(carrier: &T) -> Option<&T> {
                Some(carrier)
            }

            fn halted<T: Send + 'static>(_carrier: &T) -> Option<&Infallible> {
                None
            }
        }

        impl Plain for $name {
            fn into_value<T: Send + 'static>(carrier: T) -> T {
                carrier
            }
        }
    };
}

value_kind!(
    /// Pure values with no context.
    IdentityKind,
    "identity"
);

value_kind!(
    /// Values produced by side-effecting computations.
    IoKind,
    "io"
);

/// Present-or-absent values. `None` short-circuits.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionKind;

impl Kind for OptionKind {
    type Input = ();
    type Carrier<T: Send + 'static> = Option<T>;
    type Trace = ();
    type Halt = ();

    const NAME: &'static str = "option";

    fn origin(_input: &()) {}

    fn decompose<T: Send + 'static>(carrier: Option<T>) -> Step<T, (), ()> {
        match carrier {
            Some(value) => Step::Continue(value, ()),
            None => Step::Halt(()),
        }
    }

    fn recompose<T: Send + 'static>(value: T, _trace: ()) -> Option<T> {
        Some(value)
    }

    fn halt<T: Send + 'static>(_halt: ()) -> Option<T> {
        None
    }

    fn advance(_input: &(), _trace: &()) {}

    fn merge(_first: (), _second: ()) {}

    fn value<T: Send + 'static>(carrier: &Option<T>) -> Option<&T> {
        carrier.as_ref()
    }

    fn halted<T: Send + 'static>(carrier: &Option<T>) -> Option<&()> {
        match carrier {
            Some(_) => None,
            None => Some(&()),
        }
    }
}

/// Two-channel values with a typed `Left` that short-circuits.
pub struct EitherKind<L>(PhantomData<fn() -> L>);

impl<L: Send + 'static> Kind for EitherKind<L> {
    type Input = ();
    type Carrier<T: Send + 'static> = Either<L, T>;
    type Trace = ();
    type Halt = L;

    const NAME: &'static str = "either";

    fn origin(_input: &()) {}

    fn decompose<T: Send + 'static>(carrier: Either<L, T>) -> Step<T, (), L> {
        match carrier {
            Either::Right(value) => Step::Continue(value, ()),
            Either::Left(left) => Step::Halt(left),
        }
    }

    fn recompose<T: Send + 'static>(value: T, _trace: ()) -> Either<L, T> {
        Either::Right(value)
    }

    fn halt<T: Send + 'static>(halt: L) -> Either<L, T> {
        Either::Left(halt)
    }

    fn advance(_input: &(), _trace: &()) {}

    fn merge(_first: (), _second: ()) {}

    fn value<T: Send + 'static>(carrier: &Either<L, T>) -> Option<&T> {
        carrier.right_value()
    }

    fn halted<T: Send + 'static>(carrier: &Either<L, T>) -> Option<&L> {
        carrier.left_value()
    }
}

/// Values whose computation may throw.
///
/// Panics raised while a Try step runs, and cancellation observed inside it,
/// come back as `Err(Exception)` carriers instead of unwinding or failing the
/// run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TryKind;

impl Kind for TryKind {
    type Input = ();
    type Carrier<T: Send + 'static> = TryResult<T>;
    type Trace = ();
    type Halt = Exception;

    const NAME: &'static str = "try";

    fn origin(_input: &()) {}

    fn decompose<T: Send + 'static>(carrier: TryResult<T>) -> Step<T, (), Exception> {
        match carrier {
            Ok(value) => Step::Continue(value, ()),
            Err(exception) => Step::Halt(exception),
        }
    }

    fn recompose<T: Send + 'static>(value: T, _trace: ()) -> TryResult<T> {
        Ok(value)
    }

    fn halt<T: Send + 'static>(halt: Exception) -> TryResult<T> {
        Err(halt)
    }

    fn advance(_input: &(), _trace: &()) {}

    fn merge(_first: (), _second: ()) {}

    fn value<T: Send + 'static>(carrier: &TryResult<T>) -> Option<&T> {
        carrier.as_ref().ok()
    }

    fn halted<T: Send + 'static>(carrier: &TryResult<T>) -> Option<&Exception> {
        carrier.as_ref().err()
    }

    fn supervise<T, F>(run: F) -> impl Future<Output = RunResult<Self::Carrier<T>>> + Send
    where
        T: Send + 'static,
        F: Future<Output = RunResult<Self::Carrier<T>>> + Send,
    {
        async move {
            match AssertUnwindSafe(run).catch_unwind().await {
                Ok(Ok(carrier)) => Ok(carrier),
                Ok(Err(Cancelled)) => {
                    crate::trace_event!(debug, "try step observed cancellation, reporting failure");
                    Ok(Err(Exception::cancelled()))
                }
                Err(payload) => {
                    let exception = Exception::from_panic(payload);
                    crate::trace_event!(debug, error = %exception, "try step captured a panic");
                    Ok(Err(exception))
                }
            }
        }
    }

    fn cacheable<T: Send + 'static>(carrier: &TryResult<T>) -> bool {
        !matches!(carrier, Err(exception) if exception.is_cancellation())
    }
}

/// Values computed from a shared read-only environment.
pub struct ReaderKind<Env>(PhantomData<fn() -> Env>);

impl<Env> Kind for ReaderKind<Env>
where
    Env: Clone + Send + Sync + 'static,
{
    type Input = Env;
    type Carrier<T: Send + 'static> = T;
    type Trace = ();
    type Halt = Infallible;

    const NAME: &'static str = "reader";

    fn origin(_input: &Env) {}

    fn decompose<T: Send + 'static>(carrier: T) -> Step<T, (), Infallible> {
        Step::Continue(carrier, ())
    }

    fn recompose<T: Send + 'static>(value: T, _trace: ()) -> T {
        value
    }

    fn halt<T: Send + 'static>(halt: Infallible) -> T {
        match halt {}
    }

    fn advance(input: &Env, _trace: &()) -> Env {
        input.clone()
    }

    fn merge(_first: (), _second: ()) {}

    fn value<T: Send + 'static>(carrier: &T) -> Option<&T> {
        Some(carrier)
    }

    fn halted<T: Send + 'static>(_carrier: &T) -> Option<&Infallible> {
        None
    }
}

/// Values paired with accumulated output.
pub struct WriterKind<W>(PhantomData<fn() -> W>);

impl<W> Kind for WriterKind<W>
where
    W: Monoid + Send + Sync + 'static,
{
    type Input = ();
    type Carrier<T: Send + 'static> = WriterResult<W, T>;
    type Trace = W;
    type Halt = Infallible;

    const NAME: &'static str = "writer";

    fn origin(_input: &()) -> W {
        W::empty()
    }

    fn decompose<T: Send + 'static>(carrier: WriterResult<W, T>) -> Step<T, W, Infallible> {
        Step::Continue(carrier.value, carrier.output)
    }

    fn recompose<T: Send + 'static>(value: T, trace: W) -> WriterResult<W, T> {
        WriterResult::new(value, trace)
    }

    fn halt<T: Send + 'static>(halt: Infallible) -> WriterResult<W, T> {
        match halt {}
    }

    fn advance(_input: &(), _trace: &W) {}

    fn merge(first: W, second: W) -> W {
        first.combine(second)
    }

    fn value<T: Send + 'static>(carrier: &WriterResult<W, T>) -> Option<&T> {
        Some(&carrier.value)
    }

    fn halted<T: Send + 'static>(_carrier: &WriterResult<W, T>) -> Option<&Infallible> {
        None
    }
}

impl<W> Accumulates for WriterKind<W>
where
    W: Monoid + Send + Sync + 'static,
{
    type Log = W;

    fn output<T: Send + 'static>(carrier: &WriterResult<W, T>) -> &W {
        &carrier.output
    }

    fn rewrite<T, F>(carrier: WriterResult<W, T>, f: F) -> WriterResult<W, T>
    where
        T: Send + 'static,
        F: FnOnce(W) -> W,
    {
        WriterResult::new(carrier.value, f(carrier.output))
    }
}

/// Values computed while threading a state.
pub struct StateKind<S>(PhantomData<fn() -> S>);

impl<S> Kind for StateKind<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Input = S;
    type Carrier<T: Send + 'static> = StateResult<S, T>;
    type Trace = S;
    type Halt = Infallible;

    const NAME: &'static str = "state";

    fn origin(input: &S) -> S {
        input.clone()
    }

    fn decompose<T: Send + 'static>(carrier: StateResult<S, T>) -> Step<T, S, Infallible> {
        Step::Continue(carrier.value, carrier.state)
    }

    fn recompose<T: Send + 'static>(value: T, trace: S) -> StateResult<S, T> {
        StateResult::new(trace, value)
    }

    fn halt<T: Send + 'static>(halt: Infallible) -> StateResult<S, T> {
        match halt {}
    }

    fn advance(_input: &S, trace: &S) -> S {
        trace.clone()
    }

    fn merge(_first: S, second: S) -> S {
        second
    }

    fn value<T: Send + 'static>(carrier: &StateResult<S, T>) -> Option<&T> {
        Some(&carrier.value)
    }

    fn halted<T: Send + 'static>(_carrier: &StateResult<S, T>) -> Option<&Infallible> {
        None
    }
}

impl<S> Stateful for StateKind<S>
where
    S: Clone + Send + Sync + 'static,
{
    type State = S;

    fn state<T: Send + 'static>(carrier: &StateResult<S, T>) -> &S {
        &carrier.state
    }
}

/// Reader, Writer and State combined.
///
/// Every step reports an explicit next state; a step that leaves the state
/// alone reports the state it was given.
pub struct RwsKind<Env, W, S>(PhantomData<fn() -> (Env, W, S)>);

impl<Env, W, S> Kind for RwsKind<Env, W, S>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    type Input = (Env, S);
    type Carrier<T: Send + 'static> = RwsResult<W, S, T>;
    type Trace = (W, S);
    type Halt = Infallible;

    const NAME: &'static str = "rws";

    fn origin(input: &(Env, S)) -> (W, S) {
        (W::empty(), input.1.clone())
    }

    fn decompose<T: Send + 'static>(carrier: RwsResult<W, S, T>) -> Step<T, (W, S), Infallible> {
        Step::Continue(carrier.value, (carrier.output, carrier.state))
    }

    fn recompose<T: Send + 'static>(value: T, trace: (W, S)) -> RwsResult<W, S, T> {
        RwsResult::new(value, trace.0, trace.1)
    }

    fn halt<T: Send + 'static>(halt: Infallible) -> RwsResult<W, S, T> {
        match halt {}
    }

    fn advance(input: &(Env, S), trace: &(W, S)) -> (Env, S) {
        (input.0.clone(), trace.1.clone())
    }

    fn merge(first: (W, S), second: (W, S)) -> (W, S) {
        (first.0.combine(second.0), second.1)
    }

    fn value<T: Send + 'static>(carrier: &RwsResult<W, S, T>) -> Option<&T> {
        Some(&carrier.value)
    }

    fn halted<T: Send + 'static>(_carrier: &RwsResult<W, S, T>) -> Option<&Infallible> {
        None
    }
}

impl<Env, W, S> Accumulates for RwsKind<Env, W, S>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    type Log = W;

    fn output<T: Send + 'static>(carrier: &RwsResult<W, S, T>) -> &W {
        &carrier.output
    }

    fn rewrite<T, F>(carrier: RwsResult<W, S, T>, f: F) -> RwsResult<W, S, T>
    where
        T: Send + 'static,
        F: FnOnce(W) -> W,
    {
        RwsResult::new(carrier.value, f(carrier.output), carrier.state)
    }
}

impl<Env, W, S> Stateful for RwsKind<Env, W, S>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    type State = S;

    fn state<T: Send + 'static>(carrier: &RwsResult<W, S, T>) -> &S {
        &carrier.state
    }
}

macro_rules! marker_impls {
    ($name:ident < $($p:ident),+ >) => {
        impl<$($p),+> std::fmt::Debug for $name<$($p),+> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(stringify!($name))
            }
        }

        impl<$($p),+> Clone for $name<$($p),+> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<$($p),+> Copy for $name<$($p),+> {}

        impl<$($p),+> Default for $name<$($p),+> {
            fn default() -> Self {
                $name(PhantomData)
            }
        }
    };
}

marker_impls!(EitherKind<L>);
marker_impls!(ReaderKind<Env>);
marker_impls!(WriterKind<W>);
marker_impls!(StateKind<S>);
marker_impls!(RwsKind<Env, W, S>);
