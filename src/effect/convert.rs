//! The conversion layer between kinds.
//!
//! A [`Convert`] runs an effect of one kind and reshapes its carrier into
//! another kind's carrier. The reshaping is a [`Conversion`] strategy; the
//! per-kind extension traits expose them as methods such as
//! `to_either`, `to_option` or `into_rws`.
//!
//! No conversion invents information: going from Option to Either needs a
//! `Left` value for the absent case, going out of State needs an initial
//! state, and so on.

use std::future::Future;
use std::marker::PhantomData;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::{
    EitherKind, Kind, OptionKind, Plain, ReaderKind, RwsKind, StateKind, TryKind, WriterKind,
};
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};
use crate::either::Either;
use crate::exception::Exception;
use crate::monoid::Monoid;
use crate::result::{RwsResult, StateResult, WriterResult};

/// Reshapes carriers of kind `Src` into carriers of kind `Dst`.
pub trait Conversion<Src: Kind, Dst: Kind>: Send + Sync {
    /// The input to run the source with, given the target input.
    fn input(&self, target: &Dst::Input) -> Src::Input;

    /// Reshape a source carrier.
    fn convert<T: Send + 'static>(
        &self,
        carrier: Src::Carrier<T>,
        target: &Dst::Input,
    ) -> Dst::Carrier<T>;
}

/// An effect of kind `K` built by converting another effect.
pub struct Convert<E, C, K> {
    pub(crate) inner: E,
    pub(crate) conversion: C,
    pub(crate) _kind: PhantomData<fn() -> K>,
}

impl<E, C, K> Convert<E, C, K> {
    pub(crate) fn new(inner: E, conversion: C) -> Self {
        Convert {
            inner,
            conversion,
            _kind: PhantomData,
        }
    }
}

impl<E, C: std::fmt::Debug, K> std::fmt::Debug for Convert<E, C, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Convert")
            .field("inner", &"<effect>")
            .field("conversion", &self.conversion)
            .finish()
    }
}

impl<E, C, K> Effect for Convert<E, C, K>
where
    E: Effect,
    C: Conversion<E::Kind, K>,
    K: Kind,
{
    type Kind = K;
    type Output = E::Output;

    fn run(
        &self,
        input: Input<Self>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
        supervised::<Self, _>(async move {
            checkpoint(cancel)?;
            let carrier = self
                .inner
                .run(self.conversion.input(&input), cancel)
                .await?;
            checkpoint(cancel)?;
            Ok(self.conversion.convert::<E::Output>(carrier, &input))
        })
    }
}

/// Lift a value-only effect (Identity, IO) into any kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lift;

impl<Src: Plain, Dst: Kind> Conversion<Src, Dst> for Lift {
    fn input(&self, _target: &Dst::Input) -> Src::Input {}

    fn convert<T: Send + 'static>(
        &self,
        carrier: Src::Carrier<T>,
        target: &Dst::Input,
    ) -> Dst::Carrier<T> {
        Dst::pure(Src::into_value::<T>(carrier), target)
    }
}

/// Option to Either, with the `Left` value used for `None`.
#[derive(Debug, Clone)]
pub struct OptionToEither<L> {
    pub(crate) left: L,
}

impl<L> Conversion<OptionKind, EitherKind<L>> for OptionToEither<L>
where
    L: Clone + Send + Sync + 'static,
{
    fn input(&self, _target: &()) {}

    fn convert<T: Send + 'static>(&self, carrier: Option<T>, _target: &()) -> Either<L, T> {
        match carrier {
            Some(value) => Either::Right(value),
            None => Either::Left(self.left.clone()),
        }
    }
}

/// Option to Try, with the exception used for `None`.
#[derive(Debug, Clone)]
pub struct OptionToTry {
    pub(crate) exception: Exception,
}

impl Conversion<OptionKind, TryKind> for OptionToTry {
    fn input(&self, _target: &()) {}

    fn convert<T: Send + 'static>(&self, carrier: Option<T>, _target: &()) -> Result<T, Exception> {
        carrier.ok_or_else(|| self.exception.clone())
    }
}

/// Either to Option, dropping the `Left` value.
#[derive(Debug, Clone, Copy, Default)]
pub struct EitherToOption;

impl<L: Send + 'static> Conversion<EitherKind<L>, OptionKind> for EitherToOption {
    fn input(&self, _target: &()) {}

    fn convert<T: Send + 'static>(&self, carrier: Either<L, T>, _target: &()) -> Option<T> {
        carrier.into_right()
    }
}

/// Either to Try, turning the `Left` value into an exception.
pub struct EitherToTry<F> {
    pub(crate) f: F,
}

impl<F> std::fmt::Debug for EitherToTry<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EitherToTry")
            .field("f", &"<function>")
            .finish()
    }
}

impl<L, F> Conversion<EitherKind<L>, TryKind> for EitherToTry<F>
where
    L: Send + 'static,
    F: Fn(L) -> Exception + Send + Sync,
{
    fn input(&self, _target: &()) {}

    fn convert<T: Send + 'static>(
        &self,
        carrier: Either<L, T>,
        _target: &(),
    ) -> Result<T, Exception> {
        carrier.into_result().map_err(&self.f)
    }
}

/// Try to Option, dropping the exception.
#[derive(Debug, Clone, Copy, Default)]
pub struct TryToOption;

impl Conversion<TryKind, OptionKind> for TryToOption {
    fn input(&self, _target: &()) {}

    fn convert<T: Send + 'static>(&self, carrier: Result<T, Exception>, _target: &()) -> Option<T> {
        carrier.ok()
    }
}

/// Try to Either, projecting the exception into a `Left` value.
pub struct TryToEither<F> {
    pub(crate) f: F,
}

impl<F> std::fmt::Debug for TryToEither<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryToEither")
            .field("f", &"<function>")
            .finish()
    }
}

impl<L, F> Conversion<TryKind, EitherKind<L>> for TryToEither<F>
where
    L: Send + 'static,
    F: Fn(Exception) -> L + Send + Sync,
{
    fn input(&self, _target: &()) {}

    fn convert<T: Send + 'static>(
        &self,
        carrier: Result<T, Exception>,
        _target: &(),
    ) -> Either<L, T> {
        Either::from(carrier.map_err(&self.f))
    }
}

/// Run a Reader with a fixed environment.
#[derive(Debug, Clone)]
pub struct ProvideEnv<Env> {
    pub(crate) env: Env,
}

impl<Env, Dst> Conversion<ReaderKind<Env>, Dst> for ProvideEnv<Env>
where
    Env: Clone + Send + Sync + 'static,
    Dst: Plain,
{
    fn input(&self, _target: &()) -> Env {
        self.env.clone()
    }

    fn convert<T: Send + 'static>(&self, carrier: T, target: &()) -> Dst::Carrier<T> {
        Dst::pure(carrier, target)
    }
}

/// Run a State from a fixed initial state, keeping only the value.
#[derive(Debug, Clone)]
pub struct ProvideState<S> {
    pub(crate) initial: S,
}

impl<S, Dst> Conversion<StateKind<S>, Dst> for ProvideState<S>
where
    S: Clone + Send + Sync + 'static,
    Dst: Plain,
{
    fn input(&self, _target: &()) -> S {
        self.initial.clone()
    }

    fn convert<T: Send + 'static>(
        &self,
        carrier: StateResult<S, T>,
        target: &(),
    ) -> Dst::Carrier<T> {
        Dst::pure(carrier.value, target)
    }
}

/// Run a Writer, keeping only the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardOutput;

impl<W, Dst> Conversion<WriterKind<W>, Dst> for DiscardOutput
where
    W: Monoid + Send + Sync + 'static,
    Dst: Plain,
{
    fn input(&self, _target: &()) {}

    fn convert<T: Send + 'static>(
        &self,
        carrier: WriterResult<W, T>,
        target: &(),
    ) -> Dst::Carrier<T> {
        Dst::pure(carrier.value, target)
    }
}

/// Run an RWS with a fixed environment and initial state, keeping only the
/// value.
#[derive(Debug, Clone)]
pub struct ProvideContext<Env, S> {
    pub(crate) env: Env,
    pub(crate) initial: S,
}

impl<Env, W, S, Dst> Conversion<RwsKind<Env, W, S>, Dst> for ProvideContext<Env, S>
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    Dst: Plain,
{
    fn input(&self, _target: &()) -> (Env, S) {
        (self.env.clone(), self.initial.clone())
    }

    fn convert<T: Send + 'static>(
        &self,
        carrier: RwsResult<W, S, T>,
        target: &(),
    ) -> Dst::Carrier<T> {
        Dst::pure(carrier.value, target)
    }
}

/// Embed a Reader, Writer or State effect into RWS.
///
/// The embedded effect sees the part of the RWS context it knows about; the
/// rest is passed through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntoRws;

impl<Env, W, S> Conversion<ReaderKind<Env>, RwsKind<Env, W, S>> for IntoRws
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    fn input(&self, target: &(Env, S)) -> Env {
        target.0.clone()
    }

    fn convert<T: Send + 'static>(&self, carrier: T, target: &(Env, S)) -> RwsResult<W, S, T> {
        RwsResult::new(carrier, W::empty(), target.1.clone())
    }
}

impl<Env, W, S> Conversion<WriterKind<W>, RwsKind<Env, W, S>> for IntoRws
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    fn input(&self, _target: &(Env, S)) {}

    fn convert<T: Send + 'static>(
        &self,
        carrier: WriterResult<W, T>,
        target: &(Env, S),
    ) -> RwsResult<W, S, T> {
        RwsResult::new(carrier.value, carrier.output, target.1.clone())
    }
}

impl<Env, W, S> Conversion<StateKind<S>, RwsKind<Env, W, S>> for IntoRws
where
    Env: Clone + Send + Sync + 'static,
    W: Monoid + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    fn input(&self, target: &(Env, S)) -> S {
        target.1.clone()
    }

    fn convert<T: Send + 'static>(
        &self,
        carrier: StateResult<S, T>,
        _target: &(Env, S),
    ) -> RwsResult<W, S, T> {
        RwsResult::new(carrier.value, W::empty(), carrier.state)
    }
}
