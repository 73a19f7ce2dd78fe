//! Tap combinators - observe a result without changing it.

use std::future::Future;

use crate::cancel::{checkpoint, CancellationToken, RunResult};
use crate::effect::kind::{Accumulates, Kind, OptionKind, Stateful};
use crate::effect::trait_def::{supervised, Carrier, Effect, Input};

macro_rules! tap_combinator {
    (
        $(#[$meta:meta])*
        $name:ident, |$carrier:ident, $f:ident| $observe:expr,
        where $($bounds:tt)*
    ) => {
        $(#[$meta])*
        pub struct $name<E, F> {
            pub(crate) inner: E,
            pub(crate) f: F,
        }

        impl<E, F> std::fmt::Debug for $name<E, F> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("inner", &"<effect>")
                    .field("f", &"<function>")
                    .finish()
            }
        }

        impl<E, F> Effect for $name<E, F>
        where
            E: Effect,
            $($bounds)*
        {
            type Kind = E::Kind;
            type Output = E::Output;

            fn run(
                &self,
                input: Input<Self>,
                cancel: &CancellationToken,
            ) -> impl Future<Output = RunResult<Carrier<Self>>> + Send {
                supervised::<Self, _>(async move {
                    checkpoint(cancel)?;
                    let $carrier = self.inner.run(input, cancel).await?;
                    checkpoint(cancel)?;
                    let $f = &self.f;
                    $observe;
                    Ok($carrier)
                })
            }
        }
    };
}

tap_combinator!(
    /// Observes the whole carrier.
    ///
    /// Created by [`EffectExt::tap`](crate::effect::EffectExt::tap).
    Tap, |carrier, f| f(&carrier),
    where F: Fn(&Carrier<E>) + Send + Sync,
);

tap_combinator!(
    /// Observes the success value only.
    ///
    /// Created by [`EffectExt::tap_value`](crate::effect::EffectExt::tap_value).
    TapValue, |carrier, f| {
        if let Some(value) = <E::Kind as Kind>::value::<E::Output>(&carrier) {
            f(value);
        }
    },
    where F: Fn(&E::Output) + Send + Sync,
);

tap_combinator!(
    /// Observes the short-circuit payload only (`None`, `Left`, exception).
    ///
    /// Created by [`EffectExt::tap_halt`](crate::effect::EffectExt::tap_halt).
    TapHalt, |carrier, f| {
        if let Some(halt) = <E::Kind as Kind>::halted::<E::Output>(&carrier) {
            f(halt);
        }
    },
    where F: Fn(&<E::Kind as Kind>::Halt) + Send + Sync,
);

tap_combinator!(
    /// Observes the accumulated output of a Writer or RWS effect.
    TapOutput, |carrier, f| f(<E::Kind as Accumulates>::output::<E::Output>(&carrier)),
    where
        E::Kind: Accumulates,
        F: Fn(&<E::Kind as Accumulates>::Log) + Send + Sync,
);

tap_combinator!(
    /// Observes the state reported by a State or RWS effect.
    TapState, |carrier, f| f(<E::Kind as Stateful>::state::<E::Output>(&carrier)),
    where
        E::Kind: Stateful,
        F: Fn(&<E::Kind as Stateful>::State) + Send + Sync,
);

tap_combinator!(
    /// Calls `f` when an Option effect produces `None`.
    ///
    /// Created by [`OptionEffectExt::tap_none`](crate::effect::option::OptionEffectExt::tap_none).
    TapNone, |carrier, f| {
        if carrier.is_none() {
            f();
        }
    },
    where
        E: Effect<Kind = OptionKind>,
        F: Fn() + Send + Sync,
);
