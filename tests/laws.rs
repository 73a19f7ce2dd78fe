//! Property-based tests for the functor and monad laws across kinds

use eddy::effect::prelude::*;
use eddy::effect::{Carrier, Input};
use proptest::prelude::*;

fn run<E>(effect: &E) -> Carrier<E>
where
    E: Effect,
    E::Kind: Kind<Input = ()>,
{
    tokio_test::block_on(effect.run_standalone()).expect("run was not cancelled")
}

fn run_state<E>(effect: &E, initial: i64) -> Carrier<E>
where
    E: Effect<Kind = StateKind<i64>>,
{
    tokio_test::block_on(effect.run(initial, &CancellationToken::new()))
        .expect("run was not cancelled")
}

fn run_with<E: Effect>(effect: &E, input: Input<E>) -> Carrier<E> {
    tokio_test::block_on(effect.run(input, &CancellationToken::new()))
        .expect("run was not cancelled")
}

fn maybe(present: bool, value: i32) -> Option<i32> {
    present.then_some(value)
}

proptest! {
    #[test]
    fn prop_map_identity_option(value in any::<i32>(), present in any::<bool>()) {
        let source = option::from_option(maybe(present, value));
        let mapped = option::from_option(maybe(present, value)).map(|x| x);
        prop_assert_eq!(run(&mapped), run(&source));
    }

    #[test]
    fn prop_map_identity_either(value in any::<i32>(), left in any::<bool>()) {
        let carrier = if left { Either::left(value) } else { Either::right(value) };
        let source = either::from_either(carrier.clone());
        let mapped = either::from_either(carrier).map(|x| x);
        prop_assert_eq!(run(&mapped), run(&source));
    }

    #[test]
    fn prop_map_identity_try(value in any::<i32>(), fails in any::<bool>()) {
        let result = if fails { Err(Exception::msg("boom")) } else { Ok(value) };
        let source = fallible::from_result(result);
        let first = run(&source);
        let mapped = run(&source.map(|x| x));
        match (first, mapped) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert!(a.ptr_eq(&b)),
            other => prop_assert!(false, "carriers diverged: {:?}", other),
        }
    }

    #[test]
    fn prop_map_identity_state(value in any::<i32>(), initial in any::<i64>()) {
        let source = state::gets(move |s: &i64| (*s, value));
        let mapped = state::gets(move |s: &i64| (*s, value)).map(|x| x);
        prop_assert_eq!(run_state(&mapped, initial), run_state(&source, initial));
    }

    #[test]
    fn prop_map_identity_writer(
        value in any::<i32>(),
        log in prop::collection::vec(any::<u8>(), 0..8),
    ) {
        let source = writer::tell_with(value, log.clone());
        let mapped = writer::tell_with(value, log).map(|x| x);
        prop_assert_eq!(run(&mapped), run(&source));
    }

    #[test]
    fn prop_map_identity_identity(value in any::<i32>()) {
        let source = identity::pure(value);
        let mapped = identity::pure(value).map(|x| x);
        prop_assert_eq!(run(&mapped), run(&source));
    }

    #[test]
    fn prop_map_identity_io(value in any::<i32>()) {
        let source = io::create(move || value.wrapping_mul(7));
        let mapped = io::create(move || value.wrapping_mul(7)).map(|x| x);
        prop_assert_eq!(run(&mapped), run(&source));
    }

    #[test]
    fn prop_map_identity_reader(value in any::<i64>(), env in any::<i64>()) {
        let source = reader::asks(move |env: &i64| env.wrapping_add(value));
        let mapped = reader::asks(move |env: &i64| env.wrapping_add(value)).map(|x| x);
        prop_assert_eq!(run_with(&mapped, env), run_with(&source, env));
    }

    #[test]
    fn prop_map_identity_rws(value in any::<i64>(), env in any::<i64>(), initial in any::<i64>()) {
        let step = move |env: &i64, s: i64| {
            RwsResult::new(env ^ value, vec![s], s.wrapping_add(value))
        };
        let source = rws::create(step);
        let mapped = rws::create(step).map(|x| x);
        prop_assert_eq!(
            run_with(&mapped, (env, initial)),
            run_with(&source, (env, initial))
        );
    }

    #[test]
    fn prop_map_composition_identity(value in any::<i32>()) {
        let composed = identity::pure(value)
            .map(|x| x.wrapping_add(1))
            .map(|x| x.wrapping_mul(3));
        let fused = identity::pure(value).map(|x| x.wrapping_add(1).wrapping_mul(3));
        prop_assert_eq!(run(&composed), run(&fused));
    }

    #[test]
    fn prop_bind_associativity_option(value in any::<i32>(), present in any::<bool>()) {
        let f = |x: i32| option::from_option((x % 3 != 0).then_some(x.wrapping_mul(2)));
        let g = |x: i32| option::from_option((x % 5 != 0).then_some(x.wrapping_sub(7)));

        let left = option::from_option(maybe(present, value)).and_then(f).and_then(g);
        let right = option::from_option(maybe(present, value)).and_then(move |x| f(x).and_then(g));
        prop_assert_eq!(run(&left), run(&right));
    }

    #[test]
    fn prop_bind_associativity_either(value in any::<i32>()) {
        let f = |x: i32| {
            either::from_either(if x % 2 == 0 {
                Either::right(x / 2)
            } else {
                Either::left(format!("odd {x}"))
            })
        };
        let g = |x: i32| {
            either::from_either(if x > 0 {
                Either::right(x.to_string())
            } else {
                Either::left("not positive".to_string())
            })
        };

        let left = either::right(value).and_then(f).and_then(g);
        let right = either::right(value).and_then(move |x| f(x).and_then(g));
        prop_assert_eq!(run(&left), run(&right));
    }

    #[test]
    fn prop_bind_associativity_try(value in any::<i32>()) {
        let odd = Exception::msg("odd");
        let negative = Exception::msg("negative");
        let f = move |x: i32| {
            fallible::from_result(if x % 2 == 0 { Ok(x / 2) } else { Err(odd.clone()) })
        };
        let g = move |x: i32| {
            fallible::from_result(if x >= 0 { Ok(x as i64) } else { Err(negative.clone()) })
        };

        let left = fallible::success(value).and_then(f.clone()).and_then(g.clone());
        let right = fallible::success(value).and_then(move |x| f(x).and_then(g.clone()));
        match (run(&left), run(&right)) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert!(a.ptr_eq(&b)),
            other => prop_assert!(false, "carriers diverged: {:?}", other),
        }
    }

    #[test]
    fn prop_bind_associativity_identity(value in any::<i32>()) {
        let f = |x: i32| identity::pure(x.wrapping_mul(31));
        let g = |x: i32| identity::pure(x.wrapping_add(17));

        let left = identity::pure(value).and_then(f).and_then(g);
        let right = identity::pure(value).and_then(move |x| f(x).and_then(g));
        prop_assert_eq!(run(&left), run(&right));
    }

    #[test]
    fn prop_left_identity_option(value in any::<i32>()) {
        let f = |x: i32| option::from_option((x % 2 == 0).then_some(x));
        prop_assert_eq!(run(&option::some(value).and_then(f)), run(&f(value)));
    }

    #[test]
    fn prop_state_bind_threads_every_step(initial in -1000i64..1000, steps in 0usize..12) {
        let mut effect = state::pure::<i64, ()>(()).boxed();
        for _ in 0..steps {
            effect = effect.and_then(|_| state::modify(|s: i64| s + 1)).boxed();
        }
        prop_assert_eq!(run_state(&effect, initial).state, initial + steps as i64);
    }
}
