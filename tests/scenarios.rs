//! End-to-end scenarios across kinds: short-circuiting, threading,
//! memoization, capture, cancellation, branching and conversions.

use eddy::effect::prelude::*;
use eddy::testing::CallCounter;
use eddy::{assert_failure, assert_left, assert_none, assert_right, assert_some, assert_success};

#[derive(Debug, Clone)]
struct Job {
    name: &'static str,
    retries: u32,
}

#[tokio::test]
async fn left_short_circuits_map_without_calling_it() {
    let calls = CallCounter::new();
    let spy = calls.clone();
    let effect = either::left::<i32, i32>(5).map(move |x| {
        spy.hit();
        x + 1
    });

    let carrier = effect.run_standalone().await.unwrap();
    assert_eq!(assert_left!(carrier), 5);
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn none_stops_the_rest_of_the_chain() {
    let calls = CallCounter::new();
    let spy = calls.clone();
    let effect = option::some(1)
        .and_then(|_| option::none::<i32>())
        .and_then(move |x| {
            spy.hit();
            option::some(x)
        });

    assert_none!(effect.run_standalone().await.unwrap());
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn state_get_put_get_threads_left_to_right() {
    let effect = state::get::<i32>()
        .and_then(|s| state::put(s + 1))
        .and_then(|_| state::get());

    let result = effect.run(10, &CancellationToken::new()).await.unwrap();
    assert_eq!(result.value, 11);
    assert_eq!(result.state, 11);
}

#[tokio::test]
async fn writer_output_keeps_bind_order() {
    let effect = writer::tell(vec!["a"]).and_then(|_| writer::tell(vec!["b"]));
    let result = effect.run_standalone().await.unwrap();
    assert_eq!(result.output, vec!["a", "b"]);
}

#[tokio::test]
async fn shared_effect_runs_source_once_across_clones() {
    let calls = CallCounter::new();
    let spy = calls.clone();
    let shared = io::create(move || spy.hit() * 100).share();
    let copy = shared.clone();

    assert!(!copy.is_cached());
    let first = shared.run_standalone().await.unwrap();
    assert!(copy.is_cached());
    let second = copy.run_standalone().await.unwrap();

    assert_eq!(first, 100);
    assert_eq!(second, 100);
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn shared_effect_does_not_cache_a_cancelled_run() {
    let calls = CallCounter::new();
    let spy = calls.clone();
    let shared = io::create(move || spy.hit()).share();

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    assert_eq!(shared.run((), &cancelled).await, Err(Cancelled));
    assert!(!shared.is_cached());

    assert_eq!(shared.run_standalone().await, Ok(1));
    assert_eq!(shared.run_standalone().await, Ok(1));
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn shared_try_does_not_cache_a_cancellation_failure() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    let calls = CallCounter::new();
    let spy = calls.clone();
    let shared = fallible::create(move || {
        trigger.cancel();
        Ok::<_, Exception>(spy.hit())
    })
    .map(|n| n * 10)
    .share();

    let exception = assert_failure!(shared.run((), &token).await.unwrap());
    assert!(exception.is_cancellation());
    assert!(!shared.is_cached());
    assert_eq!(calls.count(), 1);

    assert_eq!(assert_success!(shared.run_standalone().await.unwrap()), 20);
    assert!(shared.is_cached());
    assert_eq!(assert_success!(shared.run_standalone().await.unwrap()), 20);
    assert_eq!(calls.count(), 2);
}

#[tokio::test]
async fn try_create_captures_the_same_exception() {
    let boom = Exception::msg("someException");
    let thrown = boom.clone();
    let effect = fallible::create(move || Err::<i32, _>(thrown.clone()));

    let exception = assert_failure!(effect.run_standalone().await.unwrap());
    assert!(exception.ptr_eq(&boom));
    assert!(!exception.is_cancellation());
}

#[tokio::test]
async fn try_create_captures_a_panic() {
    let effect = fallible::create(|| -> Result<i32, Exception> { panic!("worker died") });

    let exception = assert_failure!(effect.run_standalone().await.unwrap());
    assert!(exception.is_panic());
    assert!(exception.to_string().contains("worker died"));
}

#[tokio::test]
async fn try_reports_cancellation_as_a_distinguishable_failure() {
    let token = CancellationToken::new();
    token.cancel();
    let effect = fallible::success(1).map(|x| x + 1);

    let exception = assert_failure!(effect.run((), &token).await.unwrap());
    assert!(exception.is_cancellation());
}

#[tokio::test]
async fn option_merge_short_circuits_on_none() {
    let gap = option::merge(vec![
        option::some(1).boxed(),
        option::none().boxed(),
        option::some(3).boxed(),
    ]);
    assert_none!(gap.run_standalone().await.unwrap());

    let all = option::merge(vec![option::some(1).boxed(), option::some(2).boxed()]);
    assert_eq!(assert_some!(all.run_standalone().await.unwrap()), vec![1, 2]);
}

#[tokio::test]
async fn option_to_either_uses_the_left_value_for_none() {
    let present = option::some(7).to_either(-1);
    assert_eq!(assert_right!(present.run_standalone().await.unwrap()), 7);

    let missing = option::none::<i32>().to_either(-1);
    assert_eq!(assert_left!(missing.run_standalone().await.unwrap()), -1);
}

#[tokio::test]
async fn conversions_chain_across_kinds() {
    let effect = either::left::<String, i32>("missing".to_string())
        .to_try(|missing: String| Exception::msg(missing))
        .to_option()
        .to_either(0u8);
    assert_eq!(assert_left!(effect.run_standalone().await.unwrap()), 0);

    let effect = fallible::success(3)
        .to_either(|e: Exception| e.to_string())
        .to_option();
    assert_eq!(assert_some!(effect.run_standalone().await.unwrap()), 3);
}

#[tokio::test]
async fn cancelling_mid_chain_skips_the_remaining_steps() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    let calls = CallCounter::new();
    let spy = calls.clone();

    let effect = io::create(move || {
        trigger.cancel();
        1
    })
    .and_then(move |x| {
        let spy = spy.clone();
        io::create(move || {
            spy.hit();
            x + 1
        })
    });

    assert_eq!(effect.run((), &token).await, Err(Cancelled));
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn rws_threads_env_output_and_state() {
    let job = Job {
        name: "reindex",
        retries: 2,
    };

    let effect = rws::asks::<Job, Vec<String>, u32, _, _>(|job: &Job| job.name)
        .and_then(|name| rws::tell_one(format!("start {name}")))
        .and_then(|_| rws::asks(|job: &Job| job.retries))
        .and_then(|retries| rws::with(move |attempts: u32| attempts + retries))
        .and_then(|_| rws::get())
        .and_then(|attempts| {
            rws::tell_one(format!("attempts {attempts}")).map(move |_| attempts)
        });

    let result = effect
        .run((job, 1), &CancellationToken::new())
        .await
        .unwrap();
    let (value, output, state) = result.into_parts();
    assert_eq!(value, 3);
    assert_eq!(state, 3);
    assert_eq!(output, vec!["start reindex", "attempts 3"]);
}

#[tokio::test]
async fn rws_provided_context_keeps_only_the_value() {
    let effect = rws::get::<Job, Vec<String>, u32>()
        .and_then(|n| rws::put_get(n * 2))
        .and_then(|n| rws::asks(move |job: &Job| job.retries + n))
        .provide_context(
            Job {
                name: "backup",
                retries: 4,
            },
            5,
        );

    assert_eq!(effect.run_standalone().await, Ok(14));
}

#[tokio::test]
async fn reader_local_changes_env_for_one_step() {
    let retries = reader::asks(|job: &Job| job.retries);
    let doubled = reader::local(
        |job: &Job| Job {
            retries: job.retries * 2,
            ..job.clone()
        },
        reader::asks(|job: &Job| job.retries),
    );
    let both = retries.and_then(move |before| {
        reader::local(
            |job: &Job| Job {
                retries: job.retries * 2,
                ..job.clone()
            },
            reader::asks(|job: &Job| job.retries),
        )
        .map(move |after| (before, after))
    });

    let job = Job {
        name: "sync",
        retries: 3,
    };
    let token = CancellationToken::new();
    assert_eq!(doubled.run(job.clone(), &token).await, Ok(6));
    assert_eq!(both.run(job, &token).await, Ok((3, 6)));
}

#[tokio::test]
async fn zip_runs_both_sides_even_when_first_is_none() {
    let calls = CallCounter::new();
    let spy = calls.clone();
    let second = option::create(move || {
        spy.hit();
        Some(2)
    });

    let effect = option::none::<i32>().zip(second, |a, b| a + b);
    assert_none!(effect.run_standalone().await.unwrap());
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn choose_runs_only_the_selected_branch() {
    let picked = CallCounter::new();
    let skipped = CallCounter::new();
    let (p, s) = (picked.clone(), skipped.clone());

    let effect = choose(
        || true,
        io::create(move || p.hit()),
        io::create(move || s.hit()),
    );

    assert_eq!(effect.run_standalone().await, Ok(1));
    assert_eq!(effect.run_standalone().await, Ok(2));
    assert_eq!(skipped.count(), 0);
}

#[tokio::test]
async fn choose_async_awaits_the_condition() {
    let effect = choose_async(
        || async { false },
        option::some("primary"),
        option::some("fallback"),
    );
    assert_eq!(assert_some!(effect.run_standalone().await.unwrap()), "fallback");
}

#[tokio::test]
async fn if_then_replaces_a_matching_carrier() {
    let empty = option::none::<i32>().if_then(|c| c.is_none(), option::some(0));
    assert_eq!(assert_some!(empty.run_standalone().await.unwrap()), 0);

    let kept = option::some(9).if_then(|c| c.is_none(), option::some(0));
    assert_eq!(assert_some!(kept.run_standalone().await.unwrap()), 9);

    let reset = state::get::<i32>()
        .if_then(|c| c.value < 0, state::put_get(0))
        .map(|n| n + 1);
    let result = reset.run(-4, &CancellationToken::new()).await.unwrap();
    assert_eq!((result.state, result.value), (0, 1));
}

#[tokio::test]
async fn if_then_async_awaits_the_predicate() {
    let effect = fallible::success(5).if_then_async(
        |c: &TryResult<i32>| {
            let big = matches!(c, Ok(n) if *n > 3);
            async move { big }
        },
        fallible::success(3),
    );
    assert_eq!(assert_success!(effect.run_standalone().await.unwrap()), 3);
}

#[tokio::test]
async fn catch_and_or_else_recover_short_circuits() {
    let caught = option::none::<&str>().catch(option::some("default"));
    assert_eq!(assert_some!(caught.run_standalone().await.unwrap()), "default");

    let recovered = either::left::<u16, &str>(404).or_else(|code| {
        if code == 404 {
            either::right("not found page")
        } else {
            either::right("error page")
        }
    });
    assert_eq!(
        assert_right!(recovered.run_standalone().await.unwrap()),
        "not found page"
    );
}

#[tokio::test]
async fn effects_rerun_with_fresh_side_effects() {
    let calls = CallCounter::new();
    let spy = calls.clone();
    let effect = io::create(move || spy.hit());

    assert_eq!(effect.run_standalone().await, Ok(1));
    assert_eq!(effect.run_standalone().await, Ok(2));
    assert_eq!(calls.count(), 2);
}

#[tokio::test]
async fn boxed_effects_share_a_type_and_clone() {
    let effects: Vec<BoxedEffect<OptionKind, i32>> = vec![
        option::some(1).boxed(),
        option::some(2).map(|x| x * 10).boxed(),
        option::none().boxed(),
    ];

    let mut carriers = Vec::new();
    for effect in effects.iter().map(Clone::clone) {
        carriers.push(effect.run_standalone().await.unwrap());
    }
    assert_eq!(carriers, vec![Some(1), Some(20), None]);
}

#[tokio::test]
async fn execute_with_reports_each_side() {
    let token = CancellationToken::new();
    let mut seen = Vec::new();

    option::some(4)
        .execute_with(&token, |v| seen.push(format!("some {v}")), || {})
        .await
        .unwrap();
    fallible::throw::<i32>(Exception::msg("bad input"))
        .execute_with(&token, |_| {}, |e| seen.push(format!("failure {e}")))
        .await
        .unwrap();

    assert_eq!(seen, vec!["some 4", "failure bad input"]);
}

#[cfg(feature = "tracing")]
#[tokio::test]
async fn instrumented_effect_keeps_its_carrier() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let effect = state::modify(|n: u32| n + 1)
        .and_then(|_| state::get())
        .instrument(tracing::info_span!("counter"));

    let result = effect.run(1, &CancellationToken::new()).await.unwrap();
    assert_eq!((result.state, result.value), (2, 2));
}
