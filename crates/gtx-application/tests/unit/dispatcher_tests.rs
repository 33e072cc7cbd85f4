//! Dispatcher failover, rate-limit and cancellation tests

use std::sync::Arc;
use std::time::Duration;

use gtx_application::TranslationDispatcher;
use gtx_domain::constants::DEFAULT_MAX_RATE_LIMIT_COOLDOWN_SECS;
use gtx_domain::ports::ProviderRegistry;
use gtx_domain::{
    ContentPolicy, Error, ProviderError, ProviderErrorKind, ProviderHealth, TranslationOutcome,
};
use gtx_infrastructure::{InMemoryProviderRegistry, RegistrySettings};
use tokio_util::sync::CancellationToken;

use crate::test_utils::{ScriptedProvider, add, dispatcher, registry, request, strings};

fn server_error() -> TranslationOutcome {
    TranslationOutcome::Failed(ProviderError::server("503 unavailable"))
}

#[tokio::test]
async fn test_success_on_third_candidate_after_rate_limit_and_failure() {
    let (registry, _clock) = registry();
    let a = add(
        &registry,
        "A",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::always(TranslationOutcome::RateLimited {
            retry_after: Some(Duration::from_secs(10)),
        }),
    );
    let b = add(
        &registry,
        "B",
        2,
        ContentPolicy::Strict,
        ScriptedProvider::always(server_error()),
    );
    let c = add(&registry, "C", 3, ContentPolicy::Strict, ScriptedProvider::echo("C"));

    let translation = dispatcher(&registry)
        .dispatch(&request(&["一", "二"], ContentPolicy::Strict))
        .await
        .unwrap();

    assert_eq!(translation.provider, "C");
    assert_eq!(translation.texts, strings(&["[C] 一", "[C] 二"]));
    assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 1));

    let a_status = registry.status("A").unwrap();
    assert_eq!(a_status.health, ProviderHealth::RateLimited);
    assert_eq!(a_status.cooldown_remaining, Some(Duration::from_secs(10)));
    let b_status = registry.status("B").unwrap();
    assert_eq!(b_status.health, ProviderHealth::Available);
    assert_eq!(b_status.consecutive_failures, 1);
    let c_status = registry.status("C").unwrap();
    assert_eq!(c_status.success_count, 1);
    assert_eq!(c_status.consecutive_failures, 0);
}

#[tokio::test]
async fn test_empty_registry_fails_without_calls() {
    let (registry, _clock) = registry();

    let err = dispatcher(&registry)
        .dispatch(&request(&["一"], ContentPolicy::Strict))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::NoEligibleProvider {
            content_policy: ContentPolicy::Strict
        }
    ));
    assert!(err.tried_providers().is_empty());
}

#[tokio::test]
async fn test_relaxed_request_with_strict_only_registry() {
    let (registry, _clock) = registry();
    let a = add(&registry, "A", 1, ContentPolicy::Strict, ScriptedProvider::echo("A"));
    let b = add(&registry, "B", 2, ContentPolicy::Moderate, ScriptedProvider::echo("B"));

    let err = dispatcher(&registry)
        .dispatch(&request(&["一"], ContentPolicy::Relaxed))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::NoEligibleProvider {
            content_policy: ContentPolicy::Relaxed
        }
    ));
    assert_eq!(a.calls() + b.calls(), 0);
}

#[tokio::test]
async fn test_exhausted_attempts_reports_tried_and_last_error() {
    let (registry, _clock) = registry();
    add(
        &registry,
        "A",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::always(TranslationOutcome::RateLimited { retry_after: None }),
    );
    add(
        &registry,
        "B",
        2,
        ContentPolicy::Strict,
        ScriptedProvider::always(TranslationOutcome::Failed(ProviderError::authentication(
            "bad key",
        ))),
    );

    let err = dispatcher(&registry)
        .dispatch(&request(&["一"], ContentPolicy::Strict))
        .await
        .unwrap_err();

    match err {
        Error::ExhaustedAttempts { tried, last_error } => {
            assert_eq!(tried, ["A", "B"]);
            assert_eq!(last_error.kind, ProviderErrorKind::Authentication);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_max_attempts_caps_provider_calls() {
    let (registry, _clock) = registry();
    add(
        &registry,
        "A",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::always(server_error()),
    );
    let b = add(&registry, "B", 2, ContentPolicy::Strict, ScriptedProvider::echo("B"));

    let err = dispatcher(&registry)
        .with_max_attempts(1)
        .dispatch(&request(&["一"], ContentPolicy::Strict))
        .await
        .unwrap_err();

    assert_eq!(err.tried_providers(), ["A"]);
    assert_eq!(b.calls(), 0);
}

#[tokio::test]
async fn test_misaligned_success_counts_as_failure() {
    let (registry, _clock) = registry();
    add(
        &registry,
        "short",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::always(TranslationOutcome::Success(strings(&["only one"]))),
    );
    add(&registry, "good", 2, ContentPolicy::Strict, ScriptedProvider::echo("good"));

    let translation = dispatcher(&registry)
        .dispatch(&request(&["一", "二"], ContentPolicy::Strict))
        .await
        .unwrap();

    assert_eq!(translation.provider, "good");
    let status = registry.status("short").unwrap();
    assert_eq!(status.consecutive_failures, 1);
    assert!(status.last_error.unwrap().contains("malformed"));
}

#[tokio::test]
async fn test_rate_limit_is_shared_across_dispatches() {
    let (registry, clock) = registry();
    let a = add(
        &registry,
        "A",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::echo("A").with_script([TranslationOutcome::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
        }]),
    );
    add(&registry, "B", 2, ContentPolicy::Strict, ScriptedProvider::echo("B"));
    let dispatcher = dispatcher(&registry);
    let req = request(&["一"], ContentPolicy::Strict);

    assert_eq!(dispatcher.dispatch(&req).await.unwrap().provider, "B");
    assert_eq!(dispatcher.dispatch(&req).await.unwrap().provider, "B");
    assert_eq!(a.calls(), 1);

    clock.advance(Duration::from_secs(30));
    assert_eq!(dispatcher.dispatch(&req).await.unwrap().provider, "A");
    assert_eq!(a.calls(), 2);
}

#[tokio::test]
async fn test_repeated_failures_remove_provider_until_reset() {
    let (registry, _clock) = registry();
    let flaky = add(
        &registry,
        "flaky",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::always(server_error()),
    );
    add(
        &registry,
        "backup",
        2,
        ContentPolicy::Strict,
        ScriptedProvider::echo("backup"),
    );
    let dispatcher = dispatcher(&registry);
    let req = request(&["一"], ContentPolicy::Strict);

    for _ in 0..3 {
        assert_eq!(dispatcher.dispatch(&req).await.unwrap().provider, "backup");
    }
    assert_eq!(registry.status("flaky").unwrap().health, ProviderHealth::Failed);

    dispatcher.dispatch(&req).await.unwrap();
    assert_eq!(flaky.calls(), 3);

    registry.reset("flaky").unwrap();
    dispatcher.dispatch(&req).await.unwrap();
    assert_eq!(flaky.calls(), 4);
}

#[tokio::test]
async fn test_cancel_before_start_makes_no_calls() {
    let (registry, _clock) = registry();
    let a = add(&registry, "A", 1, ContentPolicy::Strict, ScriptedProvider::echo("A"));
    let token = CancellationToken::new();
    token.cancel();

    let err = dispatcher(&registry)
        .dispatch_with_cancel(&request(&["一"], ContentPolicy::Strict), &token)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(a.calls(), 0);
}

#[tokio::test]
async fn test_cancel_in_flight_leaves_registry_untouched() {
    let (registry, _clock) = registry();
    let a = add(&registry, "A", 1, ContentPolicy::Strict, ScriptedProvider::hanging());
    let token = CancellationToken::new();
    let dispatcher = dispatcher(&registry);
    let req = request(&["一"], ContentPolicy::Strict);

    let canceller = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();
    };
    let (result, ()) = tokio::join!(dispatcher.dispatch_with_cancel(&req, &token), canceller);

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(a.calls(), 1);
    let status = registry.status("A").unwrap();
    assert_eq!(status.health, ProviderHealth::Available);
    assert_eq!(
        (status.success_count, status.failure_count, status.rate_limit_count),
        (0, 0, 0)
    );
}

#[tokio::test]
async fn test_unbounded_retry_hint_fails_over_with_capped_cooldown() {
    let (registry, clock) = registry();
    add(
        &registry,
        "A",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::echo("A").with_script([TranslationOutcome::RateLimited {
            retry_after: Some(Duration::MAX),
        }]),
    );
    add(&registry, "B", 2, ContentPolicy::Strict, ScriptedProvider::echo("B"));
    let dispatcher = dispatcher(&registry);
    let req = request(&["一"], ContentPolicy::Strict);

    assert_eq!(dispatcher.dispatch(&req).await.unwrap().provider, "B");
    let cap = Duration::from_secs(DEFAULT_MAX_RATE_LIMIT_COOLDOWN_SECS);
    assert_eq!(registry.status("A").unwrap().cooldown_remaining, Some(cap));

    clock.advance(cap);
    assert_eq!(dispatcher.dispatch(&req).await.unwrap().provider, "A");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatches_report_every_failure() {
    let registry = Arc::new(InMemoryProviderRegistry::new(RegistrySettings {
        failure_threshold: 10_000,
        ..RegistrySettings::default()
    }));
    let flaky = add(
        &registry,
        "flaky",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::always(server_error()).with_delay(Duration::from_millis(2)),
    );
    let dispatcher = TranslationDispatcher::new(registry.clone());

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher
                    .dispatch(&request(&["一", "二"], ContentPolicy::Strict))
                    .await
            })
        })
        .collect();
    for handle in handles {
        let err = handle.await.unwrap().unwrap_err();
        assert_eq!(err.tried_providers(), ["flaky"]);
    }

    let status = registry.status("flaky").unwrap();
    assert_eq!(flaky.calls(), 64);
    assert_eq!(status.failure_count, 64);
    assert_eq!(status.consecutive_failures, 64);
    assert_eq!(status.health, ProviderHealth::Available);
}
