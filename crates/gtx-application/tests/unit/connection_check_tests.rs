//! Provider connection check tests

use std::sync::Arc;
use std::time::Duration;

use gtx_application::check_connections;
use gtx_domain::ports::{ProviderRegistry, SharedProviderRegistry};
use gtx_domain::{ContentPolicy, ProviderConfig, ProviderError, ProviderHealth, TranslationOutcome};

use crate::test_utils::{ScriptedProvider, add, registry};

#[tokio::test]
async fn test_checks_every_provider_in_order() {
    let (registry, _clock) = registry();
    let ok = add(&registry, "ok", 2, ContentPolicy::Strict, ScriptedProvider::echo("ok"));
    add(
        &registry,
        "busy",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::always(TranslationOutcome::RateLimited {
            retry_after: Some(Duration::from_secs(7)),
        }),
    );
    add(
        &registry,
        "locked",
        3,
        ContentPolicy::Strict,
        ScriptedProvider::always(TranslationOutcome::Failed(ProviderError::authentication(
            "invalid key",
        ))),
    );
    let off = Arc::new(ScriptedProvider::echo("off"));
    registry.register(
        ProviderConfig::new("off", "scripted").with_enabled(false),
        off.clone(),
    );

    let shared: SharedProviderRegistry = registry.clone();
    let checks = check_connections(&shared).await;

    let names: Vec<&str> = checks.iter().map(|c| c.provider.as_str()).collect();
    assert_eq!(names, ["ok", "busy", "locked", "off"]);

    assert!(checks[0].is_ok());
    assert_eq!(
        checks[0].outcome,
        Some(TranslationOutcome::Success(vec!["[ok] Hello".to_string()]))
    );
    assert_eq!(ok.calls(), 1);

    assert!(!checks[1].is_ok());
    assert_eq!(checks[1].summary(), "rate limited, retry after 7s");

    assert!(!checks[2].is_ok());
    assert!(checks[2].summary().contains("invalid key"));

    assert!(checks[3].is_skipped());
    assert_eq!(off.calls(), 0);
}

#[tokio::test]
async fn test_checks_leave_registry_health_untouched() {
    let (registry, _clock) = registry();
    add(
        &registry,
        "busy",
        1,
        ContentPolicy::Strict,
        ScriptedProvider::always(TranslationOutcome::RateLimited { retry_after: None }),
    );
    add(
        &registry,
        "broken",
        2,
        ContentPolicy::Strict,
        ScriptedProvider::always(TranslationOutcome::Failed(ProviderError::server("503"))),
    );

    let shared: SharedProviderRegistry = registry.clone();
    for _ in 0..5 {
        check_connections(&shared).await;
    }

    for status in registry.statuses() {
        assert_eq!(status.health, ProviderHealth::Available, "{}", status.name);
        assert_eq!(
            (status.failure_count, status.rate_limit_count),
            (0, 0),
            "{}",
            status.name
        );
    }
}

#[tokio::test]
async fn test_empty_registry_has_no_checks() {
    let (registry, _clock) = registry();
    let shared: SharedProviderRegistry = registry;
    assert!(check_connections(&shared).await.is_empty());
}
