//! Bootstrap tests
//!
//! Build registries and dispatchers from configuration using the `null`
//! adapter, which needs no network.

use gtx_domain::ports::ProviderRegistry;
use gtx_domain::{ContentPolicy, Error, ProviderConfig, ProviderHealth, TranslationRequest};
use gtx_infrastructure::config::AppConfig;
use gtx_infrastructure::{build_batch_translator, build_dispatcher, build_registry};

fn config_with(providers: Vec<ProviderConfig>) -> AppConfig {
    AppConfig {
        providers,
        ..AppConfig::default()
    }
}

#[test]
fn test_build_registry_keeps_config_order_and_fills_timeout() {
    let mut config = config_with(vec![
        ProviderConfig::new("second", "null").with_priority(2),
        ProviderConfig::new("first", "null").with_priority(1).with_timeout_secs(5),
        ProviderConfig::new("off", "null").with_enabled(false),
    ]);
    config.routing.request_timeout_secs = 90;

    let registry = build_registry(&config).unwrap();

    let statuses = registry.statuses();
    let names: Vec<&str> = statuses.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["second", "first", "off"]);
    assert_eq!(statuses[2].health, ProviderHealth::Disabled);
    assert_eq!(registry.settings().failure_threshold, config.routing.failure_threshold);
}

#[test]
fn test_unknown_kind_fails_bootstrap() {
    let config = config_with(vec![ProviderConfig::new("mystery", "carrier-pigeon")]);
    let err = build_registry(&config).unwrap_err();
    assert!(matches!(err, Error::Provider { .. }));
    assert!(err.to_string().contains("carrier-pigeon"));
}

#[test]
fn test_max_attempts_from_config() {
    let mut config = config_with(vec![
        ProviderConfig::new("a", "null"),
        ProviderConfig::new("b", "null"),
    ]);
    assert_eq!(build_dispatcher(&config).unwrap().max_attempts(), 2);

    config.routing.max_attempts = Some(1);
    assert_eq!(build_dispatcher(&config).unwrap().max_attempts(), 1);
}

#[tokio::test]
async fn test_dispatch_through_null_provider() {
    let config = config_with(vec![ProviderConfig::new("echo", "null")]);
    let dispatcher = build_dispatcher(&config).unwrap();

    let request = TranslationRequest::new(
        vec!["hello".to_string(), "world".to_string()],
        "fr",
        ContentPolicy::Strict,
    )
    .unwrap();
    let translation = dispatcher.dispatch(&request).await.unwrap();

    assert_eq!(translation.provider, "echo");
    assert_eq!(translation.texts, ["hello", "world"]);
}

#[tokio::test]
async fn test_batch_translator_uses_routing_settings() {
    let mut config = config_with(vec![ProviderConfig::new("echo", "null")]);
    config.routing.batch_size = 2;

    let translator = build_batch_translator(&config).unwrap();
    let texts: Vec<String> = (1..=5).map(|i| format!("line {i}")).collect();
    let report = translator
        .translate(&texts, "de", ContentPolicy::Strict)
        .await
        .unwrap();

    assert_eq!(report.batches, 3);
    assert_eq!(report.texts, texts);
    assert_eq!(report.providers_used.get("echo"), Some(&3));
    assert!(report.is_complete());
}
