//! Configuration loading and validation tests

use std::time::Duration;

use figment::Jail;
use gtx_application::BatchFailurePolicy;
use gtx_domain::ContentPolicy;
use gtx_domain::constants::DEFAULT_BATCH_SIZE;
use gtx_infrastructure::config::loader::validate_app_config;
use gtx_infrastructure::config::{AppConfig, ConfigLoader};
use gtx_infrastructure::constants::DEFAULT_LOG_LEVEL;
use tempfile::TempDir;

const SAMPLE: &str = r#"
[logging]
level = "debug"

[routing]
failure_threshold = 5
rate_limit_backoff_secs = 45
max_attempts = 2
on_batch_failure = "abort"

[[providers]]
name = "openrouter"
kind = "openai"
priority = 1
content_policy = "relaxed"
base_url = "https://openrouter.ai/api/v1"
api_key = "sk-or-test"

[providers.extra]
app_name = "gtx"

[[providers]]
name = "claude"
kind = "anthropic"
priority = 2
"#;

#[test]
fn test_load_defaults_without_file() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.routing.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.routing.max_attempts, None);
        assert!(config.providers.is_empty());
        Ok(())
    });
}

#[test]
fn test_load_toml_from_working_directory() {
    Jail::expect_with(|jail| {
        jail.create_file("gtx.toml", SAMPLE)?;
        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.routing.failure_threshold, 5);
        assert_eq!(config.routing.rate_limit_backoff_secs, 45);
        assert_eq!(config.routing.max_attempts, Some(2));
        assert_eq!(config.routing.on_batch_failure, BatchFailurePolicy::Abort);
        // Unset keys in a present section keep their defaults
        assert_eq!(config.routing.batch_size, DEFAULT_BATCH_SIZE);

        let names: Vec<&str> = config.providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["openrouter", "claude"]);
        let openrouter = config
            .provider("openrouter")
            .ok_or_else(|| "missing provider".to_string())?;
        assert_eq!(openrouter.content_policy, ContentPolicy::Relaxed);
        assert_eq!(openrouter.extra("app_name"), Some("gtx"));
        let claude = config
            .provider("claude")
            .ok_or_else(|| "missing provider".to_string())?;
        assert_eq!(claude.content_policy, ContentPolicy::Strict);
        assert!(claude.enabled);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("gtx.toml", SAMPLE)?;
        jail.set_env("GTX_ROUTING__BATCH_SIZE", "25");
        jail.set_env("GTX_LOGGING__JSON_FORMAT", "true");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.routing.batch_size, 25);
        assert!(config.logging.json_format);
        assert_eq!(config.routing.failure_threshold, 5);
        Ok(())
    });
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .load();
    assert!(result.is_err());
}

#[test]
fn test_duplicate_provider_names_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "gtx.toml",
            r#"
            [[providers]]
            name = "a"
            kind = "null"

            [[providers]]
            name = "a"
            kind = "openai"
            "#,
        )?;
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("Duplicate provider name 'a'"));
        Ok(())
    });
}

#[test]
fn test_routing_validation() {
    let mut config = AppConfig::default();
    assert!(validate_app_config(&config).is_ok());

    config.routing.failure_threshold = 0;
    assert!(validate_app_config(&config).is_err());

    config = AppConfig::default();
    config.routing.batch_size = 0;
    assert!(validate_app_config(&config).is_err());

    config = AppConfig::default();
    config.routing.max_concurrent_requests = 0;
    assert!(validate_app_config(&config).is_err());

    config = AppConfig::default();
    config.routing.max_attempts = Some(0);
    assert!(validate_app_config(&config).is_err());

    config = AppConfig::default();
    config.logging.level = "verbose".to_string();
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_rate_limit_cooldown_validation() {
    let mut config = AppConfig::default();
    config.routing.max_rate_limit_cooldown_secs = 0;
    assert!(validate_app_config(&config).is_err());

    config = AppConfig::default();
    config.routing.rate_limit_backoff_secs = u64::MAX;
    let err = validate_app_config(&config).unwrap_err();
    assert!(err.to_string().contains("exceeds the maximum cool-down"));

    config.routing.max_rate_limit_cooldown_secs = u64::MAX;
    assert!(validate_app_config(&config).is_ok());
    let settings = config.routing.registry_settings();
    assert_eq!(settings.max_rate_limit_cooldown, Duration::from_secs(u64::MAX));
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.toml");

    let mut original = AppConfig::default();
    original.routing.batch_size = 7;
    original.providers.push(
        gtx_domain::ProviderConfig::new("echo", "null")
            .with_priority(3)
            .with_extra("note", "dry run"),
    );

    let loader = ConfigLoader::new();
    loader.save_to_file(&original, &config_path).unwrap();

    let loaded = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_prefix("GTX_SAVE_LOAD_TEST")
        .load()
        .unwrap();
    assert_eq!(loaded, original);
}
