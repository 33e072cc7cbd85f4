//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables, and
//! default values.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use gtx_domain::error::{Error, Result};

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `GTX_ROUTING__BATCH_SIZE`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) if config_path.exists() => {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            Some(config_path) => {
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        // Double underscore separates nested keys so snake_case fields survive
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing file among the default configuration locations
    pub fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    validate_routing_config(config)?;
    validate_providers_config(config)?;
    Ok(())
}

fn validate_routing_config(config: &AppConfig) -> Result<()> {
    let routing = &config.routing;
    if routing.failure_threshold == 0 {
        return Err(Error::configuration("Failure threshold must be at least 1"));
    }
    if routing.batch_size == 0 {
        return Err(Error::configuration("Batch size must be at least 1"));
    }
    if routing.max_concurrent_requests == 0 {
        return Err(Error::configuration(
            "Maximum concurrent requests must be at least 1",
        ));
    }
    if routing.max_attempts == Some(0) {
        return Err(Error::configuration(
            "Maximum attempts must be at least 1 when set",
        ));
    }
    if routing.max_rate_limit_cooldown_secs == 0 {
        return Err(Error::configuration(
            "Maximum rate-limit cool-down must be at least 1 second",
        ));
    }
    if routing.rate_limit_backoff_secs > routing.max_rate_limit_cooldown_secs {
        return Err(Error::configuration(format!(
            "Rate-limit backoff ({}s) exceeds the maximum cool-down ({}s)",
            routing.rate_limit_backoff_secs, routing.max_rate_limit_cooldown_secs
        )));
    }
    if routing.request_timeout_secs == 0 {
        return Err(Error::configuration("Request timeout cannot be 0"));
    }
    Ok(())
}

fn validate_providers_config(config: &AppConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for provider in &config.providers {
        if provider.name.trim().is_empty() {
            return Err(Error::configuration("Provider name cannot be empty"));
        }
        if provider.kind.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Provider '{}' must declare a kind",
                provider.name
            )));
        }
        if provider.timeout_secs == Some(0) {
            return Err(Error::configuration(format!(
                "Provider '{}' timeout cannot be 0",
                provider.name
            )));
        }
        if !seen.insert(provider.name.as_str()) {
            return Err(Error::configuration(format!(
                "Duplicate provider name '{}'",
                provider.name
            )));
        }
    }
    Ok(())
}
