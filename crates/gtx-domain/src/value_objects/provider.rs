//! Provider configuration
//!
//! Static description of one configured translation backend. Live health is
//! kept separately by the registry (see [`super::health`]).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PROVIDER_PRIORITY;
use crate::value_objects::ContentPolicy;

fn default_priority() -> i32 {
    DEFAULT_PROVIDER_PRIORITY
}

fn default_enabled() -> bool {
    true
}

/// Configuration for one translation provider
///
/// `name` identifies the provider inside a registry; `kind` selects the
/// adapter that talks to it (e.g. "openai", "anthropic", "null"). Several
/// providers may share a kind, for instance an OpenAI and an OpenRouter entry
/// both using the OpenAI-compatible adapter.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Unique name within the registry
    pub name: String,
    /// Adapter kind used to build the client
    pub kind: String,
    /// Lower values are tried first
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// How permissive this provider is toward sensitive content
    #[serde(default)]
    pub content_policy: ContentPolicy,
    /// Disabled providers stay registered but are never ranked
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API key for authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL for the provider API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Additional adapter-specific settings
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ProviderConfig {
    /// Create a config with the given name and adapter kind
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            priority: DEFAULT_PROVIDER_PRIORITY,
            content_policy: ContentPolicy::default(),
            enabled: true,
            model: None,
            api_key: None,
            base_url: None,
            timeout_secs: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the content-policy class
    pub fn with_content_policy(mut self, content_policy: ContentPolicy) -> Self {
        self.content_policy = content_policy;
        self
    }

    /// Set the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up an extra setting
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

// Keeps credentials out of logs
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("priority", &self.priority)
            .field("content_policy", &self.content_policy)
            .field("enabled", &self.enabled)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("extra", &self.extra)
            .finish()
    }
}
