//! HTTP client configuration
//!
//! Controls timeouts, connection pooling and the user agent of the clients
//! used by the translation adapters.

use std::time::Duration;

use gtx_domain::ProviderConfig;
use reqwest::Client;

use crate::constants::DEFAULT_HTTP_TIMEOUT_SECS;

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Maximum idle connections per host
    pub max_idle_per_host: usize,
    /// Idle connection timeout
    pub idle_timeout: Duration,
    /// TCP keep-alive duration
    pub keepalive: Duration,
    /// Total timeout for requests
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 10,
            idle_timeout: Duration::from_secs(90),
            keepalive: Duration::from_secs(60),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: format!("gtx/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create configuration with custom timeout only
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }

    /// Configuration for one provider, honoring its `timeout_secs`
    pub fn for_provider(config: &ProviderConfig) -> Self {
        config
            .timeout_secs
            .map(|secs| Self::with_timeout(Duration::from_secs(secs)))
            .unwrap_or_default()
    }

    /// Build a client from this configuration
    pub fn build_client(&self) -> Result<Client, String> {
        Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(self.max_idle_per_host)
            .pool_idle_timeout(self.idle_timeout)
            .tcp_keepalive(self.keepalive)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))
    }
}
