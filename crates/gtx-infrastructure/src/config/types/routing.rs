//! Routing and batching configuration types

use std::time::Duration;

use gtx_application::BatchFailurePolicy;
use gtx_domain::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_FAILURE_THRESHOLD, DEFAULT_MAX_CONCURRENT_REQUESTS,
    DEFAULT_MAX_RATE_LIMIT_COOLDOWN_SECS, DEFAULT_RATE_LIMIT_BACKOFF_SECS,
};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::routing::RegistrySettings;

/// Failover, rate-limit and batching settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Consecutive failures that mark a provider failed
    pub failure_threshold: u32,

    /// Cool-down applied to a rate limit without a retry hint (seconds)
    pub rate_limit_backoff_secs: u64,

    /// Longest cool-down any rate limit may impose (seconds)
    pub max_rate_limit_cooldown_secs: u64,

    /// Upper bound on provider calls per dispatch; defaults to the provider count
    pub max_attempts: Option<usize>,

    /// Requests the batch translator keeps in flight
    pub max_concurrent_requests: usize,

    /// Source strings per request
    pub batch_size: usize,

    /// Per-request timeout for providers that do not set their own (seconds)
    pub request_timeout_secs: u64,

    /// What the batch translator does when a batch cannot be translated
    pub on_batch_failure: BatchFailurePolicy,
}

impl RoutingConfig {
    /// Registry tunables derived from this section
    pub fn registry_settings(&self) -> RegistrySettings {
        RegistrySettings {
            failure_threshold: self.failure_threshold,
            rate_limit_backoff: Duration::from_secs(self.rate_limit_backoff_secs),
            max_rate_limit_cooldown: Duration::from_secs(self.max_rate_limit_cooldown_secs),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            rate_limit_backoff_secs: DEFAULT_RATE_LIMIT_BACKOFF_SECS,
            max_rate_limit_cooldown_secs: DEFAULT_MAX_RATE_LIMIT_COOLDOWN_SECS,
            max_attempts: None,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            batch_size: DEFAULT_BATCH_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            on_batch_failure: BatchFailurePolicy::default(),
        }
    }
}
