//! Provider health
//!
//! Live state the registry keeps for every provider, and the snapshot it
//! hands out for status reporting.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::ContentPolicy;

/// Health state of a registered provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderHealth {
    /// Eligible for ranking
    #[default]
    Available,
    /// Cooling down after a rate limit; eligible again once the deadline passes
    RateLimited,
    /// Crossed the consecutive-failure threshold; eligible only after a manual reset
    Failed,
    /// Switched off by configuration
    Disabled,
}

impl ProviderHealth {
    /// Lowercase name used in logs and CLI output
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::RateLimited => "rate_limited",
            Self::Failed => "failed",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for ProviderHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderStatus {
    /// Provider name
    pub name: String,
    /// Adapter kind
    pub kind: String,
    /// Ranking priority
    pub priority: i32,
    /// Content-policy class
    pub content_policy: ContentPolicy,
    /// Current health
    pub health: ProviderHealth,
    /// Failures since the last success
    pub consecutive_failures: u32,
    /// Successful translations since registration
    pub success_count: u64,
    /// Failed translations since registration
    pub failure_count: u64,
    /// Rate limits reported since registration
    pub rate_limit_count: u64,
    /// Most recent error message
    pub last_error: Option<String>,
    /// When the most recent error was recorded
    pub last_error_at: Option<DateTime<Utc>>,
    /// Time left before a rate-limited provider is eligible again
    pub cooldown_remaining: Option<Duration>,
}

impl ProviderStatus {
    /// Whether the provider would currently be considered for ranking
    pub fn is_eligible(&self) -> bool {
        match self.health {
            ProviderHealth::Available => true,
            ProviderHealth::RateLimited => self.cooldown_remaining.is_none(),
            ProviderHealth::Failed | ProviderHealth::Disabled => false,
        }
    }
}
