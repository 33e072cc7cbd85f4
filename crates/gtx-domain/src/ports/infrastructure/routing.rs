//! Provider Registry Port
//!
//! Defines the contract for the shared table of configured providers and
//! their live health. The dispatcher asks it for ranked candidates and
//! reports the outcome of every call back to it.
//!
//! Every method is atomic with respect to every other: implementations funnel
//! all reads and writes through one exclusion scope so that concurrent
//! dispatches never observe a half-updated provider.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::ports::providers::TranslationProvider;
use crate::value_objects::{ContentPolicy, ProviderConfig, ProviderError, ProviderStatus};

/// Shared handle to a provider registry
pub type SharedProviderRegistry = Arc<dyn ProviderRegistry>;

/// Registry of translation providers and their health
pub trait ProviderRegistry: Send + Sync {
    /// Add a provider, or replace the one with the same name
    ///
    /// Replacing keeps the provider's position in insertion order. Health and
    /// counters survive when the adapter kind is unchanged and are reset
    /// otherwise.
    fn register(&self, config: ProviderConfig, provider: Arc<dyn TranslationProvider>);

    /// Names of eligible providers, best first
    ///
    /// Eligible means: available (rate-limited providers whose cool-down has
    /// elapsed are promoted first), permitting `content_policy`, and not in
    /// `excluded`. Ordered by ascending priority, ties by insertion order.
    fn rank_candidates(&self, content_policy: ContentPolicy, excluded: &HashSet<String>)
    -> Vec<String>;

    /// Adapter registered under `name`
    fn provider(&self, name: &str) -> Option<Arc<dyn TranslationProvider>>;

    /// Record a successful call: failures reset, provider available
    fn report_success(&self, name: &str);

    /// Record a rate limit; `None` falls back to the configured backoff floor
    fn report_rate_limited(&self, name: &str, retry_after: Option<Duration>);

    /// Record a hard failure; crossing the threshold marks the provider failed
    fn report_failure(&self, name: &str, error: &ProviderError);

    /// Remove a provider; returns whether it existed
    fn remove(&self, name: &str) -> bool;

    /// Enable or disable a provider
    fn set_enabled(&self, name: &str, enabled: bool) -> Result<()>;

    /// Change a provider's priority
    fn set_priority(&self, name: &str, priority: i32) -> Result<()>;

    /// Clear failures and cool-down of one provider
    fn reset(&self, name: &str) -> Result<()>;

    /// Clear failures and cool-down of every provider
    fn reset_all(&self);

    /// Snapshot of one provider
    fn status(&self, name: &str) -> Option<ProviderStatus>;

    /// Snapshot of every provider, in insertion order
    fn statuses(&self) -> Vec<ProviderStatus>;

    /// Number of registered providers
    fn len(&self) -> usize;

    /// Whether no provider is registered
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
