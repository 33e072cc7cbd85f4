//! In-memory provider registry
//!
//! One mutex guards the whole provider table. Every operation takes the lock
//! once, so rankings always see a consistent snapshot and concurrent reports
//! on the same provider serialize. Operations are O(number of providers),
//! which is small next to the network-bound translate calls.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use gtx_domain::constants::{
    DEFAULT_FAILURE_THRESHOLD, DEFAULT_MAX_RATE_LIMIT_COOLDOWN_SECS,
    DEFAULT_RATE_LIMIT_BACKOFF_SECS,
};
use gtx_domain::error::{Error, Result};
use gtx_domain::ports::{Clock, ProviderRegistry, TranslationProvider};
use gtx_domain::{ContentPolicy, ProviderConfig, ProviderError, ProviderHealth, ProviderStatus};
use tracing::{debug, info, warn};

use crate::clock::SystemClock;

/// Tunables for health tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Consecutive failures that mark a provider failed
    pub failure_threshold: u32,
    /// Cool-down used when a rate limit carries no retry hint
    pub rate_limit_backoff: Duration,
    /// Upper bound on any single cool-down
    pub max_rate_limit_cooldown: Duration,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            rate_limit_backoff: Duration::from_secs(DEFAULT_RATE_LIMIT_BACKOFF_SECS),
            max_rate_limit_cooldown: Duration::from_secs(DEFAULT_MAX_RATE_LIMIT_COOLDOWN_SECS),
        }
    }
}

impl RegistrySettings {
    /// Cool-down for a rate limit, capped at `max_rate_limit_cooldown`
    pub fn cooldown_for(&self, retry_after: Option<Duration>) -> Duration {
        retry_after
            .unwrap_or(self.rate_limit_backoff)
            .min(self.max_rate_limit_cooldown)
    }
}

/// Live record of one provider
struct ProviderEntry {
    config: ProviderConfig,
    provider: Arc<dyn TranslationProvider>,
    health: ProviderHealth,
    rate_limited_until: Option<Instant>,
    consecutive_failures: u32,
    success_count: u64,
    failure_count: u64,
    rate_limit_count: u64,
    last_error: Option<String>,
    last_error_at: Option<DateTime<Utc>>,
}

impl ProviderEntry {
    fn new(config: ProviderConfig, provider: Arc<dyn TranslationProvider>) -> Self {
        let health = if config.enabled {
            ProviderHealth::Available
        } else {
            ProviderHealth::Disabled
        };
        Self {
            config,
            provider,
            health,
            rate_limited_until: None,
            consecutive_failures: 0,
            success_count: 0,
            failure_count: 0,
            rate_limit_count: 0,
            last_error: None,
            last_error_at: None,
        }
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    /// Health the provider settles on when no cool-down applies
    fn resting_health(&self, failure_threshold: u32) -> ProviderHealth {
        if !self.config.enabled {
            ProviderHealth::Disabled
        } else if self.consecutive_failures >= failure_threshold {
            ProviderHealth::Failed
        } else {
            ProviderHealth::Available
        }
    }

    /// Return a rate-limited provider to service once its deadline has passed
    fn promote_if_elapsed(&mut self, now: Instant) {
        if self.health == ProviderHealth::RateLimited
            && self.rate_limited_until.is_none_or(|until| now >= until)
        {
            debug!(provider = %self.config.name, "Rate-limit cool-down elapsed");
            self.health = ProviderHealth::Available;
            self.rate_limited_until = None;
        }
    }

    fn record_error(&mut self, message: String) {
        self.last_error = Some(message);
        self.last_error_at = Some(Utc::now());
    }

    fn status(&self, now: Instant) -> ProviderStatus {
        let cooldown_remaining = match self.health {
            ProviderHealth::RateLimited => self
                .rate_limited_until
                .map(|until| until.saturating_duration_since(now))
                .filter(|remaining| !remaining.is_zero()),
            _ => None,
        };
        ProviderStatus {
            name: self.config.name.clone(),
            kind: self.config.kind.clone(),
            priority: self.config.priority,
            content_policy: self.config.content_policy,
            health: self.health,
            consecutive_failures: self.consecutive_failures,
            success_count: self.success_count,
            failure_count: self.failure_count,
            rate_limit_count: self.rate_limit_count,
            last_error: self.last_error.clone(),
            last_error_at: self.last_error_at,
            cooldown_remaining,
        }
    }
}

/// Provider registry kept in process memory
///
/// Shared by reference (`Arc`) between every dispatcher.
pub struct InMemoryProviderRegistry {
    /// Providers in insertion order
    entries: Mutex<Vec<ProviderEntry>>,
    /// Time source for rate-limit deadlines
    clock: Arc<dyn Clock>,
    /// Threshold and backoff floor
    settings: RegistrySettings,
}

impl InMemoryProviderRegistry {
    /// Create a registry using the system clock
    pub fn new(settings: RegistrySettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    /// Create a registry with a custom clock
    pub fn with_clock(settings: RegistrySettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            clock,
            settings,
        }
    }

    /// Threshold and backoff floor in use
    pub fn settings(&self) -> RegistrySettings {
        self.settings
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ProviderEntry>> {
        // No operation panics while holding the lock; recover the table if one ever did
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `f` to the named entry, or fail with `NotFound`
    fn update<F>(&self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut ProviderEntry, RegistrySettings),
    {
        let mut entries = self.lock();
        let entry = entries
            .iter_mut()
            .find(|e| e.name() == name)
            .ok_or_else(|| Error::not_found(format!("provider '{name}'")))?;
        f(entry, self.settings);
        Ok(())
    }

    /// Apply `f` to the named entry if it exists
    fn report<F>(&self, name: &str, f: F)
    where
        F: FnOnce(&mut ProviderEntry, RegistrySettings, Instant),
    {
        let now = self.clock.now();
        let mut entries = self.lock();
        match entries.iter_mut().find(|e| e.name() == name) {
            Some(entry) => f(entry, self.settings, now),
            None => debug!(provider = name, "Ignoring report for unregistered provider"),
        }
    }
}

impl Default for InMemoryProviderRegistry {
    fn default() -> Self {
        Self::new(RegistrySettings::default())
    }
}

impl ProviderRegistry for InMemoryProviderRegistry {
    fn register(&self, config: ProviderConfig, provider: Arc<dyn TranslationProvider>) {
        let threshold = self.settings.failure_threshold;
        let mut entries = self.lock();

        let Some(index) = entries.iter().position(|e| e.name() == config.name) else {
            info!(
                provider = %config.name,
                kind = %config.kind,
                priority = config.priority,
                content_policy = %config.content_policy,
                "Provider registered"
            );
            entries.push(ProviderEntry::new(config, provider));
            return;
        };

        let entry = &mut entries[index];
        if entry.config.kind == config.kind {
            entry.config = config;
            entry.provider = provider;
            if !entry.config.enabled {
                entry.health = ProviderHealth::Disabled;
                entry.rate_limited_until = None;
            } else if entry.health == ProviderHealth::Disabled {
                entry.health = entry.resting_health(threshold);
            }
            info!(provider = %entry.config.name, health = %entry.health, "Provider reconfigured");
        } else {
            info!(
                provider = %config.name,
                old_kind = %entry.config.kind,
                new_kind = %config.kind,
                "Provider kind changed, health reset"
            );
            *entry = ProviderEntry::new(config, provider);
        }
    }

    fn rank_candidates(
        &self,
        content_policy: ContentPolicy,
        excluded: &HashSet<String>,
    ) -> Vec<String> {
        let now = self.clock.now();
        let mut entries = self.lock();

        for entry in entries.iter_mut() {
            entry.promote_if_elapsed(now);
        }

        let mut ranked: Vec<&ProviderEntry> = entries
            .iter()
            .filter(|e| e.health == ProviderHealth::Available)
            .filter(|e| e.config.content_policy.permits(content_policy))
            .filter(|e| !excluded.contains(e.name()))
            .collect();
        // Stable sort keeps insertion order between equal priorities
        ranked.sort_by_key(|e| e.config.priority);

        ranked.into_iter().map(|e| e.config.name.clone()).collect()
    }

    fn provider(&self, name: &str) -> Option<Arc<dyn TranslationProvider>> {
        self.lock()
            .iter()
            .find(|e| e.name() == name)
            .map(|e| Arc::clone(&e.provider))
    }

    fn report_success(&self, name: &str) {
        self.report(name, |entry, _, _| {
            entry.consecutive_failures = 0;
            entry.success_count += 1;
            entry.rate_limited_until = None;
            entry.health = if entry.config.enabled {
                ProviderHealth::Available
            } else {
                ProviderHealth::Disabled
            };
        });
    }

    fn report_rate_limited(&self, name: &str, retry_after: Option<Duration>) {
        self.report(name, |entry, settings, now| {
            let cooldown = settings.cooldown_for(retry_after);
            entry.rate_limit_count += 1;
            entry.record_error(format!("rate limited for {}s", cooldown.as_secs()));
            if matches!(
                entry.health,
                ProviderHealth::Available | ProviderHealth::RateLimited
            ) {
                entry.health = ProviderHealth::RateLimited;
                // Fall back to the default cap when the configured one overflows the clock
                let until = now.checked_add(cooldown).or_else(|| {
                    now.checked_add(Duration::from_secs(DEFAULT_MAX_RATE_LIMIT_COOLDOWN_SECS))
                });
                entry.rate_limited_until = Some(until.unwrap_or(now));
                info!(
                    provider = %entry.config.name,
                    cooldown_secs = cooldown.as_secs(),
                    "Provider cooling down after rate limit"
                );
            }
        });
    }

    fn report_failure(&self, name: &str, error: &ProviderError) {
        self.report(name, |entry, settings, _| {
            entry.consecutive_failures += 1;
            entry.failure_count += 1;
            entry.record_error(error.to_string());
            if entry.consecutive_failures >= settings.failure_threshold
                && entry.health != ProviderHealth::Disabled
                && entry.health != ProviderHealth::Failed
            {
                entry.health = ProviderHealth::Failed;
                entry.rate_limited_until = None;
                warn!(
                    provider = %entry.config.name,
                    consecutive_failures = entry.consecutive_failures,
                    "Provider marked failed; excluded until reset"
                );
            }
        });
    }

    fn remove(&self, name: &str) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|e| e.name() != name);
        let removed = entries.len() != before;
        if removed {
            info!(provider = name, "Provider removed");
        }
        removed
    }

    fn set_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        self.update(name, |entry, settings| {
            entry.config.enabled = enabled;
            entry.rate_limited_until = None;
            entry.health = entry.resting_health(settings.failure_threshold);
            info!(provider = %entry.config.name, enabled, "Provider toggled");
        })
    }

    fn set_priority(&self, name: &str, priority: i32) -> Result<()> {
        self.update(name, |entry, _| {
            entry.config.priority = priority;
        })
    }

    fn reset(&self, name: &str) -> Result<()> {
        self.update(name, |entry, settings| {
            entry.consecutive_failures = 0;
            entry.rate_limited_until = None;
            entry.last_error = None;
            entry.last_error_at = None;
            entry.health = entry.resting_health(settings.failure_threshold);
            info!(provider = %entry.config.name, "Provider health reset");
        })
    }

    fn reset_all(&self) {
        let threshold = self.settings.failure_threshold;
        for entry in self.lock().iter_mut() {
            entry.consecutive_failures = 0;
            entry.rate_limited_until = None;
            entry.last_error = None;
            entry.last_error_at = None;
            entry.health = entry.resting_health(threshold);
        }
        info!("All provider health reset");
    }

    fn status(&self, name: &str) -> Option<ProviderStatus> {
        let now = self.clock.now();
        self.lock()
            .iter()
            .find(|e| e.name() == name)
            .map(|e| e.status(now))
    }

    fn statuses(&self) -> Vec<ProviderStatus> {
        let now = self.clock.now();
        self.lock().iter().map(|e| e.status(now)).collect()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

impl std::fmt::Debug for InMemoryProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.lock().iter().map(|e| e.config.name.clone()).collect();
        f.debug_struct("InMemoryProviderRegistry")
            .field("providers", &names)
            .field("settings", &self.settings)
            .finish()
    }
}
