//! Provider Connection Check
//!
//! Runs the connection test of every registered provider concurrently.
//! Results go back to the caller only; registry health is left untouched so a
//! check never pushes a provider out of rotation.

use std::time::{Duration, Instant};

use futures::future::join_all;
use gtx_domain::ports::SharedProviderRegistry;
use gtx_domain::{ProviderHealth, TranslationOutcome};
use tracing::{info, warn};

/// Result of one provider's connection test
#[derive(Debug, Clone)]
pub struct ConnectionCheck {
    /// Provider name
    pub provider: String,
    /// Adapter kind
    pub kind: String,
    /// Test outcome; `None` when the provider is disabled and was not contacted
    pub outcome: Option<TranslationOutcome>,
    /// Time the test took
    pub elapsed: Duration,
}

impl ConnectionCheck {
    /// Whether the provider answered with a translation
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Some(TranslationOutcome::Success(_)))
    }

    /// Whether the provider was skipped
    pub fn is_skipped(&self) -> bool {
        self.outcome.is_none()
    }

    /// One-line description of the outcome
    pub fn summary(&self) -> String {
        match &self.outcome {
            None => "skipped (disabled)".to_string(),
            Some(TranslationOutcome::Success(texts)) => {
                format!("ok in {}ms: \"{}\"", self.elapsed.as_millis(), texts.join(" / "))
            }
            Some(TranslationOutcome::RateLimited {
                retry_after: Some(delay),
            }) => format!("rate limited, retry after {}s", delay.as_secs()),
            Some(TranslationOutcome::RateLimited { retry_after: None }) => {
                "rate limited".to_string()
            }
            Some(TranslationOutcome::Failed(error)) => format!("failed: {error}"),
        }
    }
}

/// Test every registered provider, in registration order
///
/// Disabled providers are reported as skipped without being contacted.
pub async fn check_connections(registry: &SharedProviderRegistry) -> Vec<ConnectionCheck> {
    let checks = registry.statuses().into_iter().map(|status| async move {
        let provider = match status.health {
            ProviderHealth::Disabled => None,
            _ => registry.provider(&status.name),
        };
        let Some(provider) = provider else {
            return ConnectionCheck {
                provider: status.name,
                kind: status.kind,
                outcome: None,
                elapsed: Duration::ZERO,
            };
        };

        let started = Instant::now();
        let outcome = provider.test_connection().await;
        let elapsed = started.elapsed();

        match &outcome {
            TranslationOutcome::Success(_) => info!(
                provider = %status.name,
                elapsed_ms = elapsed.as_millis(),
                "Connection test passed"
            ),
            other => warn!(provider = %status.name, outcome = ?other, "Connection test failed"),
        }

        ConnectionCheck {
            provider: status.name,
            kind: status.kind,
            outcome: Some(outcome),
            elapsed,
        }
    });

    join_all(checks).await
}
