//! Translation Dispatcher
//!
//! Executes a [`TranslationRequest`] against the best available provider,
//! falling through to the next candidate on rate limits and failures.
//!
//! A rate limit never blocks the dispatch: the throttled provider is excluded
//! for the rest of this request and its cool-down is recorded in the shared
//! registry, which keeps it out of rankings until the deadline passes.

use std::collections::HashSet;

use gtx_domain::error::Error;
use gtx_domain::ports::SharedProviderRegistry;
use gtx_domain::{
    ProviderError, Translation, TranslationOutcome, TranslationRequest, TranslationResult,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Sends translation requests through the provider registry with failover
///
/// Cheap to clone; every clone shares the same registry.
#[derive(Clone)]
pub struct TranslationDispatcher {
    registry: SharedProviderRegistry,
    max_attempts: Option<usize>,
}

impl TranslationDispatcher {
    /// Create a dispatcher whose attempt budget is the number of registered providers
    pub fn new(registry: SharedProviderRegistry) -> Self {
        Self {
            registry,
            max_attempts: None,
        }
    }

    /// Cap the number of provider calls per dispatch
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Registry this dispatcher reports to
    pub fn registry(&self) -> &SharedProviderRegistry {
        &self.registry
    }

    /// Attempt budget for the next dispatch
    pub fn max_attempts(&self) -> usize {
        self.max_attempts.unwrap_or_else(|| self.registry.len())
    }

    /// Translate a request, trying providers in rank order
    ///
    /// Returns [`Error::NoEligibleProvider`] when nothing could be tried and
    /// [`Error::ExhaustedAttempts`] when every attempt failed.
    pub async fn dispatch(&self, request: &TranslationRequest) -> TranslationResult {
        self.run(request, None).await
    }

    /// Translate a request unless `cancel` fires first
    ///
    /// A provider call that loses the race against cancellation is dropped
    /// and never reported to the registry.
    pub async fn dispatch_with_cancel(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> TranslationResult {
        self.run(request, Some(cancel)).await
    }

    #[instrument(
        name = "dispatch",
        skip_all,
        fields(lines = request.len(), target = request.target_language(), policy = %request.content_policy())
    )]
    async fn run(
        &self,
        request: &TranslationRequest,
        cancel: Option<&CancellationToken>,
    ) -> TranslationResult {
        let max_attempts = self.max_attempts();
        let mut excluded = HashSet::new();
        let mut tried: Vec<String> = Vec::new();
        let mut last_error: Option<ProviderError> = None;
        let mut attempts = 0;

        while attempts < max_attempts {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                return Err(Error::Cancelled);
            }

            let candidates = self
                .registry
                .rank_candidates(request.content_policy(), &excluded);
            let Some(chosen) = candidates.into_iter().next() else {
                break;
            };

            let Some(provider) = self.registry.provider(&chosen) else {
                // Removed between ranking and lookup
                excluded.insert(chosen);
                continue;
            };

            debug!(
                provider = %chosen,
                attempt = attempts + 1,
                max_attempts,
                "Dispatching translation batch"
            );

            let outcome = match cancel {
                Some(token) => tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        info!(provider = %chosen, "Dispatch cancelled, discarding in-flight call");
                        return Err(Error::Cancelled);
                    }
                    outcome = provider.translate(request) => outcome,
                },
                None => provider.translate(request).await,
            };

            attempts += 1;
            tried.push(chosen.clone());

            match check_alignment(request, outcome) {
                TranslationOutcome::Success(texts) => {
                    self.registry.report_success(&chosen);
                    if attempts > 1 {
                        info!(
                            provider = %chosen,
                            attempts,
                            "Translation succeeded after failover"
                        );
                    }
                    return Ok(Translation {
                        texts,
                        provider: chosen,
                    });
                }
                TranslationOutcome::RateLimited { retry_after } => {
                    warn!(
                        provider = %chosen,
                        retry_after_secs = retry_after.map(|d| d.as_secs()),
                        "Provider rate limited, trying next candidate"
                    );
                    self.registry.report_rate_limited(&chosen, retry_after);
                    last_error = Some(ProviderError::rate_limited(retry_after));
                }
                TranslationOutcome::Failed(provider_error) => {
                    warn!(
                        provider = %chosen,
                        error = %provider_error,
                        "Provider failed, trying next candidate"
                    );
                    self.registry.report_failure(&chosen, &provider_error);
                    last_error = Some(provider_error);
                }
            }

            excluded.insert(chosen);
        }

        match last_error {
            Some(last_error) => {
                error!(
                    tried = ?tried,
                    error = %last_error,
                    "All translation attempts failed"
                );
                Err(Error::ExhaustedAttempts { tried, last_error })
            }
            None => {
                warn!("No eligible translation provider");
                Err(Error::NoEligibleProvider {
                    content_policy: request.content_policy(),
                })
            }
        }
    }
}

impl std::fmt::Debug for TranslationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationDispatcher")
            .field("providers", &self.registry.len())
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

/// Demote a success whose line count does not match the request
fn check_alignment(request: &TranslationRequest, outcome: TranslationOutcome) -> TranslationOutcome {
    match outcome {
        TranslationOutcome::Success(texts) if texts.len() != request.len() => {
            TranslationOutcome::Failed(ProviderError::malformed(format!(
                "expected {} translated lines, got {}",
                request.len(),
                texts.len()
            )))
        }
        other => other,
    }
}
