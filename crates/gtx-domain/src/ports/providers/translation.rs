//! Translation Provider Port
//!
//! The single external boundary of the dispatcher: hand a batch to a backend
//! and get back one of three outcomes. Transport and wire format are the
//! adapter's business.

use async_trait::async_trait;

use crate::constants::{CONNECTION_TEST_LANGUAGE, CONNECTION_TEST_TEXT};
use crate::value_objects::{ContentPolicy, ProviderError, TranslationOutcome, TranslationRequest};

/// A pluggable translation backend
///
/// Implementations never return `Err`; every way a call can end is encoded in
/// [`TranslationOutcome`] so the dispatcher can decide between failover and
/// backoff without inspecting error strings.
///
/// # Example
///
/// ```ignore
/// let outcome = provider.translate(&request).await;
/// match outcome {
///     TranslationOutcome::Success(texts) => println!("{} lines", texts.len()),
///     TranslationOutcome::RateLimited { retry_after } => println!("back off {retry_after:?}"),
///     TranslationOutcome::Failed(error) => println!("failed: {error}"),
/// }
/// ```
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate every string of the request
    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome;

    /// Adapter kind, e.g. "openai"
    fn provider_name(&self) -> &str;

    /// Connection test for the provider (default implementation provided)
    async fn test_connection(&self) -> TranslationOutcome {
        // Default implementation - translate a single short line
        match TranslationRequest::new(
            vec![CONNECTION_TEST_TEXT.to_string()],
            CONNECTION_TEST_LANGUAGE,
            ContentPolicy::Strict,
        ) {
            Ok(request) => self.translate(&request).await,
            Err(e) => TranslationOutcome::Failed(ProviderError::other(e.to_string())),
        }
    }
}
