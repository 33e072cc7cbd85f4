//! Null translation provider for testing and dry runs
//!
//! Returns the source strings unchanged. No network, always succeeds.

use std::sync::Arc;

use async_trait::async_trait;
use gtx_application::ports::registry::{TRANSLATION_PROVIDERS, TranslationProviderEntry};
use gtx_domain::ports::TranslationProvider;
use gtx_domain::{ProviderConfig, TranslationOutcome, TranslationRequest};

/// Echoing translation provider
///
/// # Example
///
/// ```rust
/// use gtx_providers::translation::NullTranslationProvider;
/// use gtx_providers::TranslationProvider;
///
/// let provider = NullTranslationProvider::new();
/// assert_eq!(provider.provider_name(), "null");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslationProvider;

impl NullTranslationProvider {
    /// Create a new null translation provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TranslationProvider for NullTranslationProvider {
    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        TranslationOutcome::Success(request.texts().to_vec())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(TRANSLATION_PROVIDERS)]
static NULL_PROVIDER: TranslationProviderEntry = TranslationProviderEntry {
    name: "null",
    description: "Echoes the source text (dry runs and testing)",
    factory: null_factory,
};

fn null_factory(_config: &ProviderConfig) -> Result<Arc<dyn TranslationProvider>, String> {
    Ok(Arc::new(NullTranslationProvider::new()))
}
