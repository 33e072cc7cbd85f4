//! Translation Provider Registry
//!
//! Auto-registration system for translation adapters using linkme distributed
//! slices. Adapters register themselves via `#[linkme::distributed_slice]` and
//! are discovered at runtime by their `kind`.

use std::sync::Arc;

use gtx_domain::ProviderConfig;
use gtx_domain::ports::TranslationProvider;

/// Registry entry for translation adapters
///
/// Each adapter implementation registers itself with this entry using
/// `#[linkme::distributed_slice(TRANSLATION_PROVIDERS)]`. The entry contains
/// metadata and a factory function to create adapter instances.
pub struct TranslationProviderEntry {
    /// Adapter kind matched against [`ProviderConfig::kind`] (e.g. "openai", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create an adapter instance
    pub factory: fn(&ProviderConfig) -> Result<Arc<dyn TranslationProvider>, String>,
}

// Auto-collection via linkme distributed slices - adapters submit entries at compile time
#[linkme::distributed_slice]
pub static TRANSLATION_PROVIDERS: [TranslationProviderEntry] = [..];

/// Resolve a translation adapter by kind from the registry
///
/// # Returns
/// * `Ok(Arc<dyn TranslationProvider>)` - Created adapter instance
/// * `Err(String)` - Error message if the kind is unknown or creation failed
///
/// # Example
///
/// ```ignore
/// let config = ProviderConfig::new("local", "null");
/// let provider = resolve_translation_provider(&config)?;
/// ```
pub fn resolve_translation_provider(
    config: &ProviderConfig,
) -> Result<Arc<dyn TranslationProvider>, String> {
    let kind = config.kind.as_str();

    for entry in TRANSLATION_PROVIDERS {
        if entry.name == kind {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = TRANSLATION_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown translation provider kind '{kind}' for provider '{}'. Available kinds: {available:?}",
        config.name
    ))
}

/// List all registered translation adapters
///
/// Returns (kind, description) tuples, sorted by kind. Useful for CLI help.
pub fn list_translation_providers() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<_> = TRANSLATION_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    entries.sort_unstable_by_key(|(name, _)| *name);
    entries
}
