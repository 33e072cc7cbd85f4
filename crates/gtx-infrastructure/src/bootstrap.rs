//! Bootstrap
//!
//! Wires configuration into a running dispatcher: every configured provider is
//! resolved through the linkme adapter registry and registered, in file order,
//! into one shared [`InMemoryProviderRegistry`].

use std::sync::Arc;

use gtx_application::ports::registry::resolve_translation_provider;
use gtx_application::{BatchTranslator, TranslationDispatcher};
use gtx_domain::error::{Error, Result};
use gtx_domain::ports::{ProviderRegistry, SharedProviderRegistry};
use tracing::info;

use crate::config::AppConfig;
use crate::routing::InMemoryProviderRegistry;

/// Build and populate the provider registry
///
/// Providers without their own timeout inherit `routing.request_timeout_secs`.
pub fn build_registry(config: &AppConfig) -> Result<Arc<InMemoryProviderRegistry>> {
    let registry = Arc::new(InMemoryProviderRegistry::new(
        config.routing.registry_settings(),
    ));

    for provider_config in &config.providers {
        let mut provider_config = provider_config.clone();
        provider_config
            .timeout_secs
            .get_or_insert(config.routing.request_timeout_secs);

        let provider = resolve_translation_provider(&provider_config).map_err(Error::provider)?;
        registry.register(provider_config, provider);
    }

    info!(providers = registry.len(), "Provider registry ready");
    Ok(registry)
}

/// Build a dispatcher over a freshly populated registry
pub fn build_dispatcher(config: &AppConfig) -> Result<TranslationDispatcher> {
    let registry: SharedProviderRegistry = build_registry(config)?;
    let dispatcher = TranslationDispatcher::new(registry);
    Ok(match config.routing.max_attempts {
        Some(max_attempts) => dispatcher.with_max_attempts(max_attempts),
        None => dispatcher,
    })
}

/// Build a batch translator using the routing batch settings
pub fn build_batch_translator(config: &AppConfig) -> Result<BatchTranslator> {
    let dispatcher = build_dispatcher(config)?;
    Ok(BatchTranslator::new(dispatcher)
        .with_batch_size(config.routing.batch_size)
        .with_max_concurrent(config.routing.max_concurrent_requests)
        .with_failure_policy(config.routing.on_batch_failure))
}
