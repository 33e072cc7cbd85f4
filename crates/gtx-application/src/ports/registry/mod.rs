//! Provider factory registries

pub mod translation;

pub use translation::{
    TRANSLATION_PROVIDERS, TranslationProviderEntry, list_translation_providers,
    resolve_translation_provider,
};
