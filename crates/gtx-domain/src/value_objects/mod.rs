//! Domain value objects

mod content_policy;
mod health;
mod provider;
mod translation;

pub use content_policy::ContentPolicy;
pub use health::{ProviderHealth, ProviderStatus};
pub use provider::ProviderConfig;
pub use translation::{
    ProviderError, ProviderErrorKind, Translation, TranslationOutcome, TranslationRequest,
    TranslationResult,
};
