//! Domain ports
//!
//! Traits at the seams between layers. Provider adapters implement
//! [`TranslationProvider`]; the infrastructure layer implements
//! [`ProviderRegistry`] and [`Clock`].

pub mod infrastructure;
pub mod providers;

pub use infrastructure::{Clock, ProviderRegistry, SharedProviderRegistry};
pub use providers::TranslationProvider;
