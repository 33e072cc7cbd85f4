//! Application ports
//!
//! Re-exports the domain ports used by the use cases, plus the registry of
//! provider factories that adapters submit themselves to.

pub mod registry;

pub use gtx_domain::ports::{Clock, ProviderRegistry, SharedProviderRegistry, TranslationProvider};
