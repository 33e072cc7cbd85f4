//! # gtx
//!
//! Translate batches of text through a prioritized set of LLM providers.
//! Rate-limited providers cool down while the next candidate takes over;
//! providers that keep failing drop out until they are reset.
//!
//! ## Example
//!
//! ```ignore
//! use gtx::infrastructure::{ConfigLoader, build_batch_translator};
//! use gtx::ContentPolicy;
//!
//! let config = ConfigLoader::new().load()?;
//! let translator = build_batch_translator(&config)?;
//! let report = translator.translate(&lines, "en", ContentPolicy::Strict).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Value objects, ports and the error type
//! - `application` - Dispatcher and batch translator
//! - `infrastructure` - Registry, configuration, logging and bootstrap
//! - `cli` - The `gtx` command line

/// Domain layer - value objects, ports and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use gtx_domain::*;
}

/// Application layer - dispatch use cases
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use gtx_application::*;
}

/// Infrastructure layer - registry, config, logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use gtx_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{BatchReport, BatchTranslator, TranslationDispatcher};
pub use cli::{Cli, Command, run};
