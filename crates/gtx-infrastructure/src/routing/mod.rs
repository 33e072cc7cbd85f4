//! Provider Routing Infrastructure
//!
//! Keeps the table of configured translation providers and their live health,
//! and answers "who should be tried next" for the dispatcher.
//!
//! ## Components
//!
//! - [`InMemoryProviderRegistry`] - Mutex-guarded registry with rate-limit
//!   cool-downs and a consecutive-failure threshold
//! - [`RegistrySettings`] - Threshold and backoff floor
//!
//! ## Usage
//!
//! ```ignore
//! let registry: SharedProviderRegistry = Arc::new(InMemoryProviderRegistry::new(settings));
//! registry.register(config, provider);
//! let dispatcher = TranslationDispatcher::new(registry);
//! ```

mod registry;

pub use registry::{InMemoryProviderRegistry, RegistrySettings};
