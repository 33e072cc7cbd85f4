//! # Infrastructure Layer
//!
//! Technical concerns that support the application and domain layers.
//!
//! ## Module Categories
//!
//! ### Routing
//! | Module | Description |
//! |--------|-------------|
//! | [`routing`] | In-memory provider registry with health and rate-limit tracking |
//! | [`clock`] | System and manual clocks for rate-limit deadlines |
//!
//! ### Configuration & Bootstrap
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`bootstrap`] | Builds the dispatcher from configuration |
//! | [`constants`] | Centralized infrastructure constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

// Force-link gtx-providers so its linkme registrations are included
extern crate gtx_providers;

pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod routing;

// Re-export commonly used types
pub use bootstrap::{build_batch_translator, build_dispatcher, build_registry};
pub use clock::{ManualClock, SystemClock};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use routing::{InMemoryProviderRegistry, RegistrySettings};
