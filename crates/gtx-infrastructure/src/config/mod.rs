//! Configuration management
//!
//! Application configuration is layered with figment: built-in defaults, then
//! a TOML file, then `GTX_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, RoutingConfig};
