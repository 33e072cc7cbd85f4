//! Configuration types module

pub mod app;
pub mod logging;
pub mod routing;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use routing::RoutingConfig;
