//! Infrastructure ports

pub mod clock;
pub mod routing;

pub use clock::Clock;
pub use routing::{ProviderRegistry, SharedProviderRegistry};
