//! Clock Port
//!
//! Monotonic time source for rate-limit deadlines.

use std::time::Instant;

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Current monotonic instant
    fn now(&self) -> Instant;
}
