//! Domain layer constants
//!
//! Defaults for routing decisions. Every value here can be overridden through
//! configuration; infrastructure-specific constants live in
//! `gtx_infrastructure::constants`.

// ============================================================================
// ROUTING DOMAIN CONSTANTS
// ============================================================================

/// Consecutive failures after which a provider is marked failed
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// Cool-down applied when a provider reports a rate limit without a retry hint
pub const DEFAULT_RATE_LIMIT_BACKOFF_SECS: u64 = 30;

/// Longest cool-down a single rate limit can impose, whatever the provider asks for
pub const DEFAULT_MAX_RATE_LIMIT_COOLDOWN_SECS: u64 = 3_600;

/// Priority assigned to providers configured without one
pub const DEFAULT_PROVIDER_PRIORITY: i32 = 10;

// ============================================================================
// BATCHING DOMAIN CONSTANTS
// ============================================================================

/// Number of source strings sent to a provider in one request
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Number of requests dispatched concurrently by the batch translator
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Source line sent by the default provider connection test
pub const CONNECTION_TEST_TEXT: &str = "Hello";

/// Target language of the default provider connection test
pub const CONNECTION_TEST_LANGUAGE: &str = "English";

/// Prefix of the per-line keys used on the provider wire format (`Line1`, `Line2`, ...)
pub const LINE_KEY_PREFIX: &str = "Line";
