//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Routing defaults are defined in `gtx_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "gtx.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "gtx";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "GTX";

/// Separator between nested keys in environment variables (`GTX_ROUTING__BATCH_SIZE`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV: &str = "GTX_LOG";

/// Fallback file stem for the rolling log file
pub const LOG_FILE_STEM: &str = "gtx";

// ============================================================================
// PROVIDER CONSTANTS
// ============================================================================

/// Default per-request timeout for provider calls (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
