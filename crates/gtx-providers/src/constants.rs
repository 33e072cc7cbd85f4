//! Provider constants
//!
//! Endpoints, default models and header names used by the translation
//! adapters.

// ============================================================================
// HTTP
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Error message prefix for request timeouts
pub const ERROR_MSG_REQUEST_TIMEOUT: &str = "Request timed out after";

/// Fallback timeout when a provider config has none (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

/// Maximum characters of a response body quoted in error messages
pub const ERROR_BODY_PREVIEW_CHARS: usize = 300;

// ============================================================================
// OPENAI-COMPATIBLE
// ============================================================================

/// OpenAI API base URL
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";

/// OpenRouter attribution header carrying the site URL
pub const OPENROUTER_REFERER_HEADER: &str = "HTTP-Referer";

/// OpenRouter attribution header carrying the application name
pub const OPENROUTER_TITLE_HEADER: &str = "X-Title";

/// Finish reason reported when the output was filtered
pub const OPENAI_FINISH_CONTENT_FILTER: &str = "content_filter";

// ============================================================================
// ANTHROPIC
// ============================================================================

/// Anthropic API base URL
pub const ANTHROPIC_DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Default Anthropic model
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// Value of the `anthropic-version` header
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Output token cap sent with every Anthropic request
pub const ANTHROPIC_DEFAULT_MAX_TOKENS: u32 = 4096;

/// Stop reason reported when the model declined to answer
pub const ANTHROPIC_STOP_REFUSAL: &str = "refusal";

// ============================================================================
// PROMPTING
// ============================================================================

/// Sampling temperature for translation requests
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// `extra` key overriding the system prompt
pub const EXTRA_SYSTEM_PROMPT: &str = "system_prompt";

/// `extra` key holding a glossary appended to the system prompt
pub const EXTRA_VOCABULARY: &str = "vocabulary";

/// `extra` key overriding the sampling temperature
pub const EXTRA_TEMPERATURE: &str = "temperature";

/// `extra` key holding the OpenRouter site URL
pub const EXTRA_SITE_URL: &str = "site_url";

/// `extra` key holding the OpenRouter application name
pub const EXTRA_APP_NAME: &str = "app_name";

/// `extra` key overriding the Anthropic output token cap
pub const EXTRA_MAX_TOKENS: &str = "max_tokens";
