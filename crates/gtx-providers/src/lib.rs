//! # gtx - Provider Implementations
//!
//! Translation adapters implementing the `TranslationProvider` port defined in
//! `gtx-domain`. Each adapter registers a factory in the linkme
//! `TRANSLATION_PROVIDERS` slice under its kind.
//!
//! | Kind | Adapter | Backend |
//! |------|---------|---------|
//! | `openai` | [`OpenAiTranslationProvider`](translation::OpenAiTranslationProvider) | OpenAI-compatible chat completions (OpenAI, OpenRouter, DeepSeek, Ollama, vLLM, ...) |
//! | `anthropic` | [`AnthropicTranslationProvider`](translation::AnthropicTranslationProvider) | Anthropic Messages API |
//! | `null` | [`NullTranslationProvider`](translation::NullTranslationProvider) | Echoes the input, no network |
//!
//! ## Usage
//!
//! ```ignore
//! use gtx_application::ports::registry::resolve_translation_provider;
//!
//! let provider = resolve_translation_provider(&ProviderConfig::new("local", "null"))?;
//! ```

pub use gtx_domain::ports::TranslationProvider;

/// Provider-specific constants
pub mod constants;

/// HTTP client configuration for API-based providers
pub mod http;

/// Shared utilities for provider implementations
pub mod utils;

/// Translation provider implementations
pub mod translation;
