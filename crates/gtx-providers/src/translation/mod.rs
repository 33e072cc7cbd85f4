//! Translation provider implementations
//!
//! | Provider | Kind | Description |
//! |----------|------|-------------|
//! | [`OpenAiTranslationProvider`] | `openai` | OpenAI-compatible chat completions |
//! | [`AnthropicTranslationProvider`] | `anthropic` | Anthropic Messages API |
//! | [`NullTranslationProvider`] | `null` | Echo provider for tests and dry runs |

pub mod anthropic;
pub mod null;
pub mod openai;
pub mod prompt;

pub use anthropic::AnthropicTranslationProvider;
pub use null::NullTranslationProvider;
pub use openai::OpenAiTranslationProvider;
pub use prompt::PromptBuilder;
