//! Anthropic Translation Provider
//!
//! Implements the `TranslationProvider` port using the Anthropic Messages API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gtx_application::ports::registry::{TRANSLATION_PROVIDERS, TranslationProviderEntry};
use gtx_domain::ports::TranslationProvider;
use gtx_domain::{ProviderConfig, ProviderError, TranslationOutcome, TranslationRequest};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::constants::{
    ANTHROPIC_API_VERSION, ANTHROPIC_DEFAULT_BASE_URL, ANTHROPIC_DEFAULT_MAX_TOKENS,
    ANTHROPIC_DEFAULT_MODEL, ANTHROPIC_STOP_REFUSAL, CONTENT_TYPE_JSON, DEFAULT_TEMPERATURE,
    EXTRA_MAX_TOKENS, EXTRA_TEMPERATURE,
};
use crate::http::HttpClientConfig;
use crate::translation::prompt::PromptBuilder;
use crate::utils::{HttpResponseUtils, decode_lines};

/// Anthropic Messages API provider
pub struct AnthropicTranslationProvider {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    prompt: PromptBuilder,
    timeout: Duration,
    http_client: Client,
}

impl AnthropicTranslationProvider {
    /// Create a provider from its configuration, API key and an HTTP client
    pub fn new(
        config: &ProviderConfig,
        api_key: String,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            api_key,
            base_url: config
                .base_url
                .as_deref()
                .unwrap_or(ANTHROPIC_DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| ANTHROPIC_DEFAULT_MODEL.to_string()),
            max_tokens: config
                .extra(EXTRA_MAX_TOKENS)
                .and_then(|t| t.parse().ok())
                .unwrap_or(ANTHROPIC_DEFAULT_MAX_TOKENS),
            temperature: config
                .extra(EXTRA_TEMPERATURE)
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_TEMPERATURE),
            prompt: PromptBuilder::from_config(config),
            timeout,
            http_client,
        }
    }

    /// Get the base URL for this provider
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn fetch_message(&self, request: &TranslationRequest) -> Result<Value, TranslationOutcome> {
        let payload = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "system": self.prompt.system_prompt(request.target_language()),
            "messages": [
                {"role": "user", "content": PromptBuilder::user_message(request)},
            ],
        });

        let response = self
            .http_client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::transport_error("Anthropic", &e, self.timeout))?;

        HttpResponseUtils::check_and_parse(response, "Anthropic").await
    }

    /// Turn a Messages API body into an outcome
    fn parse_message(body: &Value, expected: usize) -> TranslationOutcome {
        if body["stop_reason"].as_str() == Some(ANTHROPIC_STOP_REFUSAL) {
            return TranslationOutcome::Failed(ProviderError::content_rejected(
                "Model refused to translate the batch",
            ));
        }

        let Some(blocks) = body["content"].as_array() else {
            return TranslationOutcome::Failed(ProviderError::malformed(
                "Invalid response format: missing content array",
            ));
        };
        let text: String = blocks
            .iter()
            .filter(|block| block["type"].as_str() == Some("text"))
            .filter_map(|block| block["text"].as_str())
            .collect();
        if text.trim().is_empty() {
            return TranslationOutcome::Failed(ProviderError::malformed("Empty response from API"));
        }

        match decode_lines(&text, expected) {
            Ok(texts) => TranslationOutcome::Success(texts),
            Err(error) => TranslationOutcome::Failed(error),
        }
    }
}

#[async_trait]
impl TranslationProvider for AnthropicTranslationProvider {
    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        debug!(model = %self.model, lines = request.len(), "Sending message");
        match self.fetch_message(request).await {
            Ok(body) => Self::parse_message(&body, request.len()),
            Err(outcome) => outcome,
        }
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(TRANSLATION_PROVIDERS)]
static ANTHROPIC_PROVIDER: TranslationProviderEntry = TranslationProviderEntry {
    name: "anthropic",
    description: "Anthropic Messages API (Claude models)",
    factory: anthropic_factory,
};

fn anthropic_factory(config: &ProviderConfig) -> Result<Arc<dyn TranslationProvider>, String> {
    let api_key = config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| format!("Anthropic provider '{}' requires api_key", config.name))?;
    let http_config = HttpClientConfig::for_provider(config);
    let http_client = http_config.build_client()?;
    Ok(Arc::new(AnthropicTranslationProvider::new(
        config,
        api_key,
        http_config.timeout,
        http_client,
    )))
}
