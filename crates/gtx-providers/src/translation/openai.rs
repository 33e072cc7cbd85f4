//! OpenAI-compatible Translation Provider
//!
//! Implements the `TranslationProvider` port against `POST {base}/chat/completions`.
//! Works with OpenAI and with any service speaking the same protocol:
//! OpenRouter, DeepSeek, xAI, Ollama, vLLM and friends.

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
    CONTENT_TYPE_JSON, DEFAULT_TEMPERATURE, EXTRA_APP_NAME, EXTRA_SITE_URL, EXTRA_TEMPERATURE,
    OPENAI_DEFAULT_BASE_URL, OPENAI_DEFAULT_MODEL, OPENAI_FINISH_CONTENT_FILTER,
    OPENROUTER_REFERER_HEADER, OPENROUTER_TITLE_HEADER,
};
use crate::http::HttpClientConfig;
use crate::translation::prompt::PromptBuilder;
use crate::utils::{HttpResponseUtils, decode_lines};

/// OpenAI-compatible chat completion provider
///
/// `api_key` is optional so local servers (Ollama, vLLM) work without one.
pub struct OpenAiTranslationProvider {
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    extra_headers: Vec<(&'static str, String)>,
    prompt: PromptBuilder,
    timeout: Duration,
    http_client: Client,
}

impl OpenAiTranslationProvider {
    /// Create a provider from its configuration and an HTTP client
    ///
    /// An unparseable `extra.temperature` is ignored in favor of the default.
    pub fn new(config: &ProviderConfig, timeout: Duration, http_client: Client) -> Self {
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(OPENAI_DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let mut extra_headers = Vec::new();
        if let Some(site_url) = config.extra(EXTRA_SITE_URL) {
            extra_headers.push((OPENROUTER_REFERER_HEADER, site_url.to_string()));
        }
        if let Some(app_name) = config.extra(EXTRA_APP_NAME) {
            extra_headers.push((OPENROUTER_TITLE_HEADER, app_name.to_string()));
        }

        Self {
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            base_url,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
            temperature: config
                .extra(EXTRA_TEMPERATURE)
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_TEMPERATURE),
            extra_headers,
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

    /// Send the chat completion request and get the response body
    async fn fetch_completion(&self, request: &TranslationRequest) -> Result<Value, TranslationOutcome> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": self.prompt.system_prompt(request.target_language())},
                {"role": "user", "content": PromptBuilder::user_message(request)},
            ],
            "temperature": self.temperature,
        });

        let mut builder = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }
        for (name, value) in &self.extra_headers {
            builder = builder.header(*name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpResponseUtils::transport_error("OpenAI", &e, self.timeout))?;

        HttpResponseUtils::check_and_parse(response, "OpenAI").await
    }

    /// Turn a chat completion body into an outcome
    fn parse_completion(body: &Value, expected: usize) -> TranslationOutcome {
        let Some(choice) = body["choices"].get(0) else {
            return TranslationOutcome::Failed(ProviderError::malformed(
                "Invalid response format: missing choices",
            ));
        };

        if choice["finish_reason"].as_str() == Some(OPENAI_FINISH_CONTENT_FILTER) {
            return TranslationOutcome::Failed(ProviderError::content_rejected(
                "Output blocked by the provider's content filter",
            ));
        }
        if let Some(refusal) = choice["message"]["refusal"].as_str() {
            return TranslationOutcome::Failed(ProviderError::content_rejected(format!(
                "Model refused: {refusal}"
            )));
        }

        let content = choice["message"]["content"].as_str().unwrap_or_default();
        if content.trim().is_empty() {
            return TranslationOutcome::Failed(ProviderError::malformed("Empty response from API"));
        }

        match decode_lines(content, expected) {
            Ok(texts) => TranslationOutcome::Success(texts),
            Err(error) => TranslationOutcome::Failed(error),
        }
    }
}

#[async_trait]
impl TranslationProvider for OpenAiTranslationProvider {
    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        debug!(model = %self.model, lines = request.len(), "Sending chat completion");
        match self.fetch_completion(request).await {
            Ok(body) => Self::parse_completion(&body, request.len()),
            Err(outcome) => outcome,
        }
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(TRANSLATION_PROVIDERS)]
static OPENAI_PROVIDER: TranslationProviderEntry = TranslationProviderEntry {
    name: "openai",
    description: "OpenAI-compatible chat completions (OpenAI, OpenRouter, DeepSeek, Ollama, vLLM)",
    factory: openai_factory,
};

fn openai_factory(config: &ProviderConfig) -> Result<Arc<dyn TranslationProvider>, String> {
    let http_config = HttpClientConfig::for_provider(config);
    let http_client = http_config.build_client()?;
    Ok(Arc::new(OpenAiTranslationProvider::new(
        config,
        http_config.timeout,
        http_client,
    )))
}
