//! HTTP Response Utilities
//!
//! Maps HTTP responses and transport errors onto [`TranslationOutcome`] so
//! every API adapter classifies failures the same way.

use std::time::Duration;

use gtx_domain::{ProviderError, TranslationOutcome};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Response, StatusCode};

use crate::constants::{ERROR_BODY_PREVIEW_CHARS, ERROR_MSG_REQUEST_TIMEOUT};

/// Shorten a response body for error messages
fn preview(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(ERROR_BODY_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// # Returns
    /// The parsed body on 2xx, otherwise the outcome the adapter should return
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
    ) -> Result<serde_json::Value, TranslationOutcome> {
        let status = response.status();

        if !status.is_success() {
            let retry_after = Self::retry_after(response.headers());
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Self::classify_status(
                status,
                retry_after,
                provider_name,
                &error_text,
            ));
        }

        response.json().await.map_err(|e| {
            TranslationOutcome::Failed(ProviderError::malformed(format!(
                "{provider_name} response parse failed: {e}"
            )))
        })
    }

    /// Outcome for a non-success status
    pub fn classify_status(
        status: StatusCode,
        retry_after: Option<Duration>,
        provider_name: &str,
        body: &str,
    ) -> TranslationOutcome {
        let code = status.as_u16();
        let details = preview(body);
        match code {
            429 => TranslationOutcome::RateLimited { retry_after },
            401 | 403 => TranslationOutcome::Failed(ProviderError::authentication(format!(
                "{provider_name} authentication failed ({code}): {details}"
            ))),
            500..=599 => TranslationOutcome::Failed(ProviderError::server(format!(
                "{provider_name} server error ({code}): {details}"
            ))),
            _ => TranslationOutcome::Failed(ProviderError::other(format!(
                "{provider_name} request failed ({code}): {details}"
            ))),
        }
    }

    /// Delay from a `Retry-After` header given in seconds
    ///
    /// HTTP-date values are not interpreted; the registry falls back to its
    /// backoff floor for them. Values too large for a `Duration` saturate to
    /// `Duration::MAX` and are capped by the registry.
    pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
        let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
        if let Ok(secs) = value.parse::<u64>() {
            return Some(Duration::from_secs(secs));
        }
        let secs = value
            .parse::<f64>()
            .ok()
            .filter(|secs| !secs.is_nan() && *secs >= 0.0)?;
        Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }

    /// Outcome for a request that never produced a response
    pub fn transport_error(
        provider_name: &str,
        error: &reqwest::Error,
        timeout: Duration,
    ) -> TranslationOutcome {
        let message = if error.is_timeout() {
            format!("{provider_name} {ERROR_MSG_REQUEST_TIMEOUT} {timeout:?}")
        } else {
            format!("{provider_name} HTTP request failed: {error}")
        };
        TranslationOutcome::Failed(ProviderError::network(message))
    }
}
