//! Translation value objects
//!
//! A [`TranslationRequest`] is one immutable batch of source strings. Each
//! provider call yields a [`TranslationOutcome`]; the dispatcher turns the
//! sequence of outcomes into a [`TranslationResult`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value_objects::ContentPolicy;

/// An immutable batch of strings to translate
///
/// Deserialization goes through [`TranslationRequest::new`], so a decoded
/// request is as valid as a constructed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TranslationRequestFields")]
pub struct TranslationRequest {
    texts: Vec<String>,
    target_language: String,
    content_policy: ContentPolicy,
}

impl TranslationRequest {
    /// Create a request, rejecting an empty batch or target language
    pub fn new(
        texts: Vec<String>,
        target_language: impl Into<String>,
        content_policy: ContentPolicy,
    ) -> Result<Self> {
        let target_language = target_language.into();
        if texts.is_empty() {
            return Err(Error::invalid_argument(
                "Translation request must contain at least one string",
            ));
        }
        if target_language.trim().is_empty() {
            return Err(Error::invalid_argument(
                "Translation request must name a target language",
            ));
        }
        Ok(Self {
            texts,
            target_language,
            content_policy,
        })
    }

    /// Source strings, in order
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Target-language code
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Content-policy class a provider must permit to serve this request
    pub fn content_policy(&self) -> ContentPolicy {
        self.content_policy
    }

    /// Number of source strings
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Always false for a constructed request
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Wire shape of a [`TranslationRequest`] before validation
#[derive(Deserialize)]
struct TranslationRequestFields {
    texts: Vec<String>,
    target_language: String,
    content_policy: ContentPolicy,
}

impl TryFrom<TranslationRequestFields> for TranslationRequest {
    type Error = Error;

    fn try_from(fields: TranslationRequestFields) -> Result<Self> {
        Self::new(fields.texts, fields.target_language, fields.content_policy)
    }
}

/// Category of a failed provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// Connection, DNS, TLS or timeout failure
    Network,
    /// Credentials rejected
    Authentication,
    /// Response could not be understood or did not align with the request
    MalformedResponse,
    /// Provider refused the content
    ContentRejected,
    /// Provider-side server error
    Server,
    /// Provider throttled the call (used only to describe the last error of a dispatch)
    RateLimited,
    /// Anything else
    Other,
}

impl ProviderErrorKind {
    /// Lowercase name used in messages
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Authentication => "authentication",
            Self::MalformedResponse => "malformed response",
            Self::ContentRejected => "content rejected",
            Self::Server => "server",
            Self::RateLimited => "rate limited",
            Self::Other => "other",
        }
    }
}

/// Error detail returned by a provider call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    /// Failure category
    pub kind: ProviderErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl ProviderError {
    /// Create a provider error
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transport failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Network, message)
    }

    /// Credentials rejected
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message)
    }

    /// Unparseable or misaligned response
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::MalformedResponse, message)
    }

    /// Content refused by the provider
    pub fn content_rejected(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::ContentRejected, message)
    }

    /// Server-side failure
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Server, message)
    }

    /// Any other failure
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }

    /// Describe a rate limit as an error, with the retry hint if one was given
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        let message = match retry_after {
            Some(delay) => format!("rate limited, retry after {}s", delay.as_secs()),
            None => "rate limited".to_string(),
        };
        Self::new(ProviderErrorKind::RateLimited, message)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind.as_str(), self.message)
    }
}

impl std::error::Error for ProviderError {}

/// Result of a single provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// Translated strings, aligned with the request
    Success(Vec<String>),
    /// Provider throttled the call
    RateLimited {
        /// Provider-supplied cool-down, if any
        retry_after: Option<Duration>,
    },
    /// Hard failure
    Failed(ProviderError),
}

impl TranslationOutcome {
    /// Shorthand for a hard failure
    pub fn failed(error: ProviderError) -> Self {
        Self::Failed(error)
    }
}

/// A successful dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Translated strings, aligned 1:1 with the request
    pub texts: Vec<String>,
    /// Name of the provider that produced them
    pub provider: String,
}

/// Result of one dispatch: a translation, or the terminal error that ended it
pub type TranslationResult = Result<Translation>;
