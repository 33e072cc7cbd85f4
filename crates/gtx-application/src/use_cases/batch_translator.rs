//! Batch Translator
//!
//! Splits a list of source strings into fixed-size requests, dispatches them
//! concurrently and reassembles the translations in input order.

use std::collections::BTreeMap;
use std::ops::Range;

use futures::StreamExt;
use futures::stream;
use gtx_domain::constants::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENT_REQUESTS};
use gtx_domain::error::{Error, Result};
use gtx_domain::{ContentPolicy, TranslationRequest};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::dispatcher::TranslationDispatcher;

/// What to do with a batch whose dispatch failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BatchFailurePolicy {
    /// Keep the source strings for the failed batch and carry on
    #[default]
    KeepSource,
    /// Stop at the first failed batch and return its error
    Abort,
}

/// A batch that could not be translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Zero-based batch index
    pub batch_index: usize,
    /// Positions of the batch in the input
    pub lines: Range<usize>,
    /// Providers tried for this batch
    pub tried: Vec<String>,
    /// Terminal error message
    pub error: String,
}

/// Result of translating a whole list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Translated strings in input order (source strings for failed batches)
    pub texts: Vec<String>,
    /// Number of batches dispatched
    pub batches: usize,
    /// Batches translated per provider
    pub providers_used: BTreeMap<String, usize>,
    /// Batches that kept their source text
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every batch was translated
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of strings that kept their source text
    pub fn untranslated_lines(&self) -> usize {
        self.failures.iter().map(|f| f.lines.len()).sum()
    }
}

/// Runs lists of strings through a [`TranslationDispatcher`] in concurrent batches
#[derive(Debug, Clone)]
pub struct BatchTranslator {
    dispatcher: TranslationDispatcher,
    batch_size: usize,
    max_concurrent: usize,
    failure_policy: BatchFailurePolicy,
}

impl BatchTranslator {
    /// Create a translator with default batch size and concurrency
    pub fn new(dispatcher: TranslationDispatcher) -> Self {
        Self {
            dispatcher,
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrent: DEFAULT_MAX_CONCURRENT_REQUESTS,
            failure_policy: BatchFailurePolicy::default(),
        }
    }

    /// Set the number of strings per request (at least 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the number of requests in flight (at least 1)
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, failure_policy: BatchFailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Underlying dispatcher
    pub fn dispatcher(&self) -> &TranslationDispatcher {
        &self.dispatcher
    }

    /// Translate every string of `texts`
    pub async fn translate(
        &self,
        texts: &[String],
        target_language: &str,
        content_policy: ContentPolicy,
    ) -> Result<BatchReport> {
        self.translate_with_cancel(texts, target_language, content_policy, &CancellationToken::new())
            .await
    }

    /// Translate every string of `texts` unless `cancel` fires first
    ///
    /// Cancellation drops the in-flight requests and returns
    /// [`Error::Cancelled`]; nothing is reported for the dropped calls.
    pub async fn translate_with_cancel(
        &self,
        texts: &[String],
        target_language: &str,
        content_policy: ContentPolicy,
        cancel: &CancellationToken,
    ) -> Result<BatchReport> {
        if texts.is_empty() {
            return Ok(BatchReport::default());
        }

        let requests = texts
            .chunks(self.batch_size)
            .enumerate()
            .map(|(index, chunk)| {
                TranslationRequest::new(chunk.to_vec(), target_language, content_policy)
                    .map(|request| (index, request))
            })
            .collect::<Result<Vec<_>>>()?;
        let total = requests.len();

        info!(
            lines = texts.len(),
            batches = total,
            batch_size = self.batch_size,
            max_concurrent = self.max_concurrent,
            "Starting batch translation"
        );

        let dispatcher = &self.dispatcher;
        let mut results = stream::iter(requests)
            .map(|(index, request)| async move {
                let result = dispatcher.dispatch_with_cancel(&request, cancel).await;
                (index, request, result)
            })
            .buffer_unordered(self.max_concurrent);

        let mut slots: Vec<Option<Vec<String>>> = vec![None; total];
        let mut report = BatchReport {
            batches: total,
            ..BatchReport::default()
        };

        while let Some((index, request, result)) = results.next().await {
            match result {
                Ok(translation) => {
                    debug!(
                        batch = index + 1,
                        total,
                        provider = %translation.provider,
                        "Batch translated"
                    );
                    *report
                        .providers_used
                        .entry(translation.provider)
                        .or_default() += 1;
                    slots[index] = Some(translation.texts);
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(err) => match self.failure_policy {
                    BatchFailurePolicy::Abort => {
                        warn!(batch = index + 1, total, error = %err, "Batch failed, aborting");
                        return Err(err);
                    }
                    BatchFailurePolicy::KeepSource => {
                        warn!(
                            batch = index + 1,
                            total,
                            error = %err,
                            "Batch failed, keeping source text"
                        );
                        let start = index * self.batch_size;
                        report.failures.push(BatchFailure {
                            batch_index: index,
                            lines: start..start + request.len(),
                            tried: err.tried_providers().to_vec(),
                            error: err.to_string(),
                        });
                        slots[index] = Some(request.texts().to_vec());
                    }
                },
            }
        }

        report.failures.sort_by_key(|f| f.batch_index);
        report.texts = slots.into_iter().flatten().flatten().collect();

        info!(
            batches = total,
            failed = report.failures.len(),
            "Batch translation finished"
        );
        Ok(report)
    }
}
