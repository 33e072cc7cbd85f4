//! Shared fixtures: scripted providers and a registry on a manual clock

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gtx_application::TranslationDispatcher;
use gtx_domain::ports::{ProviderRegistry, TranslationProvider};
use gtx_domain::{ContentPolicy, ProviderConfig, TranslationOutcome, TranslationRequest};
use gtx_infrastructure::{InMemoryProviderRegistry, ManualClock, RegistrySettings};

type Respond = dyn Fn(&TranslationRequest) -> TranslationOutcome + Send + Sync;
type Delay = dyn Fn(&TranslationRequest) -> Duration + Send + Sync;

/// Provider that plays back queued outcomes, then falls back to a closure
pub struct ScriptedProvider {
    script: Mutex<VecDeque<TranslationOutcome>>,
    fallback: Box<Respond>,
    delay: Option<Box<Delay>>,
    hang: bool,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Translates every line to `[tag] line`
    pub fn echo(tag: &'static str) -> Self {
        Self::respond(move |request| {
            TranslationOutcome::Success(
                request
                    .texts()
                    .iter()
                    .map(|text| format!("[{tag}] {text}"))
                    .collect(),
            )
        })
    }

    /// Answers every call with `f`
    pub fn respond<F>(f: F) -> Self
    where
        F: Fn(&TranslationRequest) -> TranslationOutcome + Send + Sync + 'static,
    {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Box::new(f),
            delay: None,
            hang: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always returns `outcome`
    pub fn always(outcome: TranslationOutcome) -> Self {
        Self::respond(move |_| outcome.clone())
    }

    /// Never completes
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::echo("hang")
        }
    }

    /// Play these outcomes first
    pub fn with_script(self, outcomes: impl IntoIterator<Item = TranslationOutcome>) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .extend(outcomes);
        self
    }

    /// Sleep before answering
    pub fn with_delay(self, delay: Duration) -> Self {
        self.with_delay_fn(move |_| delay)
    }

    /// Sleep for a request-dependent time before answering
    pub fn with_delay_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&TranslationRequest) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Box::new(f));
        self
    }

    /// Number of translate calls started
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for ScriptedProvider {
    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(request)).await;
        }
        let scripted = self.script.lock().expect("script lock").pop_front();
        scripted.unwrap_or_else(|| (self.fallback)(request))
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Registry on a manual clock with default settings
pub fn registry() -> (Arc<InMemoryProviderRegistry>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let registry = Arc::new(InMemoryProviderRegistry::with_clock(
        RegistrySettings::default(),
        clock.clone(),
    ));
    (registry, clock)
}

/// Register `provider` under `name`
pub fn add(
    registry: &InMemoryProviderRegistry,
    name: &str,
    priority: i32,
    content_policy: ContentPolicy,
    provider: ScriptedProvider,
) -> Arc<ScriptedProvider> {
    let provider = Arc::new(provider);
    registry.register(
        ProviderConfig::new(name, "scripted")
            .with_priority(priority)
            .with_content_policy(content_policy),
        provider.clone(),
    );
    provider
}

/// Dispatcher over `registry`
pub fn dispatcher(registry: &Arc<InMemoryProviderRegistry>) -> TranslationDispatcher {
    TranslationDispatcher::new(registry.clone())
}

/// Build a request from string literals
pub fn request(lines: &[&str], content_policy: ContentPolicy) -> TranslationRequest {
    TranslationRequest::new(
        lines.iter().map(ToString::to_string).collect(),
        "en",
        content_policy,
    )
    .expect("valid request")
}

/// Owned strings from literals
pub fn strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(ToString::to_string).collect()
}
