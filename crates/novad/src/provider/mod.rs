//! Provider backends and the fallback chain.
//!
//! One trait, two real HTTP implementations (chat-completions primary,
//! generate-content fallback) and a fake for tests. The chain tries the
//! primary exactly once, then the fallback with retry and doubling backoff.

mod gemini;
mod openrouter;

pub use gemini::{GeminiBackend, GEMINI_ID};
pub use openrouter::{OpenRouterBackend, OPENROUTER_ID};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nova_common::ChatRequest;
use tracing::{info, warn};

use crate::config::ProviderConfig;

/// Provider errors. String-carrying variants keep this cloneable for
/// queued fake replies.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("no provider credentials configured")]
    NotConfigured,

    #[error("{provider} request failed: {message}")]
    Transport { provider: &'static str, message: String },

    #[error("{provider} returned HTTP {status}: {body}")]
    UpstreamStatus { provider: &'static str, status: u16, body: String },

    #[error("{provider} reply is missing completion candidates")]
    MissingCandidates { provider: &'static str },

    #[error("{provider} returned an empty reply")]
    EmptyReply { provider: &'static str },
}

/// One backend capable of classifying a chat request.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Stable identifier surfaced in reply metadata.
    fn id(&self) -> &'static str;

    /// Send the system prompt plus user payload, return raw model text.
    async fn classify(
        &self,
        system_prompt: &str,
        request: &ChatRequest,
    ) -> Result<String, ProviderError>;
}

#[async_trait]
impl<T: GenerativeBackend + ?Sized> GenerativeBackend for Arc<T> {
    fn id(&self) -> &'static str {
        (**self).id()
    }

    async fn classify(
        &self,
        system_prompt: &str,
        request: &ChatRequest,
    ) -> Result<String, ProviderError> {
        (**self).classify(system_prompt, request).await
    }
}

/// Raw text obtained from a backend, tagged with which one produced it.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub text: String,
    pub provider: &'static str,
}

/// Primary-then-fallback provider selection.
pub struct ProviderChain {
    primary: Option<Box<dyn GenerativeBackend>>,
    fallback: Option<Box<dyn GenerativeBackend>>,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl ProviderChain {
    pub fn new(
        primary: Option<Box<dyn GenerativeBackend>>,
        fallback: Option<Box<dyn GenerativeBackend>>,
        retry_attempts: u32,
        retry_backoff: Duration,
    ) -> Self {
        Self { primary, fallback, retry_attempts, retry_backoff }
    }

    /// Assemble the chain from whichever credentials the config holds.
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let primary: Option<Box<dyn GenerativeBackend>> = match &config.openrouter_api_key {
            Some(key) => Some(Box::new(OpenRouterBackend::new(config, key.clone())?)),
            None => None,
        };
        let fallback: Option<Box<dyn GenerativeBackend>> = match &config.gemini_api_key {
            Some(key) => Some(Box::new(GeminiBackend::new(config, key.clone())?)),
            None => None,
        };
        Ok(Self::new(
            primary,
            fallback,
            config.retry_attempts,
            Duration::from_millis(config.retry_backoff_ms),
        ))
    }

    /// True when at least one backend holds credentials.
    pub fn has_backend(&self) -> bool {
        self.primary.is_some() || self.fallback.is_some()
    }

    /// Backend ids in the order they would be tried.
    pub fn backend_ids(&self) -> Vec<&'static str> {
        self.primary
            .iter()
            .chain(self.fallback.iter())
            .map(|b| b.id())
            .collect()
    }

    /// Run the request through the chain.
    ///
    /// The primary gets one shot; empty text or any error falls through.
    /// The fallback is retried with doubling backoff, at least twice and
    /// up to `retry_attempts` times. If nothing usable comes back, the
    /// last error propagates.
    pub async fn classify(
        &self,
        system_prompt: &str,
        request: &ChatRequest,
    ) -> Result<ProviderReply, ProviderError> {
        let mut last_error = ProviderError::NotConfigured;

        if let Some(primary) = &self.primary {
            match primary.classify(system_prompt, request).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!("{} classified the request", primary.id());
                    return Ok(ProviderReply { text, provider: primary.id() });
                }
                Ok(_) => {
                    warn!("{} returned empty text, falling back", primary.id());
                    last_error = ProviderError::EmptyReply { provider: primary.id() };
                }
                Err(e) => {
                    warn!("{} failed, falling back: {}", primary.id(), e);
                    last_error = e;
                }
            }
        }

        if let Some(fallback) = &self.fallback {
            let attempts = self.retry_attempts.max(2);
            let mut backoff = self.retry_backoff;
            for attempt in 1..=attempts {
                match fallback.classify(system_prompt, request).await {
                    Ok(text) => {
                        info!("{} classified the request (attempt {})", fallback.id(), attempt);
                        return Ok(ProviderReply { text, provider: fallback.id() });
                    }
                    Err(e) => {
                        warn!(
                            "{} attempt {}/{} failed: {}",
                            fallback.id(),
                            attempt,
                            attempts,
                            e
                        );
                        last_error = e;
                    }
                }
                if attempt < attempts {
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }

        Err(last_error)
    }
}

/// Cap upstream error bodies so logs and error strings stay readable.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    if body.chars().count() <= MAX_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    }
}

/// Fake backend for tests. Replays queued replies in order; a single queued
/// reply repeats forever.
pub struct FakeBackend {
    id: &'static str,
    responses: std::sync::Mutex<Vec<Result<String, ProviderError>>>,
    call_count: std::sync::Mutex<usize>,
}

impl FakeBackend {
    pub fn new(id: &'static str, responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            id,
            responses: std::sync::Mutex::new(responses),
            call_count: std::sync::Mutex::new(0),
        }
    }

    /// Backend that always answers with the same text.
    pub fn always(id: &'static str, text: &str) -> Self {
        Self::new(id, vec![Ok(text.to_string())])
    }

    /// Backend that always fails the same way.
    pub fn always_error(id: &'static str, error: ProviderError) -> Self {
        Self::new(id, vec![Err(error)])
    }

    /// Number of classify calls made against this backend.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn classify(
        &self,
        _system_prompt: &str,
        _request: &ChatRequest,
    ) -> Result<String, ProviderError> {
        *self.call_count.lock().unwrap() += 1;

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(ProviderError::EmptyReply { provider: self.id });
        }
        if responses.len() == 1 {
            responses[0].clone()
        } else {
            responses.remove(0)
        }
    }
}
