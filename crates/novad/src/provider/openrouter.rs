//! Chat-completions primary backend (OpenRouter).

use std::time::Duration;

use async_trait::async_trait;
use nova_common::{ChatRequest, MediaKind};
use serde_json::{json, Value};

use super::{truncate_body, GenerativeBackend, ProviderError};
use crate::config::ProviderConfig;

pub const OPENROUTER_ID: &str = "openrouter";

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

pub struct OpenRouterBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_output_tokens: u32,
    site_url: Option<String>,
    site_name: Option<String>,
}

impl OpenRouterBackend {
    pub fn new(config: &ProviderConfig, api_key: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model: config.primary_model.clone(),
            max_output_tokens: config.max_output_tokens,
            site_url: config.site_url.clone(),
            site_name: config.site_name.clone(),
        })
    }

    /// Plain string for text-only requests, a parts array when media rides
    /// along.
    fn user_content(request: &ChatRequest) -> Value {
        if request.media.is_empty() {
            return Value::String(request.message.clone());
        }
        let mut parts = vec![json!({"type": "text", "text": request.message})];
        for media in &request.media {
            let part = match media.kind {
                MediaKind::Image => json!({"type": "image_url", "image_url": {"url": media.url}}),
                MediaKind::Video => json!({"type": "video_url", "video_url": {"url": media.url}}),
                MediaKind::Audio => json!({"type": "audio_url", "audio_url": {"url": media.url}}),
            };
            parts.push(part);
        }
        Value::Array(parts)
    }
}

#[async_trait]
impl GenerativeBackend for OpenRouterBackend {
    fn id(&self) -> &'static str {
        OPENROUTER_ID
    }

    async fn classify(
        &self,
        system_prompt: &str,
        request: &ChatRequest,
    ) -> Result<String, ProviderError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": Self::user_content(request)},
            ],
            "temperature": 0.0,
            "max_tokens": self.max_output_tokens,
        });

        let mut req = self
            .client
            .post(OPENROUTER_URL)
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(url) = &self.site_url {
            req = req.header("HTTP-Referer", url);
        }
        if let Some(name) = &self.site_name {
            req = req.header("X-Title", name);
        }

        let response = req.send().await.map_err(|e| ProviderError::Transport {
            provider: OPENROUTER_ID,
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::UpstreamStatus {
                provider: OPENROUTER_ID,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let reply: Value = response.json().await.map_err(|e| ProviderError::Transport {
            provider: OPENROUTER_ID,
            message: e.to_string(),
        })?;

        reply
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or(ProviderError::MissingCandidates { provider: OPENROUTER_ID })
    }
}
