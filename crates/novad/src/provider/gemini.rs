//! Generate-content fallback backend (Gemini).

use std::time::Duration;

use async_trait::async_trait;
use nova_common::{ChatRequest, MediaKind};
use serde_json::{json, Value};

use super::{truncate_body, GenerativeBackend, ProviderError};
use crate::config::ProviderConfig;

pub const GEMINI_ID: &str = "gemini";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(config: &ProviderConfig, api_key: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client, api_key, model: config.fallback_model.clone() })
    }

    fn request_body(system_prompt: &str, request: &ChatRequest) -> Value {
        let mut parts = vec![json!({"text": request.message})];
        for media in &request.media {
            parts.push(json!({
                "file_data": {
                    "file_uri": media.url,
                    "mime_type": mime_hint(media.kind),
                }
            }));
        }
        json!({
            "contents": [{"parts": parts}],
            "systemInstruction": {"parts": [{"text": system_prompt}]},
            "generationConfig": {"responseMimeType": "application/json"},
        })
    }
}

fn mime_hint(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image/*",
        MediaKind::Video => "video/*",
        MediaKind::Audio => "audio/*",
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    fn id(&self) -> &'static str {
        GEMINI_ID
    }

    async fn classify(
        &self,
        system_prompt: &str,
        request: &ChatRequest,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/{}:generateContent?key={}", GEMINI_BASE_URL, self.model, self.api_key);
        let body = Self::request_body(system_prompt, request);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport { provider: GEMINI_ID, message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::UpstreamStatus {
                provider: GEMINI_ID,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let reply: Value = response.json().await.map_err(|e| ProviderError::Transport {
            provider: GEMINI_ID,
            message: e.to_string(),
        })?;

        // Usable only when at least one candidate carries text.
        reply
            .get("candidates")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.get("parts"))
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("text"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or(ProviderError::MissingCandidates { provider: GEMINI_ID })
    }
}
