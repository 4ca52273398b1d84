//! HTTP client for talking to novad.

use anyhow::{anyhow, Context, Result};
use nova_common::{AnalyticsReply, ChatReply, ChatRequest, HealthReply, GET_ANALYTICS};

/// Client for communicating with novad
pub struct NovadClient {
    base: String,
    http: reqwest::Client,
}

impl NovadClient {
    pub fn new(addr: &str) -> Self {
        Self {
            base: addr.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Send a chat message and decode the reply envelope.
    pub async fn chat(&self, message: &str) -> Result<ChatReply> {
        let response = self.post_chat(&ChatRequest::text(message)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Daemon error (HTTP {}): {}", status.as_u16(), error_message(response).await));
        }
        response
            .json()
            .await
            .context("Daemon returned an unreadable chat reply")
    }

    /// Fetch the analytics log via the chat sentinel.
    pub async fn analytics(&self) -> Result<AnalyticsReply> {
        let response = self.post_chat(&ChatRequest::text(GET_ANALYTICS)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Daemon error (HTTP {}): {}", status.as_u16(), error_message(response).await));
        }
        response
            .json()
            .await
            .context("Daemon returned an unreadable analytics dump")
    }

    pub async fn health(&self) -> Result<HealthReply> {
        let url = format!("{}/health", self.base);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| connect_help(&self.base))?;
        response
            .json()
            .await
            .context("Daemon returned an unreadable health report")
    }

    async fn post_chat(&self, request: &ChatRequest) -> Result<reqwest::Response> {
        let url = format!("{}/chat", self.base);
        self.http
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| connect_help(&self.base))
    }
}

fn connect_help(base: &str) -> String {
    format!(
        "Cannot reach novad at {}.\n\n\
         Is the daemon running? Start it with:\n  novad",
        base
    )
}

/// Pull the polite message out of the daemon's error envelope.
async fn error_message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.unwrap_or_default();
    body["message"]
        .as_str()
        .unwrap_or("unknown error")
        .to_string()
}
