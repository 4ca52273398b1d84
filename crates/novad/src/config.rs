//! Configuration management for novad.
//!
//! Loads settings from /etc/nova/config.toml or uses defaults. Provider
//! credentials come from the environment only, never from the file on disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/nova/config.toml";

/// Environment variable holding the chat-completions (primary) API key.
pub const OPENROUTER_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Environment variable holding the generate-content (fallback) API key.
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

/// Optional attribution pair forwarded to the primary provider.
pub const SITE_URL_ENV: &str = "NOVA_SITE_URL";
pub const SITE_NAME_ENV: &str = "NOVA_SITE_NAME";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the chat API
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:7850".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr() }
    }
}

/// Upstream provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model requested through the chat-completions primary
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model requested through the generate-content fallback
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Output token budget for the primary call
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Fallback attempts before the request fails
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Initial fallback backoff in milliseconds, doubled per attempt
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Filled from the environment by [`NovaConfig::load`], never from disk
    #[serde(skip)]
    pub openrouter_api_key: Option<String>,

    #[serde(skip)]
    pub gemini_api_key: Option<String>,

    #[serde(skip)]
    pub site_url: Option<String>,

    #[serde(skip)]
    pub site_name: Option<String>,
}

fn default_primary_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_fallback_model() -> String {
    "gemini-2.5-flash-preview-09-2025".to_string()
}

fn default_max_output_tokens() -> u32 {
    512
}

fn default_retry_attempts() -> u32 {
    3 // initial call plus two retries
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            max_output_tokens: default_max_output_tokens(),
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            request_timeout_secs: default_request_timeout(),
            openrouter_api_key: None,
            gemini_api_key: None,
            site_url: None,
            site_name: None,
        }
    }
}

/// Analytics log configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Ring-buffer capacity. Unset means the log grows for the process
    /// lifetime, matching the storefront's demo behavior.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NovaConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub providers: ProviderConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl NovaConfig {
    /// Load config from file or defaults, then pull credentials from the
    /// environment.
    pub fn load() -> Self {
        let mut config = Self::load_from_path(CONFIG_PATH).unwrap_or_else(|e| {
            warn!("Config not found, using defaults: {}", e);
            NovaConfig::default()
        });
        config.apply_env();
        config
    }

    fn load_from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: NovaConfig = toml::from_str(&content)?;
        info!("Loaded config from {}", path);
        Ok(config)
    }

    /// Read provider credentials and attribution from the environment.
    /// Blank values count as absent.
    pub fn apply_env(&mut self) {
        self.providers.openrouter_api_key = env_non_empty(OPENROUTER_KEY_ENV);
        self.providers.gemini_api_key = env_non_empty(GEMINI_KEY_ENV);
        self.providers.site_url = env_non_empty(SITE_URL_ENV);
        self.providers.site_name = env_non_empty(SITE_NAME_ENV);
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = NovaConfig::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:7850");
        assert_eq!(config.providers.retry_attempts, 3);
        assert_eq!(config.providers.retry_backoff_ms, 500);
        assert!(config.providers.openrouter_api_key.is_none());
        assert!(config.analytics.max_entries.is_none());
    }

    #[test]
    fn test_parse_toml_partial() {
        let toml_str = r#"
[server]
bind_addr = "127.0.0.1:9000"

[providers]
primary_model = "openai/gpt-4o-mini"
retry_attempts = 5
"#;
        let config: NovaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.providers.primary_model, "openai/gpt-4o-mini");
        assert_eq!(config.providers.retry_attempts, 5);
        // Defaults for missing fields
        assert_eq!(config.providers.max_output_tokens, 512);
        assert_eq!(config.providers.fallback_model, default_fallback_model());
    }

    #[test]
    fn test_analytics_cap_parse() {
        let config: NovaConfig = toml::from_str("[analytics]\nmax_entries = 128\n").unwrap();
        assert_eq!(config.analytics.max_entries, Some(128));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[providers]\nrequest_timeout_secs = 5").unwrap();
        let config = NovaConfig::load_from_path(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.providers.request_timeout_secs, 5);
    }

    #[test]
    fn test_keys_never_come_from_disk() {
        let toml_str = r#"
[providers]
openrouter_api_key = "sk-leaked"
"#;
        // Unknown-to-serde fields are ignored; the key slot stays empty.
        let config: NovaConfig = toml::from_str(toml_str).unwrap();
        assert!(config.providers.openrouter_api_key.is_none());
    }
}
