//! Nova Daemon - storefront assistant daemon
//!
//! Classifies customer chat through hosted models and answers from the
//! product catalog.

use anyhow::{Context, Result};
use nova_common::Catalog;
use novad::analytics::AnalyticsLog;
use novad::config::NovaConfig;
use novad::provider::ProviderChain;
use novad::server::{self, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("[BOOT] Nova Daemon v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = NovaConfig::load();
    info!("[BOOT] Config loaded");

    let catalog = Catalog::load().context("Failed to load catalog fixtures")?;
    info!(
        "[BOOT] Catalog ready: {} products, {} orders",
        catalog.products.len(),
        catalog.orders.len()
    );

    let providers =
        ProviderChain::from_config(&config.providers).context("Failed to build provider chain")?;
    if providers.has_backend() {
        info!("[BOOT] Provider backends: {}", providers.backend_ids().join(", "));
    } else {
        warn!("[BOOT] No provider credentials set; /chat will answer with a server error");
    }

    let analytics = AnalyticsLog::new(config.analytics.max_entries);
    let state = AppState::new(catalog, providers, analytics);

    info!("[READY] nova-assistant operational");
    server::run(state, &config.server.bind_addr).await
}
