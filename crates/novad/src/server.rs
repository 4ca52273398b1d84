//! HTTP server for novad

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::Router;
use nova_common::Catalog;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analytics::AnalyticsLog;
use crate::provider::ProviderChain;
use crate::routes;

/// Application state shared across handlers
pub struct AppState {
    pub catalog: Catalog,
    pub providers: ProviderChain,
    pub analytics: AnalyticsLog,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(catalog: Catalog, providers: ProviderChain, analytics: AnalyticsLog) -> Self {
        Self { catalog, providers, analytics, start_time: Instant::now() }
    }
}

/// Build the router. The HTTP-level tests drive this directly.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::chat_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The storefront widget calls from the browser.
        .layer(CorsLayer::permissive())
}

/// Run the HTTP server
pub async fn run(state: AppState, addr: &str) -> Result<()> {
    let app = app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
