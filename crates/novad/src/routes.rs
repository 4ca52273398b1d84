//! API routes for novad

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use nova_common::{AnalyticsReply, ChatReply, ChatRequest, HealthReply, ReplyMeta, GET_ANALYTICS};
use tracing::info;

use crate::error::ChatError;
use crate::extractor::extract_intent;
use crate::intent::Intent;
use crate::prompts::SYSTEM_PROMPT;
use crate::router::route_intent;
use crate::server::AppState;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Chat Routes
// ============================================================================

pub fn chat_routes() -> Router<AppStateArc> {
    Router::new().route("/chat", post(chat))
}

async fn chat(
    State(state): State<AppStateArc>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, ChatError> {
    if !state.providers.has_backend() {
        return Err(ChatError::MissingCredentials);
    }

    // Dashboard introspection: dump the log instead of routing.
    if req.message == GET_ANALYTICS {
        let analytics = state.analytics.snapshot().await;
        return Ok(Json(AnalyticsReply { analytics }).into_response());
    }

    let upstream = state.providers.classify(SYSTEM_PROMPT, &req).await?;
    let result = extract_intent(&upstream.text);
    info!("  Classified as {} via {}", result.intent, upstream.provider);

    // The proactive welcome is widget-triggered, not a user query.
    if result.kind() != Intent::TriggerWelcome {
        state
            .analytics
            .record(&result.intent, &result.analytics_term())
            .await;
    }

    let routed = route_intent(&result, &state.catalog);
    let reply = ChatReply {
        intent: result.intent,
        message: routed.message,
        kind: routed.kind,
        data: routed.data,
        meta: ReplyMeta { provider: upstream.provider.to_string(), timestamp: Utc::now() },
    };
    Ok(Json(reply).into_response())
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthReply> {
    Json(HealthReply {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        products_loaded: state.catalog.products.len(),
        orders_loaded: state.catalog.orders.len(),
        backends: state
            .providers
            .backend_ids()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}
