//! Chat endpoint failures.
//!
//! Everything the handler can fail with, mapped onto the storefront's
//! error envelope `{intent: "error", message}`. Messages stay polite and
//! never leak upstream details; those go to the log instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum ChatError {
    /// No provider credential is configured, so nothing can be classified.
    #[error("no provider credentials configured")]
    MissingCredentials,
    #[error(transparent)]
    Upstream(#[from] ProviderError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ChatError::MissingCredentials => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error: API Key missing.")
            }
            ChatError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "I'm having a little trouble connecting to my brain right now. \
                 Please try again in a moment! 🧠",
            ),
            ChatError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };
        error!("Chat request failed: {}", self);
        (status, Json(json!({ "intent": "error", "message": message }))).into_response()
    }
}
