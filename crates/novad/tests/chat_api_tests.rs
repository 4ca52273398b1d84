//! HTTP-level tests for the chat API.
//!
//! Drives the real router with fake provider backends. No network.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use nova_common::Catalog;
use novad::analytics::AnalyticsLog;
use novad::provider::{FakeBackend, ProviderChain, ProviderError};
use novad::server::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router_with_chain(chain: ProviderChain) -> Router {
    let state = AppState::new(Catalog::load().unwrap(), chain, AnalyticsLog::new(None));
    app(Arc::new(state))
}

/// Chain with a single primary backend that always answers `reply`.
fn single_backend(reply: &str) -> ProviderChain {
    ProviderChain::new(
        Some(Box::new(FakeBackend::always("primary", reply))),
        None,
        1,
        Duration::from_millis(1),
    )
}

async fn post_chat(router: Router, message: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "message": message }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn test_chat_reply_shape() {
    let reply = r#"{"intent":"list_categories","entities":{"order_id":null,"category":null,"original_term":null},"sentiment":"neutral","reasoning":"User asked what the store sells."}"#;
    let router = router_with_chain(single_backend(reply));

    let (status, body) = post_chat(router, "what do you sell?").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intent"], "list_categories");
    assert_eq!(body["type"], "category_list");
    assert_eq!(body["data"], json!(["electronics", "footwear", "clothing", "fitness"]));
    assert_eq!(body["meta"]["provider"], "primary");
    assert!(body["message"].as_str().unwrap().contains("categories"));
}

#[tokio::test]
async fn test_sentinel_returns_recorded_analytics() {
    let reply = r#"{"intent":"recommend_product","entities":{"category":"electronics","original_term":"headphones"},"sentiment":"neutral","reasoning":""}"#;
    let router = router_with_chain(single_backend(reply));

    post_chat(router.clone(), "any good headphones?").await;
    post_chat(router.clone(), "more headphones please").await;

    let (status, body) = post_chat(router, "GET_ANALYTICS").await;
    assert_eq!(status, StatusCode::OK);
    let records = body["analytics"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["intent"], "recommend_product");
    assert_eq!(records[0]["term"], "headphones");
    assert_eq!(records[1]["intent"], "recommend_product");
}

#[tokio::test]
async fn test_welcome_is_not_recorded() {
    let reply = r#"{"intent":"trigger_welcome","entities":{},"sentiment":"neutral","reasoning":""}"#;
    let router = router_with_chain(single_backend(reply));

    let (status, body) = post_chat(router.clone(), "__private_trigger__").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().starts_with("Welcome back!"));

    let (_, body) = post_chat(router, "GET_ANALYTICS").await;
    assert_eq!(body["analytics"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_missing_credentials_is_500() {
    let router = router_with_chain(ProviderChain::new(None, None, 1, Duration::from_millis(1)));

    let (status, body) = post_chat(router, "hello").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["intent"], "error");
    assert_eq!(body["message"], "Server Error: API Key missing.");
}

#[tokio::test]
async fn test_sentinel_requires_credentials_too() {
    let router = router_with_chain(ProviderChain::new(None, None, 1, Duration::from_millis(1)));

    let (status, body) = post_chat(router, "GET_ANALYTICS").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["intent"], "error");
}

#[tokio::test]
async fn test_all_providers_down_is_502() {
    let chain = ProviderChain::new(
        Some(Box::new(FakeBackend::always_error(
            "primary",
            ProviderError::Transport { provider: "primary", message: "refused".to_string() },
        ))),
        Some(Box::new(FakeBackend::always_error(
            "fallback",
            ProviderError::MissingCandidates { provider: "fallback" },
        ))),
        2,
        Duration::from_millis(1),
    );
    let router = router_with_chain(chain);

    let (status, body) = post_chat(router, "hello").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["intent"], "error");
    assert!(body["message"].as_str().unwrap().contains("trouble connecting"));
}

#[tokio::test]
async fn test_fallback_provider_appears_in_meta() {
    let chain = ProviderChain::new(
        Some(Box::new(FakeBackend::always("primary", ""))),
        Some(Box::new(FakeBackend::always(
            "fallback",
            r#"{"intent":"greeting","entities":{},"sentiment":"positive","reasoning":""}"#,
        ))),
        3,
        Duration::from_millis(1),
    );
    let router = router_with_chain(chain);

    let (status, body) = post_chat(router, "hi!").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intent"], "greeting");
    assert_eq!(body["meta"]["provider"], "fallback");
}

#[tokio::test]
async fn test_garbage_model_output_still_answers() {
    let router = router_with_chain(single_backend("Sorry, I can only chat about the weather."));

    let (status, body) = post_chat(router, "sing me a song").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intent"], "unknown");
    assert_eq!(body["type"], "text");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("I'm not sure I understand."));
    assert!(message.ends_with("Sorry, I can only chat about the weather."));
}

#[tokio::test]
async fn test_health_reports_catalog_and_backends() {
    let router = router_with_chain(single_backend(r#"{"intent":"greeting"}"#));

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["products_loaded"], 9);
    assert_eq!(body["orders_loaded"], 5);
    assert_eq!(body["backends"], json!(["primary"]));
}
