//! Chat wire protocol.
//!
//! Request and reply shapes for `POST /chat`, the analytics introspection
//! payload, and the daemon health report. The storefront widget renders
//! these verbatim, so field names and enum spellings are part of the
//! contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Order, Product};

/// Sentinel message that returns the analytics log instead of routing.
pub const GET_ANALYTICS: &str = "GET_ANALYTICS";

/// Hardcoded identity standing in for the signed-in storefront customer.
pub const DEMO_CUSTOMER_ID: &str = "USER-001";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Optional media references forwarded to the provider alongside the text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaRef>,
}

impl ChatRequest {
    pub fn text(message: impl Into<String>) -> Self {
        Self { message: message.into(), media: Vec::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRef {
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

/// Which canned response shape the router produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Text,
    OrderStatus,
    ProductList,
    CategoryList,
    OrderList,
    ReturnPolicy,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Text => "text",
            ResponseKind::OrderStatus => "order_status",
            ResponseKind::ProductList => "product_list",
            ResponseKind::CategoryList => "category_list",
            ResponseKind::OrderList => "order_list",
            ResponseKind::ReturnPolicy => "return_policy",
        }
    }
}

/// Payload attached to a reply, shaped per [`ResponseKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Order(Order),
    Products(Vec<Product>),
    Categories(Vec<String>),
    Orders(Vec<Order>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyMeta {
    /// Which provider backend produced the classification.
    pub provider: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Intent string as classified upstream, echoed even when unrecognized.
    pub intent: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub data: Option<ResponsePayload>,
    pub meta: ReplyMeta,
}

/// One routed request, as recorded for the analytics dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    pub intent: String,
    pub term: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReply {
    pub analytics: Vec<AnalyticsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReply {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub products_loaded: usize,
    pub orders_loaded: usize,
    /// Provider backend ids that hold credentials, primary first.
    pub backends: Vec<String>,
}
