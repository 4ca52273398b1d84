//! Intent router.
//!
//! Maps a classified [`IntentResult`] onto one of the canned storefront
//! replies. Every branch reads the catalog deterministically; the welcome
//! branch's vibe pick is the only randomness.

use nova_common::{Catalog, Order, Product, ResponseKind, ResponsePayload, DEMO_CUSTOMER_ID};
use rand::seq::SliceRandom;
use tracing::debug;

use crate::intent::{Intent, IntentResult, Sentiment};

/// Prepended to every branch message except the welcome one when the model
/// judged the user upset.
const NEGATIVE_SENTIMENT_PREFIX: &str =
    "I'm truly sorry to hear that you're upset. Let me help you sort this out immediately. ";

/// Welcome themes: (category to feature, flavor line).
pub(crate) const WELCOME_VIBES: &[(&str, &str)] = &[
    ("electronics", "⚡ Power up your day! I've found some high-performance tech for you."),
    ("fitness", "💪 Feeling energetic? Check out these essentials to crush your goals."),
    ("footwear", "👟 Step into comfort. Here are the top trending kicks right now."),
];

/// One routed reply, ready to be wrapped into the wire envelope.
#[derive(Debug, Clone)]
pub struct RoutedReply {
    pub message: String,
    pub kind: ResponseKind,
    pub data: Option<ResponsePayload>,
}

impl RoutedReply {
    fn text(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ResponseKind::Text, data: None }
    }
}

/// Dispatch a classified request against the catalog.
pub fn route_intent(result: &IntentResult, catalog: &Catalog) -> RoutedReply {
    let mut routed = match result.kind() {
        Intent::TriggerWelcome => return route_welcome(catalog),
        Intent::CheckOrder => route_check_order(result, catalog),
        Intent::ListOrders => route_list_orders(catalog),
        Intent::ListCategories => RoutedReply {
            message: "We have a great selection! Here are our available categories:".to_string(),
            kind: ResponseKind::CategoryList,
            data: Some(ResponsePayload::Categories(catalog.category_names())),
        },
        Intent::ReturnPolicy => RoutedReply {
            message: "We want you to be happy with your purchase. Here are the details of our policy:"
                .to_string(),
            kind: ResponseKind::ReturnPolicy,
            data: None,
        },
        Intent::RecommendProduct => route_recommend(result, catalog),
        Intent::Greeting => RoutedReply::text(
            "Hi there! I'm Nova. I can help you find products (like 'gadgets' or 'sneakers') \
             or check your order status.",
        ),
        Intent::Unknown => route_unknown(result),
    };
    if result.sentiment == Sentiment::Negative {
        routed.message = format!("{}{}", NEGATIVE_SENTIMENT_PREFIX, routed.message);
    }
    routed
}

/// Proactive first-visit greeting: a random vibe plus two products from its
/// category. Never carries the negative-sentiment prefix.
fn route_welcome(catalog: &Catalog) -> RoutedReply {
    let (category, vibe) = WELCOME_VIBES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(WELCOME_VIBES[0]);
    let picks: Vec<Product> = catalog
        .products_in_category(category)
        .into_iter()
        .take(2)
        .cloned()
        .collect();
    RoutedReply {
        message: format!("Welcome back! {}", vibe),
        kind: ResponseKind::ProductList,
        data: Some(ResponsePayload::Products(picks)),
    }
}

fn route_check_order(result: &IntentResult, catalog: &Catalog) -> RoutedReply {
    let Some(id) = result.entities.order_id_value() else {
        let orders = demo_orders(catalog);
        if orders.is_empty() {
            return RoutedReply::text("I can check that for you. What is your Order ID?");
        }
        return order_history_reply(orders);
    };
    match catalog.find_order(id) {
        Some(order) => RoutedReply {
            message: "I found your order details. Here is the current status:".to_string(),
            kind: ResponseKind::OrderStatus,
            data: Some(ResponsePayload::Order(order.clone())),
        },
        None => {
            let orders = demo_orders(catalog);
            if orders.is_empty() {
                RoutedReply::text(format!(
                    "I looked for order \"{}\" but couldn't find it. Please double-check the ID.",
                    id
                ))
            } else {
                RoutedReply {
                    message: format!(
                        "I couldn't find an order matching \"{}\", but here are your recent orders:",
                        id
                    ),
                    kind: ResponseKind::OrderList,
                    data: Some(ResponsePayload::Orders(orders)),
                }
            }
        }
    }
}

fn route_list_orders(catalog: &Catalog) -> RoutedReply {
    let orders = demo_orders(catalog);
    if orders.is_empty() {
        RoutedReply::text("I couldn't find any past orders for your account.")
    } else {
        order_history_reply(orders)
    }
}

/// Two-stage product lookup: category entity first, free-text term second,
/// best sellers when both miss. The data payload is never an empty list.
fn route_recommend(result: &IntentResult, catalog: &Catalog) -> RoutedReply {
    let category = result
        .entities
        .category
        .as_deref()
        .map(str::to_lowercase)
        .filter(|c| !c.is_empty());
    let term = result
        .entities
        .original_term
        .as_deref()
        .map(str::to_lowercase)
        .filter(|t| !t.is_empty());

    let mut products: Vec<Product> = Vec::new();
    if let Some(cat) = category.as_deref() {
        // Models occasionally stringify a missing category as "null".
        if cat != "null" {
            products = catalog.products_in_category(cat).into_iter().cloned().collect();
        }
    }
    if products.is_empty() {
        if let Some(term) = term.as_deref() {
            products = catalog.search_products(term).into_iter().cloned().collect();
        }
    }

    if products.is_empty() {
        return RoutedReply {
            message: "I couldn't narrow it down to a specific category, but here are our \
                      Best Sellers that everyone loves:"
                .to_string(),
            kind: ResponseKind::ProductList,
            data: Some(ResponsePayload::Products(
                catalog.best_sellers(3).into_iter().cloned().collect(),
            )),
        };
    }

    let label = category.or(term).unwrap_or_default();
    let mut message = format!("Here are our top picks for {}.", label);
    if !result.reasoning.is_empty() {
        message.push(' ');
        message.push_str(&result.reasoning);
    }
    RoutedReply {
        message,
        kind: ResponseKind::ProductList,
        data: Some(ResponsePayload::Products(products)),
    }
}

fn route_unknown(result: &IntentResult) -> RoutedReply {
    debug!("Unmatched intent: {}", result.intent);
    let mut message =
        "I'm not sure I understand. Try asking for 'electronics', 'running shoes', or \
         'return policy'."
            .to_string();
    if let Some(reply) = result.reply.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        message.push(' ');
        message.push_str(reply);
    }
    RoutedReply::text(message)
}

fn demo_orders(catalog: &Catalog) -> Vec<Order> {
    catalog
        .orders_for_customer(DEMO_CUSTOMER_ID)
        .into_iter()
        .cloned()
        .collect()
}

fn order_history_reply(orders: Vec<Order>) -> RoutedReply {
    RoutedReply {
        message: format!("I found {} recent orders in your history:", orders.len()),
        kind: ResponseKind::OrderList,
        data: Some(ResponsePayload::Orders(orders)),
    }
}
