//! Product and order catalog.
//!
//! Static fixture data standing in for a real storefront database. Loaded
//! once at startup from embedded JSON and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PRODUCTS_JSON: &str = include_str!("../data/products.json");
const ORDERS_JSON: &str = include_str!("../data/orders.json");

/// Product category. Lowercase on the wire ("electronics").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Electronics,
    Footwear,
    Clothing,
    Fitness,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Footwear => "footwear",
            ProductCategory::Clothing => "clothing",
            ProductCategory::Fitness => "fitness",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order fulfilment status. Serialized with the capitalized variant name
/// ("Shipped") because the storefront UI renders it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Shipped,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Processing => "Processing",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: ProductCategory,
    pub price: f64,
    pub stock: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    /// Product ids, in the order they were added to the cart.
    pub items: Vec<String>,
    pub order_date: String,
    pub delivery_est: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("embedded {table} fixture is not valid JSON: {source}")]
    Fixture {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Strip everything that is not a letter or digit and lowercase the rest.
///
/// Both the stored order id and the requested one go through this before
/// matching, so "ord 7601", "ORD-7601" and "#7601" all resolve the same way.
pub fn normalize_order_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Immutable product and order tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

impl Catalog {
    /// Parse the embedded fixture tables.
    pub fn load() -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(PRODUCTS_JSON)
            .map_err(|source| CatalogError::Fixture { table: "products", source })?;
        let orders: Vec<Order> = serde_json::from_str(ORDERS_JSON)
            .map_err(|source| CatalogError::Fixture { table: "orders", source })?;
        Ok(Self { products, orders })
    }

    /// Build a catalog from explicit tables. Used by tests.
    pub fn new(products: Vec<Product>, orders: Vec<Order>) -> Self {
        Self { products, orders }
    }

    /// Products whose category exactly matches `category`, case-insensitive.
    pub fn products_in_category(&self, category: &str) -> Vec<&Product> {
        let wanted = category.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.category.as_str() == wanted)
            .collect()
    }

    /// Products whose name or description contains `term`, case-insensitive.
    pub fn search_products(&self, term: &str) -> Vec<&Product> {
        let needle = term.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Distinct category names in first-seen product-table order.
    pub fn category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for product in &self.products {
            let name = product.category.as_str().to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Orders belonging to `customer_id`, in table order.
    pub fn orders_for_customer(&self, customer_id: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .collect()
    }

    /// First order whose normalized id contains the normalized requested id.
    ///
    /// Substring match, not exact: "7601" finds "ORD-7601". Table order is
    /// the tie-break when several ids share the fragment. An id that
    /// normalizes to nothing (all punctuation) matches no order; every id
    /// contains the empty string, so it would otherwise hit the first row.
    pub fn find_order(&self, requested_id: &str) -> Option<&Order> {
        let needle = normalize_order_id(requested_id);
        if needle.is_empty() {
            return None;
        }
        self.orders
            .iter()
            .find(|o| normalize_order_id(&o.order_id).contains(&needle))
    }

    /// First `n` products in table order, the "best sellers" fallback.
    pub fn best_sellers(&self, n: usize) -> Vec<&Product> {
        self.products.iter().take(n).collect()
    }
}
