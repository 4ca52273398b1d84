//! Display helpers for novactl output.

use nova_common::{
    AnalyticsReply, ChatReply, HealthReply, Order, OrderStatus, Product, ResponsePayload,
};
use owo_colors::OwoColorize;

const THIN_SEP: &str = "------------------------------------------------------------";

/// Print a chat reply with its payload, if any.
pub fn print_chat_reply(reply: &ChatReply) {
    println!();
    println!("  {}", reply.message.bold());
    match &reply.data {
        Some(ResponsePayload::Products(products)) => print_products(products),
        Some(ResponsePayload::Order(order)) => print_order(order),
        Some(ResponsePayload::Orders(orders)) => print_orders(orders),
        Some(ResponsePayload::Categories(names)) => print_categories(names),
        None => {}
    }
    println!();
    println!("  {}", format!("answered by {}", reply.meta.provider).dimmed());
    println!();
}

pub fn print_analytics(reply: &AnalyticsReply) {
    println!();
    println!("{}", "[ANALYTICS]".cyan());
    if reply.analytics.is_empty() {
        println!("  No requests recorded yet.");
        println!();
        return;
    }
    let now = chrono::Utc::now();
    for record in &reply.analytics {
        let secs = now.signed_duration_since(record.timestamp).num_seconds().max(0);
        println!("  {:<10} {:<20} {}", format_age(secs as u64), record.intent, record.term);
    }
    println!("{}", THIN_SEP);
    println!("  {} request(s) recorded", reply.analytics.len());
    println!();
}

pub fn print_health(health: &HealthReply) {
    let status = if health.status == "ok" {
        health.status.green().to_string()
    } else {
        health.status.red().to_string()
    };
    println!();
    println!("  {:<10} {}", "status", status);
    println!("  {:<10} {}", "version", health.version);
    println!("  {:<10} {}", "uptime", format_duration(health.uptime_seconds));
    println!("  {:<10} {} products, {} orders", "catalog", health.products_loaded, health.orders_loaded);
    if health.backends.is_empty() {
        println!("  {:<10} {}", "backends", "none configured".red());
    } else {
        println!("  {:<10} {}", "backends", health.backends.join(", "));
    }
    println!();
}

fn print_products(products: &[Product]) {
    println!();
    for product in products {
        let price = format!("${:.2}", product.price);
        let stock = if product.stock == 0 {
            "out of stock".red().to_string()
        } else {
            format!("{} in stock", product.stock)
        };
        println!("  {:<8} {:<28} {:>8}  {}", product.product_id, product.name, price, stock);
    }
}

fn print_order(order: &Order) {
    println!();
    println!("  {:<10} {}", "order", order.order_id);
    println!("  {:<10} {}", "status", colorize_status(order.status));
    println!("  {:<10} {}", "items", order.items.join(", "));
    println!("  {:<10} {}", "ordered", order.order_date);
    println!("  {:<10} {}", "delivery", order.delivery_est);
}

fn print_orders(orders: &[Order]) {
    println!();
    for order in orders {
        println!(
            "  {:<10} {:<12} {}  {} item(s)",
            order.order_id,
            colorize_status(order.status),
            order.order_date,
            order.items.len()
        );
    }
}

fn print_categories(names: &[String]) {
    println!();
    for name in names {
        println!("  - {}", name);
    }
}

fn colorize_status(status: OrderStatus) -> String {
    match status {
        OrderStatus::Delivered => status.as_str().green().to_string(),
        OrderStatus::Shipped => status.as_str().cyan().to_string(),
        OrderStatus::Processing => status.as_str().yellow().to_string(),
        OrderStatus::Cancelled => status.as_str().red().to_string(),
    }
}

/// Short duration like "5s", "3m", "2h".
fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

fn format_age(secs: u64) -> String {
    format!("{} ago", format_duration(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_buckets() {
        assert_eq!(format_duration(5), "5s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(65), "1m");
        assert_eq!(format_duration(3700), "1h");
        assert_eq!(format_duration(200_000), "2d");
    }

    #[test]
    fn test_format_age_suffix() {
        assert_eq!(format_age(90), "1m ago");
    }
}
