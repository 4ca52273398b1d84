//! Command runners for novactl.

use anyhow::Result;

use crate::client::NovadClient;
use crate::display;

/// Run the chat command
pub async fn chat(addr: &str, message: Vec<String>) -> Result<()> {
    let client = NovadClient::new(addr);
    let reply = client.chat(&message.join(" ")).await?;
    display::print_chat_reply(&reply);
    Ok(())
}

/// Run the analytics command
pub async fn analytics(addr: &str, json: bool) -> Result<()> {
    let client = NovadClient::new(addr);
    let reply = client.analytics().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        display::print_analytics(&reply);
    }
    Ok(())
}

/// Run the health command
pub async fn health(addr: &str, json: bool) -> Result<()> {
    let client = NovadClient::new(addr);
    let health = client.health().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else {
        display::print_health(&health);
    }
    Ok(())
}
