//! Nova Control - CLI client for the Nova storefront daemon

use clap::Parser;
use novactl::cli::{Cli, Commands};
use novactl::{commands, errors};
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chat { message } => commands::chat(&cli.addr, message).await,
        Commands::Analytics { json } => commands::analytics(&cli.addr, json).await,
        Commands::Health { json } => commands::health(&cli.addr, json).await,
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red(), e);
        std::process::exit(errors::exit_code_for(&e));
    }
}
