//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap. Keeps argument parsing separate
//! from execution logic.

use clap::{Parser, Subcommand};

/// Nova Storefront CLI
#[derive(Parser)]
#[command(name = "novactl")]
#[command(about = "Nova Assistant - storefront support agent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Daemon address (overrides $NOVAD_ADDR)
    #[arg(long, global = true, env = "NOVAD_ADDR", default_value = "http://127.0.0.1:7850")]
    pub addr: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Send a chat message and print the assistant's reply
    Chat {
        /// The message, taken as the remaining arguments
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Dump the daemon's analytics log
    Analytics {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show daemon health
    Health {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },
}
