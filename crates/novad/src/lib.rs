//! Nova daemon library - exposes modules for testing.

pub mod analytics;
pub mod config;
pub mod error;
pub mod extractor;
pub mod intent;
pub mod prompts;
pub mod provider;
pub mod router;
pub mod routes;
pub mod server;
