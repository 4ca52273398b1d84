//! Nova Common - shared types for the Nova storefront assistant.
//!
//! Catalog fixtures, the chat wire protocol, and the constants the daemon
//! and CLI agree on.

pub mod catalog;
pub mod chat;

pub use catalog::*;
pub use chat::*;
