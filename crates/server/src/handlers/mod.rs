//! # API Route Handlers
//!
//! Organizes the Axum route handlers for the `twinrag-server`: the chat
//! contract, the JSON-RPC endpoint, and the general-purpose routes.

pub mod chat;
pub mod general;
pub mod mcp;

pub use chat::*;
pub use general::*;
pub use mcp::*;
