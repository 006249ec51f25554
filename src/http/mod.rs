//! HTTP transport layer
//!
//! Provides the external API routing, including the `/mcp` listener, the LINE
//! webhook receiver, and the metadata endpoints.

pub mod handlers;
