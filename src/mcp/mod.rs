//! Model Context Protocol (MCP) method dispatch
//!
//! Provides the method routing for the `/mcp` endpoint and the response-shape
//! helpers for its two error tiers.

pub mod rpc;
pub mod server;
