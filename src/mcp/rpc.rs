//! Response-shape helpers for the MCP endpoint
//!
//! Builds the bare protocol error objects and the uniform text-content
//! envelope carrying every tool result, success or failure.

use rust_mcp_sdk::schema::{CallToolResult, ContentBlock, TextContent};
use serde::Serialize;
use serde_json::{json, Value};

pub fn protocol_error(code: i32, message: impl Into<String>) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}

pub fn method_not_found(method: &str) -> Value {
    protocol_error(-32601, format!("Method not found: {method}"))
}

pub fn internal_error(cause: impl std::fmt::Display) -> Value {
    protocol_error(-32603, format!("Internal error: {cause}"))
}

pub fn tool_text_result(text: String) -> Value {
    serde_json::to_value(CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(text, None, None))],
        is_error: None,
        meta: None,
        structured_content: None,
    })
    .expect("tool result serialization")
}

/// Serialize a tool-level payload into the `content` envelope.
pub fn tool_json_result<T: Serialize>(payload: &T) -> Value {
    tool_text_result(serde_json::to_string(payload).expect("tool payload serialization"))
}
