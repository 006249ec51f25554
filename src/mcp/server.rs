//! The central MCP dispatch engine
//!
//! Routes a decoded `/mcp` request body to capability negotiation, tool
//! enumeration, or tool invocation. Tool-level failures ride inside HTTP 200
//! content envelopes; unknown methods surface as a 404 protocol error.

use axum::http::StatusCode;
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ListToolsResult, ProtocolVersion, ServerCapabilities,
    ServerCapabilitiesTools,
};
use serde_json::Value;
use tracing::info;

use crate::domain::tools::{build_tools_list, handle_tools_call};
use crate::mcp::rpc::method_not_found;
use crate::AppState;

/// The three methods this server answers; anything else is a protocol error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpMethod {
    Initialize,
    ToolsList,
    ToolsCall,
    Unrecognized(String),
}

impl McpMethod {
    pub fn parse(method: &str) -> Self {
        match method {
            "initialize" => Self::Initialize,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

pub async fn handle_mcp_request(state: &AppState, payload: Value) -> (StatusCode, Value) {
    let method = payload
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let params = payload.get("params").cloned();

    let (status, response) = match McpMethod::parse(&method) {
        McpMethod::Initialize => (StatusCode::OK, initialize_result()),
        McpMethod::ToolsList => (StatusCode::OK, tools_list_result()),
        McpMethod::ToolsCall => (StatusCode::OK, handle_tools_call(state, params).await),
        McpMethod::Unrecognized(name) => (StatusCode::NOT_FOUND, method_not_found(&name)),
    };

    info!(
        method = %method,
        status = status.as_u16(),
        "mcp request dispatched"
    );

    (status, response)
}

fn initialize_result() -> Value {
    let result = InitializeResult {
        server_info: Implementation {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: None,
            description: None,
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        protocol_version: ProtocolVersion::V2024_11_05.into(),
        instructions: None,
        meta: None,
    };

    serde_json::to_value(result).expect("initialize result serialization")
}

fn tools_list_result() -> Value {
    serde_json::to_value(ListToolsResult {
        meta: None,
        next_cursor: None,
        tools: build_tools_list(),
    })
    .expect("tools list result serialization")
}
