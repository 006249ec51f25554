//! The `send_line_message` tool exposed via Model Context Protocol
//!
//! Resolves the delivery target (group or personal chat, explicit ids winning
//! over environment defaults) and delegates to the delivery client.

use rust_mcp_sdk::{macros, schema::Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Credentials;
use crate::line_client::{deliver, SendResult};
use crate::mcp::rpc::tool_json_result;
use crate::AppState;

#[macros::mcp_tool(
    name = "send_line_message",
    description = "Send a text message to the configured LINE group or a personal chat"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct SendLineMessageTool {
    pub message: String,
    pub target: Option<String>,
    pub group_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CallParams {
    name: Option<String>,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Default, Deserialize)]
struct SendMessageArgs {
    message: Option<String>,
    target: Option<String>,
    group_id: Option<String>,
    user_id: Option<String>,
}

pub fn build_tools_list() -> Vec<Tool> {
    vec![SendLineMessageTool::tool()]
}

pub async fn handle_tools_call(state: &AppState, params: Option<Value>) -> Value {
    let call: CallParams = params
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();

    let name = call.name.unwrap_or_default();
    if name != "send_line_message" {
        return tool_json_result(&SendResult::failed(format!("Unknown tool: {name}")));
    }

    let args: SendMessageArgs = serde_json::from_value(call.arguments).unwrap_or_default();

    let Some(message) = args.message.filter(|message| !message.is_empty()) else {
        return tool_json_result(&SendResult::failed("message parameter is required"));
    };

    let recipient = match resolve_recipient(
        &state.credentials,
        args.target.as_deref(),
        args.group_id,
        args.user_id,
    ) {
        Ok(recipient) => recipient,
        Err(error) => return tool_json_result(&SendResult::failed(error)),
    };

    let result = deliver(state.gateway.as_ref(), &state.credentials, &message, &recipient).await;
    tool_json_result(&result)
}

/// Resolve the recipient identifier for a tool invocation. Unknown target
/// values fall back to group delivery; an empty group recipient is deferred to
/// the delivery client's own check.
pub fn resolve_recipient(
    credentials: &Credentials,
    target: Option<&str>,
    group_id: Option<String>,
    user_id: Option<String>,
) -> Result<String, &'static str> {
    if target == Some("personal") {
        return user_id
            .or_else(|| credentials.personal_user_id.clone())
            .ok_or("PERSONAL_USER_ID is not configured");
    }

    Ok(group_id
        .or_else(|| credentials.group_id.clone())
        .unwrap_or_default())
}
