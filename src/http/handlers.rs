//! Axum HTTP handlers for the web server
//!
//! Bodies are decoded manually from `Bytes` so decode failures map onto each
//! surface's own error shape instead of axum's rejection responses.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::domain::webhook::{process_events, WebhookBody};
use crate::mcp::rpc::internal_error;
use crate::mcp::server::handle_mcp_request;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ServerIdentity {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub channel_token_configured: bool,
    pub group_id_configured: bool,
    pub personal_user_id_configured: bool,
}

pub async fn root() -> Json<ServerIdentity> {
    Json(ServerIdentity {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        channel_token_configured: state.credentials.channel_access_token.is_some(),
        group_id_configured: state.credentials.group_id.is_some(),
        personal_user_id_configured: state.credentials.personal_user_id.is_some(),
    })
}

pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Response {
    if let Ok(raw) = std::str::from_utf8(&body) {
        info!(body = raw, "webhook received");
    }

    let parsed: WebhookBody = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(cause) => {
            error!(%cause, "webhook processing failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": cause.to_string()})),
            )
                .into_response();
        }
    };

    process_events(&state, parsed).await;
    Json(json!({"status": "ok"})).into_response()
}

pub async fn mcp_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(cause) => {
            error!(%cause, "mcp request decode failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(internal_error(cause)),
            )
                .into_response();
        }
    };

    let (status, response) = handle_mcp_request(&state, payload).await;
    (status, Json(response)).into_response()
}
