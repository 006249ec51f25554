//! Webhook event extraction for the LINE platform
//!
//! Surfaces sender identifiers from inbound message events so operators can
//! copy them into configuration, and answers "userid" questions with the
//! sender's own id via the reply API.

use serde::Deserialize;
use tracing::{info, warn};

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub source: EventSource,
    pub message: Option<EventMessage>,
    pub reply_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    pub user_id: Option<String>,
    pub group_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventMessage {
    #[serde(default)]
    pub text: String,
}

/// Process events in array order. A failed reply is logged and never aborts
/// the remaining events or the webhook response.
pub async fn process_events(state: &AppState, body: WebhookBody) {
    for event in body.events {
        if event.event_type != "message" {
            continue;
        }

        let text = event.message.map(|message| message.text).unwrap_or_default();
        info!(
            user_id = event.source.user_id.as_deref().unwrap_or(""),
            group_id = event.source.group_id.as_deref().unwrap_or(""),
            message = %text,
            "user id detected"
        );

        let Some(user_id) = event.source.user_id else {
            continue;
        };
        if !asks_for_user_id(&text) {
            continue;
        }
        let Some(reply_token) = event.reply_token else {
            continue;
        };
        let Some(token) = state.credentials.channel_access_token.as_deref() else {
            continue;
        };

        let reply_text = format!("あなたのUser IDは: {user_id}");
        if let Err(cause) = state.gateway.reply(token, &reply_token, &reply_text).await {
            warn!(%cause, "auto-reply failed");
        }
    }
}

fn asks_for_user_id(text: &str) -> bool {
    text.to_lowercase().contains("userid")
}
