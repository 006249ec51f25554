//! Outbound LINE Messaging API client
//!
//! Provides the `MessageGateway` seam over the push and reply endpoints, the
//! reqwest-backed implementation, and the `deliver` routine wrapping one push
//! into an in-band `SendResult`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::{config::Credentials, errors::DeliveryError};

pub const LINE_API_BASE: &str = "https://api.line.me";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one delivery attempt. Exactly one of `message` or `error` is
/// populated; `group_id` carries the recipient actually used, on success only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl SendResult {
    pub fn sent(recipient: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some("Message sent successfully".to_string()),
            error: None,
            group_id: Some(recipient.into()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            group_id: None,
        }
    }
}

#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Push one text message to a recipient identifier (user or group).
    async fn push(&self, token: &str, to: &str, text: &str) -> Result<(), DeliveryError>;

    /// Answer an inbound event via its reply token.
    async fn reply(&self, token: &str, reply_token: &str, text: &str)
        -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone)]
pub struct HttpLineClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpLineClient {
    pub fn new() -> Self {
        Self::with_base_url(LINE_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client construction");
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    async fn post_messages(
        &self,
        token: &str,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

impl Default for HttpLineClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageGateway for HttpLineClient {
    async fn push(&self, token: &str, to: &str, text: &str) -> Result<(), DeliveryError> {
        self.post_messages(
            token,
            "/v2/bot/message/push",
            json!({
                "to": to,
                "messages": [{"type": "text", "text": text}],
            }),
        )
        .await
    }

    async fn reply(
        &self,
        token: &str,
        reply_token: &str,
        text: &str,
    ) -> Result<(), DeliveryError> {
        self.post_messages(
            token,
            "/v2/bot/message/reply",
            json!({
                "replyToken": reply_token,
                "messages": [{"type": "text", "text": text}],
            }),
        )
        .await
    }
}

/// Send one text message to `recipient`, failing fast (no network call) when
/// the recipient or the access token is not configured.
pub async fn deliver(
    gateway: &dyn MessageGateway,
    credentials: &Credentials,
    message: &str,
    recipient: &str,
) -> SendResult {
    if recipient.is_empty() {
        return SendResult::failed("recipient not configured");
    }

    let Some(token) = credentials.channel_access_token.as_deref() else {
        return SendResult::failed("credentials not configured");
    };

    match gateway.push(token, recipient, message).await {
        Ok(()) => SendResult::sent(recipient),
        Err(cause) => {
            error!(%cause, "failed to send LINE message");
            SendResult::failed(cause.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingGateway {
        pushes: Mutex<Vec<(String, String, String)>>,
        fail_status: Option<u16>,
    }

    #[async_trait]
    impl MessageGateway for RecordingGateway {
        async fn push(&self, token: &str, to: &str, text: &str) -> Result<(), DeliveryError> {
            self.pushes.lock().expect("pushes lock").push((
                token.to_string(),
                to.to_string(),
                text.to_string(),
            ));
            match self.fail_status {
                Some(status) => Err(DeliveryError::Api {
                    status,
                    body: "bad request".to_string(),
                }),
                None => Ok(()),
            }
        }

        async fn reply(
            &self,
            _token: &str,
            _reply_token: &str,
            _text: &str,
        ) -> Result<(), DeliveryError> {
            Ok(())
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            channel_access_token: Some("tok".to_string()),
            group_id: Some("G1".to_string()),
            personal_user_id: None,
        }
    }

    #[tokio::test]
    async fn deliver_pushes_exact_payload_once() {
        let gateway = RecordingGateway::default();

        let result = deliver(&gateway, &credentials(), "hello", "G1").await;

        assert_eq!(result, SendResult::sent("G1"));
        let pushes = gateway.pushes.lock().expect("pushes lock");
        assert_eq!(
            *pushes,
            vec![("tok".to_string(), "G1".to_string(), "hello".to_string())]
        );
    }

    #[tokio::test]
    async fn deliver_without_recipient_makes_no_call() {
        let gateway = RecordingGateway::default();

        let result = deliver(&gateway, &credentials(), "hello", "").await;

        assert_eq!(result, SendResult::failed("recipient not configured"));
        assert!(gateway.pushes.lock().expect("pushes lock").is_empty());
    }

    #[tokio::test]
    async fn deliver_without_token_makes_no_call() {
        let gateway = RecordingGateway::default();
        let credentials = Credentials {
            channel_access_token: None,
            ..credentials()
        };

        let result = deliver(&gateway, &credentials, "hello", "G1").await;

        assert_eq!(result, SendResult::failed("credentials not configured"));
        assert!(gateway.pushes.lock().expect("pushes lock").is_empty());
    }

    #[tokio::test]
    async fn deliver_surfaces_api_failure_in_band() {
        let gateway = RecordingGateway {
            fail_status: Some(400),
            ..Default::default()
        };

        let result = deliver(&gateway, &credentials(), "hello", "G1").await;

        assert!(!result.success);
        let error = result.error.expect("error populated");
        assert!(error.contains("400"));
        assert_eq!(result.group_id, None);
    }

    #[test]
    fn send_result_round_trips_through_json() {
        for result in [SendResult::sent("G1"), SendResult::failed("boom")] {
            let encoded = serde_json::to_string(&result).expect("serialize");
            let decoded: SendResult = serde_json::from_str(&encoded).expect("deserialize");
            assert_eq!(decoded, result);
        }
    }

    #[test]
    fn send_result_skips_absent_fields() {
        let encoded =
            serde_json::to_value(SendResult::sent("G1")).expect("serialize");
        assert_eq!(
            encoded,
            serde_json::json!({
                "success": true,
                "message": "Message sent successfully",
                "group_id": "G1",
            })
        );

        let encoded = serde_json::to_value(SendResult::failed("boom")).expect("serialize");
        assert_eq!(
            encoded,
            serde_json::json!({"success": false, "error": "boom"})
        );
    }
}
