use std::{env, net::SocketAddr};

use thiserror::Error;
use tracing::warn;

/// Process-wide LINE credentials, resolved once at startup.
///
/// Every field is optional: a missing value is a degraded state, not an error,
/// until an operation actually needs it.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub channel_access_token: Option<String>,
    pub group_id: Option<String>,
    pub personal_user_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub bind_addr: String,
    pub bind_port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid u16")]
    InvalidPort,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials = Credentials {
            channel_access_token: non_empty_env("LINE_CHANNEL_ACCESS_TOKEN"),
            group_id: non_empty_env("LINE_GROUP_ID"),
            personal_user_id: non_empty_env("LINE_PERSONAL_USER_ID"),
        };

        if credentials.channel_access_token.is_none() {
            warn!("LINE_CHANNEL_ACCESS_TOKEN is not set");
        }
        if credentials.group_id.is_none() {
            warn!("LINE_GROUP_ID is not set");
        }
        if credentials.personal_user_id.is_none() {
            warn!("LINE_PERSONAL_USER_ID is not set");
        }

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let bind_port = env::var("PORT")
            .ok()
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8000);

        let config = Self {
            credentials,
            bind_addr,
            bind_port,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
