use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod line_client;
pub mod logging;
pub mod mcp;

use config::Credentials;
use line_client::MessageGateway;

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<Credentials>,
    pub gateway: Arc<dyn MessageGateway>,
}

impl AppState {
    pub fn new(credentials: Credentials, gateway: Arc<dyn MessageGateway>) -> Self {
        Self {
            credentials: Arc::new(credentials),
            gateway,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::root))
        .route("/health", get(http::handlers::health))
        .route("/webhook", post(http::handlers::webhook))
        .route("/mcp", post(http::handlers::mcp_endpoint))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
