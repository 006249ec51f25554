use std::sync::Arc;

use line_mcp_server::{build_app, config::Config, line_client::HttpLineClient, logging, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let bind_socket = config.bind_socket()?;

    let gateway = Arc::new(HttpLineClient::new());
    let state = AppState::new(config.credentials.clone(), gateway);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
