use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::cors::CorsLayer;
use tracing::info;

use widget_backend::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!(
        mode = %config.mode,
        require_auth = config.require_auth,
        markdown_format = config.markdown_format,
        "starting chat widget backend"
    );

    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState::from_config(config).await);

    // The widget is embedded on customer pages, so any origin may call us.
    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!("chat widget backend listening on http://{bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
