//! HTTP surface for the chat platform.
//!
//! The platform POSTs each event as JSON to the configured path and renders
//! whatever JSON comes back: a card, a `{"text": ...}` message, or `{}`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};

use crate::card::Response;
use crate::config::{ServerConfig, HEALTH_PATH};
use crate::dispatcher::Dispatcher;
use crate::event::{ChatEvent, RawEvent};

async fn handle_event(
    State(dispatcher): State<Arc<Dispatcher>>,
    Json(raw): Json<RawEvent>,
) -> Result<Json<Response>, (StatusCode, String)> {
    let event = ChatEvent::try_from(raw).map_err(|e| {
        warn!("Rejected event: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Ok(Json(dispatcher.handle(event).await))
}

async fn health() -> &'static str {
    "ok"
}

/// `path` must be a literal route other than the health path;
/// `Config::from_toml_str` enforces this.
pub fn router(dispatcher: Arc<Dispatcher>, path: &str) -> Router {
    Router::new()
        .route(path, post(handle_event))
        .route(HEALTH_PATH, get(health))
        .with_state(dispatcher)
}

/// Serve until Ctrl-C.
pub async fn run(dispatcher: Arc<Dispatcher>, config: &ServerConfig) -> Result<()> {
    let app = router(dispatcher, &config.path);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address))?;

    info!(
        "Listening for chat events on http://{}{}",
        config.bind_address, config.path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("Server error")?;

    Ok(())
}
