//! HTTP surface of the gateway.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness check
//! - `POST /api/predict` - Normalize a CSV upload or JSON body, forward it to
//!   the prediction service and reshape the reply

mod error;
mod predict;


pub use error::ApiError;

use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use exo_upstream::UpstreamClient;
use serde_json::{Value, json};

/// State shared across handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    upstream: UpstreamClient,
}

impl AppState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

/// Build the application router.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/predict", post(predict::predict))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "exo-gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("exo-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
