//! HTTP receiver for backend webhook notifications

use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::{ErrorCode, RelibotError, Result};

/// Build the receiver's router
pub fn router() -> Router {
    Router::new()
        .route("/webhook", post(receive))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        RelibotError::config_with_code(
            ErrorCode::CONFIG_INVALID_VALUE,
            format!("cannot bind webhook receiver to {}", addr),
        )
        .with_source(e)
    })?;

    info!("Webhook receiver listening on {}", addr);
    axum::serve(listener, router())
        .await
        .map_err(|e| RelibotError::other("webhook receiver stopped").with_source(e))
}

async fn receive(Json(payload): Json<Value>) -> (StatusCode, Json<Value>) {
    info!("Webhook triggered: {}", payload);
    (StatusCode::OK, Json(json!({ "status": "received" })))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
