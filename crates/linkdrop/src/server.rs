//! HTTP surface: webhook intake and liveness endpoints.

use crate::OperatingMode;
use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use linkdrop_social::LinkdropBot;
use linkdrop_social::telegram::Update;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Name reported by the root endpoint.
pub const SERVICE_NAME: &str = "linkdrop";

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    bot: Arc<LinkdropBot>,
    bot_token: Arc<str>,
    mode: OperatingMode,
}

impl AppState {
    /// Creates new server state.
    pub fn new(bot: Arc<LinkdropBot>, bot_token: &str, mode: OperatingMode) -> Self {
        Self {
            bot,
            bot_token: Arc::from(bot_token),
            mode,
        }
    }
}

/// Creates the HTTP router.
///
/// Telegram posts webhook updates to `/<bot_token>`; any other single-segment
/// POST is answered with 404.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/:token", post(receive_update))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "OK",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Service identity and operating mode.
async fn service_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": SERVICE_NAME,
        "status": "running",
        "environment": state.mode.to_string(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Webhook intake.
///
/// The update is handled on its own task; Telegram gets its 200 as soon as
/// the payload is decoded.
async fn receive_update(
    Path(token): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> StatusCode {
    if token.as_str() != &*state.bot_token {
        return StatusCode::NOT_FOUND;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "Rejecting undecodable webhook payload");
            return StatusCode::BAD_REQUEST;
        }
    };

    let update_id = update.update_id;
    match update.into_event() {
        Some(event) => state.bot.spawn_dispatch(event),
        None => debug!(update_id, "Ignoring update"),
    }

    StatusCode::OK
}
