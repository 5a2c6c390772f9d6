//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{call_now, health, latest_audio, turn_audio, voice_webhook};
use crate::server::AppState;

/// Create the gateway router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/", get(health))
        // Main voice webhook
        .route("/voice", post(voice_webhook))
        // Audio serving
        .route("/audio", get(latest_audio))
        .route("/audio/{turn_id}", get(turn_audio))
        // Outbound call trigger
        .route("/call-now", get(call_now))
}
