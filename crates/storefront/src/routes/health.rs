//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the shop state lock is poisoned.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.shop().is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
