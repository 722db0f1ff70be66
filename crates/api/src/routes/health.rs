//! Health check endpoint handlers.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::app::AppState;
use crate::error::ApiError;

/// Static liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

/// Simple status response for the readiness probe.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Liveness check.
///
/// GET /
///
/// Never touches the store.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { message: "Healthy" })
}

/// Readiness probe endpoint.
///
/// GET /health/ready
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    if let Err(err) = state.store.ping().await {
        warn!(error = %err, "Readiness check failed");
        return Err(ApiError::ServiceUnavailable(
            "Database unavailable".to_string(),
        ));
    }

    Ok(Json(StatusResponse { status: "ready" }))
}
