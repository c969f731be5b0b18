use axum::{extract::State, http::StatusCode, Json};
use std::time::Duration;

use crate::{dtos::HealthResponse, startup::AppState};

/// Reports whether MongoDB answers a ping within the configured timeout.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timeout = Duration::from_millis(state.config.health.timeout_ms);

    match state.db.health_check(timeout).await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::connected())),
        Err(e) => {
            tracing::warn!(error = %e, "MongoDB health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::disconnected()),
            )
        }
    }
}
