//! HTTP handlers for user-service.

pub mod health;
pub mod users;

use axum::{http::StatusCode, response::IntoResponse};

pub use health::health_check;

/// Prometheus metrics endpoint.
pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        crate::services::get_metrics(),
    )
}
