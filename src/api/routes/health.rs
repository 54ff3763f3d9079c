//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status. The server stays up when the log is unreadable, so
/// that case is reported as "degraded" rather than an error status.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (data_file, workouts) = match state.log.load().await {
        Ok(records) => ("ok", records.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Workout log unreadable");
            ("error", 0)
        }
    };

    let status = if data_file == "ok" { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        data_file: data_file.to_string(),
        workouts,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
