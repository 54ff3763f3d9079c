//! Workout Routes
//!
//! - GET /api/v1/workouts - All workouts in log order
//! - POST /api/v1/workouts - Append a workout
//! - GET /api/v1/stats - Per-exercise summary

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{CreateWorkoutRequest, CreateWorkoutResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::stats::{summarize, TrainingSummary};
use crate::storage::WorkoutRecord;

/// GET /api/v1/workouts
pub async fn list_workouts(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<WorkoutRecord>>> {
    Ok(Json(state.log.load().await?))
}

/// POST /api/v1/workouts
///
/// Validates the date format and appends the workout to the log.
pub async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateWorkoutRequest>,
) -> ApiResult<(StatusCode, Json<CreateWorkoutResponse>)> {
    let record = WorkoutRecord::new(request.date, request.exercise, request.weight, request.reps)?;

    tracing::info!(
        date = %record.date,
        exercise = %record.exercise,
        weight = record.weight,
        reps = record.reps,
        "Adding workout"
    );

    let total = state.log.append(record).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateWorkoutResponse {
            status: "ok".to_string(),
            total,
        }),
    ))
}

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<TrainingSummary>> {
    let records = state.log.load().await?;
    Ok(Json(summarize(&records)))
}
