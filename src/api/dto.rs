//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use serde::{Deserialize, Serialize};

/// New workout request
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
}

/// New workout response
#[derive(Debug, Serialize)]
pub struct CreateWorkoutResponse {
    /// Status: "ok"
    pub status: String,
    /// Number of workouts in the log after the insert
    pub total: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "ok" or "error"
    pub data_file: String,
    pub workouts: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
