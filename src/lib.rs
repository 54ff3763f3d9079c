//! # AthleteLog
//!
//! Personal training log: record sets, estimate one-rep maxima, and browse
//! progress on a local dashboard.
//!
//! ## Modules
//!
//! - [`storage`]: the JSON workout log
//! - [`stats`]: Epley 1RM, volume and per-exercise summaries
//! - [`dashboard`]: history table and weight-over-time chart
//! - [`report`]: `summary.txt` and static `report.html`
//! - [`api`]: local dashboard server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use athletelog::storage::{WorkoutLog, WorkoutRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = WorkoutLog::new("data/workouts.json");
//!     log.append(WorkoutRecord::new("2026-01-10", "Squat", 100.0, 5)?).await?;
//!
//!     let summary = athletelog::stats::summarize(&log.load().await?);
//!     println!("Total volume: {:.1} lbs", summary.total_volume);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod report;
pub mod stats;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{StoreError, StoreResult, WorkoutLog, WorkoutRecord};

pub use dashboard::{
    DashboardError, DashboardRenderer, DashboardView, FileSource, HttpSource, Palette,
    RecordSource, Template,
};

pub use stats::{epley_1rm, ExerciseSummary, TrainingSummary};

pub use report::{ReportError, ReportPaths};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, DashboardConfig, DataConfig, LoggingConfig};
