//! Dashboard error types
//!
//! Every variant ends up on the same path: logged, then shown to the user as
//! one generic "error loading data" paragraph. The variants only exist so the
//! log line says what actually happened.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or rendering the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Reading the workout file failed
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request could not be completed
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Failed to load workouts.json: HTTP {0}")]
    Status(u16),

    /// The payload is not a JSON array of workouts
    #[error("Failed to parse workouts: {0}")]
    Parse(#[from] serde_json::Error),

    /// The page template lacks an element the renderer writes into
    #[error("Template is missing required element #{0}")]
    MissingElement(&'static str),

    /// An askama template failed to render
    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
