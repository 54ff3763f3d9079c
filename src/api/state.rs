//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::dashboard::{DashboardRenderer, DashboardResult, FileSource, HttpSource, RecordSource};
use crate::storage::WorkoutLog;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Workout log backing the JSON endpoints and `/data/workouts.json`
    pub log: WorkoutLog,
    /// Dashboard page renderer
    pub renderer: DashboardRenderer,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(log: WorkoutLog, renderer: DashboardRenderer) -> Self {
        Self {
            log,
            renderer,
            start_time: Instant::now(),
        }
    }

    /// Build state from configuration.
    ///
    /// Fails if a custom template is configured but cannot be read or lacks
    /// the table body or chart canvas.
    pub async fn from_config(config: &Config) -> DashboardResult<Self> {
        let log = WorkoutLog::new(&config.data.file);

        let template = config.dashboard.load_template().await?;

        let source: Arc<dyn RecordSource> = match &config.dashboard.data_url {
            Some(url) => Arc::new(HttpSource::new(url.clone())),
            None => Arc::new(FileSource::new(&config.data.file)),
        };

        tracing::info!(source = %source.describe(), "Dashboard source configured");

        let renderer = DashboardRenderer::new(source, template, config.dashboard.palette);
        Ok(Self::new(log, renderer))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
