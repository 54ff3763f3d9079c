//! Progress report
//!
//! Writes two files next to the workout log:
//!
//! - `summary.txt`: per-exercise entries, heaviest load and total volume
//! - `report.html`: a static snapshot of the dashboard
//!
//! Unlike the live dashboard, the report merges exercise labels that only
//! differ in case or surrounding whitespace and orders records by date.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dashboard::{capitalize, DashboardError, DashboardView, Palette, Template};
use crate::stats::{normalize_exercise, sort_chronologically, summarize, TrainingSummary};
use crate::storage::{StoreError, WorkoutLog, WorkoutRecord};

/// Name of the text summary file
pub const SUMMARY_FILE: &str = "summary.txt";

/// Name of the HTML snapshot file
pub const REPORT_FILE: &str = "report.html";

/// Errors that can occur while generating a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] DashboardError),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Files produced by [`generate`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPaths {
    pub summary: PathBuf,
    pub html: PathBuf,
}

/// Generate the report for the log at `data_file`.
///
/// Returns `Ok(None)` when the log holds no workouts yet.
pub async fn generate(
    data_file: &Path,
    template: &Template,
) -> Result<Option<ReportPaths>, ReportError> {
    let records = WorkoutLog::new(data_file).load().await?;
    if records.is_empty() {
        return Ok(None);
    }

    let output_dir = data_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let summary_path = output_dir.join(SUMMARY_FILE);
    write(&summary_path, &summary_text(&summarize(&records))).await?;

    let html_path = output_dir.join(REPORT_FILE);
    write(&html_path, &snapshot_html(&records, template)?).await?;

    tracing::info!(summary = ?summary_path, html = ?html_path, "Report generated");

    Ok(Some(ReportPaths {
        summary: summary_path,
        html: html_path,
    }))
}

/// Render the text summary
pub fn summary_text(summary: &TrainingSummary) -> String {
    let mut lines = Vec::new();

    for exercise in &summary.exercises {
        lines.push(format!("{}:", capitalize(&exercise.exercise)));
        lines.push(format!("  - Entries: {}", exercise.entries));
        lines.push(format!("  - Max Weight: {:.1} lbs", exercise.max_weight));
        lines.push(format!("  - Total Volume: {:.1} lbs", exercise.total_volume));
        lines.push(String::new());
    }

    lines.push(format!("Overall total volume: {:.1} lbs", summary.total_volume));
    lines.join("\n")
}

/// Dashboard page for normalized, date-ordered records with stable colours.
///
/// Records are ordered like the summary, by [`sort_chronologically`].
pub fn snapshot_html(
    records: &[WorkoutRecord],
    template: &Template,
) -> Result<String, ReportError> {
    let mut normalized: Vec<WorkoutRecord> = records
        .iter()
        .cloned()
        .map(|mut r| {
            r.exercise = normalize_exercise(&r.exercise);
            r
        })
        .collect();
    sort_chronologically(&mut normalized);

    let view = DashboardView::build(&normalized, Palette::Stable, &mut rand::thread_rng());
    Ok(template.render(Some(&view))?)
}

async fn write(path: &Path, contents: &str) -> Result<(), ReportError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })
}
