//! Dashboard renderer
//!
//! Turns the workout log into a page with a history table and a
//! weight-over-time line chart (one line per exercise, drawn by Chart.js in
//! the browser).
//!
//! Rendering happens in three steps:
//!
//! 1. a [`RecordSource`] loads the records (the only async step)
//! 2. [`DashboardView::build`] turns them into table rows and a chart config
//! 3. a [`Template`] writes both into the page
//!
//! Any failure in step 1 is logged and the page is rendered with an empty
//! table, no chart, and an error paragraph. Nothing propagates past
//! [`DashboardRenderer::render_page`]; if the page itself cannot be rendered,
//! the bare error paragraph is returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use athletelog::dashboard::{DashboardRenderer, FileSource, Palette, Template};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let renderer = DashboardRenderer::new(
//!     Arc::new(FileSource::new("data/workouts.json")),
//!     Template::default(),
//!     Palette::Random,
//! );
//! let html = renderer.render_page().await;
//! # let _ = html;
//! # }
//! ```

mod color;
mod error;
mod model;
mod source;
mod template;

pub use color::{Palette, Rgb, SeriesColors, FILL_OPACITY};
pub use error::{DashboardError, DashboardResult};
pub use model::{
    capitalize, chart_config, date_axis, format_estimate, format_weight, group_by_exercise,
    table_rows,
    ChartConfig, ChartData, ChartOptions, Dataset, DashboardView, ExerciseSeries, TableRow,
    NO_ESTIMATE,
};
pub use source::{FileSource, HttpSource, RecordSource};
pub use template::{
    Template, CHART_CANVAS_ID, DEFAULT_CHART_JS_URL, LOAD_ERROR_HTML, TABLE_BODY_ID,
};

use rand::Rng;
use std::sync::Arc;

/// Load records from `source` and build the view model
pub async fn load_dashboard<S, R>(
    source: &S,
    palette: Palette,
    rng: &mut R,
) -> DashboardResult<DashboardView>
where
    S: RecordSource + ?Sized,
    R: Rng + ?Sized,
{
    let records = source.load().await?;
    Ok(DashboardView::build(&records, palette, rng))
}

/// Source, template and palette bundled for repeated renders
#[derive(Clone)]
pub struct DashboardRenderer {
    source: Arc<dyn RecordSource>,
    template: Template,
    palette: Palette,
}

impl DashboardRenderer {
    pub fn new(source: Arc<dyn RecordSource>, template: Template, palette: Palette) -> Self {
        Self {
            source,
            template,
            palette,
        }
    }

    /// Where records are loaded from
    pub fn source(&self) -> &dyn RecordSource {
        self.source.as_ref()
    }

    /// Load the records and render the full page. Never fails.
    pub async fn render_page(&self) -> String {
        let outcome = self.source.load().await;
        self.render_outcome(outcome, &mut rand::thread_rng())
    }

    /// Render the page for an already completed load
    pub fn render_outcome<R: Rng + ?Sized>(
        &self,
        outcome: DashboardResult<Vec<crate::storage::WorkoutRecord>>,
        rng: &mut R,
    ) -> String {
        let page = match outcome {
            Ok(records) => {
                tracing::debug!(
                    source = %self.source.describe(),
                    records = records.len(),
                    "Rendering dashboard"
                );
                let view = DashboardView::build(&records, self.palette, rng);
                self.template.render(Some(&view))
            }
            Err(e) => {
                tracing::error!(
                    source = %self.source.describe(),
                    error = %e,
                    "Failed to load workouts"
                );
                self.template.render(None)
            }
        };

        page.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to render dashboard page");
            LOAD_ERROR_HTML.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::WorkoutRecord;
    use axum::{routing::get, Router};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn renderer(source: impl RecordSource + 'static) -> DashboardRenderer {
        DashboardRenderer::new(Arc::new(source), Template::default(), Palette::Random)
    }

    fn rows_in(html: &str) -> usize {
        let start = html.find("id=\"table-body\"").unwrap();
        let end = html[start..].find("</tbody>").unwrap() + start;
        html[start..end].matches("<tr>").count()
    }

    #[tokio::test]
    async fn test_load_dashboard_builds_view() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        let records = vec![
            WorkoutRecord::new("2026-01-11", "squat", 100.0, 5).unwrap(),
            WorkoutRecord::new("2026-01-10", "bench", 70.0, 8).unwrap(),
            WorkoutRecord::new("2026-01-12", "squat", 105.0, 5).unwrap(),
        ];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let view = load_dashboard(
            &FileSource::new(&path),
            Palette::Random,
            &mut StdRng::seed_from_u64(11),
        )
        .await
        .unwrap();

        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.chart.data.labels, vec!["2026-01-10", "2026-01-11", "2026-01-12"]);
        assert_eq!(view.chart.data.datasets.len(), 2);
        assert_eq!(view.chart.data.datasets[0].data, vec![100.0, 105.0]);
    }

    #[tokio::test]
    async fn test_render_page_success() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        std::fs::write(
            &path,
            r#"[{"date":"2026-01-10","exercise":"squat","weight":100,"reps":5},
                {"date":"2026-01-11","exercise":"squat","weight":105,"reps":3,
                 "estimated_1rm":115.5}]"#,
        )
        .unwrap();

        let html = renderer(FileSource::new(&path)).render_page().await;
        assert_eq!(rows_in(&html), 2);
        assert!(html.contains("<td>116</td>"));
        assert!(html.contains("new Chart("));
        assert!(!html.contains(LOAD_ERROR_HTML));
    }

    #[tokio::test]
    async fn test_render_page_http_404() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, Router::new().route("/", get(|| async { "up" })))
                .await
                .unwrap();
        });

        let source = HttpSource::new(format!("http://{}/data/workouts.json", addr));
        let html = renderer(source).render_page().await;

        assert_eq!(rows_in(&html), 0);
        assert!(html.contains(LOAD_ERROR_HTML));
        assert!(!html.contains("new Chart("));
    }

    #[tokio::test]
    async fn test_render_page_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        std::fs::write(&path, "this is not json").unwrap();

        let html = renderer(FileSource::new(&path)).render_page().await;
        assert_eq!(rows_in(&html), 0);
        assert!(html.contains(LOAD_ERROR_HTML));
        assert!(!html.contains("new Chart("));
    }

    #[tokio::test]
    async fn test_render_page_missing_file() {
        let dir = tempdir().unwrap();
        let html = renderer(FileSource::new(dir.path().join("workouts.json")))
            .render_page()
            .await;
        assert!(html.contains(LOAD_ERROR_HTML));
    }

    #[test]
    fn test_colors_change_between_renders() {
        let renderer = renderer(FileSource::new("unused.json"));
        let records = vec![WorkoutRecord::new("2026-01-10", "squat", 100.0, 5).unwrap()];

        let first = renderer.render_outcome(Ok(records.clone()), &mut StdRng::seed_from_u64(1));
        let second = renderer.render_outcome(Ok(records), &mut StdRng::seed_from_u64(2));
        assert_ne!(first, second);
    }
}
