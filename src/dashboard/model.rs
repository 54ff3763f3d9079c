//! Dashboard view model
//!
//! Pure transformation from loaded records to what the page shows: the table
//! rows as display strings and a Chart.js line-chart configuration. Nothing
//! here touches the page or the file system.

use rand::Rng;
use serde::Serialize;

use super::color::Palette;
use crate::storage::WorkoutRecord;

/// Placeholder shown when a record has no estimated 1RM
pub const NO_ESTIMATE: &str = "-";

/// Chart title
pub const CHART_TITLE: &str = "Weight Progress by Exercise";

/// Curve smoothing applied to every line
pub const LINE_TENSION: f64 = 0.3;

/// One table row, already formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub date: String,
    pub exercise: String,
    pub weight: String,
    pub reps: String,
    pub estimated_1rm: String,
}

impl From<&WorkoutRecord> for TableRow {
    fn from(record: &WorkoutRecord) -> Self {
        Self {
            date: record.date.clone(),
            exercise: record.exercise.clone(),
            weight: format_weight(record.weight),
            reps: record.reps.to_string(),
            estimated_1rm: format_estimate(record.estimated_1rm),
        }
    }
}

/// Records that share one exercise label, in load order
#[derive(Debug, Clone)]
pub struct ExerciseSeries<'a> {
    pub exercise: &'a str,
    pub records: Vec<&'a WorkoutRecord>,
}

impl ExerciseSeries<'_> {
    /// Plotted values: the weight of each record
    pub fn weights(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.weight).collect()
    }
}

/// Chart.js configuration object for the weight chart
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Labels and datasets
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One line on the chart
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
    pub fill: bool,
    pub hidden: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub position: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Scales {
    pub y: Axis,
    pub x: Axis,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    pub title: Title,
}

impl ChartOptions {
    /// Options for the weight-over-time chart
    pub fn weight_progress() -> Self {
        Self {
            responsive: true,
            plugins: Plugins {
                legend: Legend {
                    position: "top".to_string(),
                },
                title: Title::shown(CHART_TITLE),
            },
            scales: Scales {
                y: Axis {
                    begin_at_zero: Some(false),
                    title: Title::shown("Weight (lbs)"),
                },
                x: Axis {
                    begin_at_zero: None,
                    title: Title::shown("Date"),
                },
            },
        }
    }
}

/// Everything the page needs
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub rows: Vec<TableRow>,
    pub chart: ChartConfig,
}

impl DashboardView {
    /// Build the table and chart for `records`
    pub fn build<R: Rng + ?Sized>(
        records: &[WorkoutRecord],
        palette: Palette,
        rng: &mut R,
    ) -> Self {
        Self {
            rows: table_rows(records),
            chart: chart_config(records, palette, rng),
        }
    }
}

/// One row per record, in load order
pub fn table_rows(records: &[WorkoutRecord]) -> Vec<TableRow> {
    records.iter().map(TableRow::from).collect()
}

/// Weight cell text with one decimal.
///
/// Exact halves (`x.25`, `x.75`) round away from zero, as `Number.toFixed`
/// does; `{:.1}` alone would round them to even.
pub fn format_weight(weight: f64) -> String {
    let exact_half = (weight * 4.0).fract() == 0.0 && (weight * 2.0).fract() != 0.0;
    if exact_half {
        format!("{:.1}", (weight * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", weight)
    }
}

/// Estimate cell text. Zero and NaN count as "no estimate".
pub fn format_estimate(estimate: Option<f64>) -> String {
    match estimate {
        Some(value) if value != 0.0 && !value.is_nan() => format!("{:.0}", value.round()),
        _ => NO_ESTIMATE.to_string(),
    }
}

/// Upper-case the first character, leave the rest untouched
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Group records by exact exercise label, ordered by first appearance
pub fn group_by_exercise(records: &[WorkoutRecord]) -> Vec<ExerciseSeries<'_>> {
    let mut series: Vec<ExerciseSeries<'_>> = Vec::new();

    for record in records {
        match series.iter_mut().find(|s| s.exercise == record.exercise) {
            Some(existing) => existing.records.push(record),
            None => series.push(ExerciseSeries {
                exercise: &record.exercise,
                records: vec![record],
            }),
        }
    }

    series
}

/// X-axis labels: every record's date, sorted as strings, duplicates kept.
///
/// The axis is shared by all series, so a series with fewer points than
/// there are labels is plotted against the first labels of the axis rather
/// than its own dates.
pub fn date_axis(records: &[WorkoutRecord]) -> Vec<String> {
    let mut dates: Vec<String> = records.iter().map(|r| r.date.clone()).collect();
    dates.sort();
    dates
}

/// Line chart configuration: one dataset per exercise
pub fn chart_config<R: Rng + ?Sized>(
    records: &[WorkoutRecord],
    palette: Palette,
    rng: &mut R,
) -> ChartConfig {
    let datasets = group_by_exercise(records)
        .into_iter()
        .map(|series| {
            let colors = palette.colors(series.exercise, &mut *rng);
            Dataset {
                label: capitalize(series.exercise),
                data: series.weights(),
                border_color: colors.border,
                background_color: colors.background,
                tension: LINE_TENSION,
                fill: true,
                hidden: false,
            }
        })
        .collect();

    ChartConfig {
        kind: "line".to_string(),
        data: ChartData {
            labels: date_axis(records),
            datasets,
        },
        options: ChartOptions::weight_progress(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn record(
        date: &str,
        exercise: &str,
        weight: f64,
        reps: u32,
        est: Option<f64>,
    ) -> WorkoutRecord {
        WorkoutRecord {
            date: date.to_string(),
            exercise: exercise.to_string(),
            weight,
            reps,
            estimated_1rm: est,
        }
    }

    fn sample() -> Vec<WorkoutRecord> {
        vec![
            record("2026-01-12", "squat", 100.0, 5, Some(116.6)),
            record("2026-01-10", "bench", 70.0, 8, None),
            record("2026-01-11", "squat", 102.5, 5, Some(119.5)),
            record("2026-01-10", "deadlift", 140.0, 3, Some(154.0)),
        ]
    }

    #[test]
    fn test_one_row_per_record_in_load_order() {
        let records = sample();
        let rows = table_rows(&records);

        assert_eq!(rows.len(), records.len());
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-01-12", "2026-01-10", "2026-01-11", "2026-01-10"]);
        assert_eq!(rows[0].weight, "100.0");
        assert_eq!(rows[2].weight, "102.5");
        assert_eq!(rows[1].reps, "8");
    }

    #[test]
    fn test_weight_ties_round_up() {
        let rows = table_rows(&[
            record("2026-01-10", "squat", 100.25, 5, None),
            record("2026-01-10", "curl", 2.25, 10, None),
            record("2026-01-10", "press", 42.75, 5, None),
        ]);
        let weights: Vec<&str> = rows.iter().map(|r| r.weight.as_str()).collect();
        assert_eq!(weights, vec!["100.3", "2.3", "42.8"]);

        // 1.45 is stored just below the half, so it rounds down
        assert_eq!(format_weight(1.45), "1.4");
        assert_eq!(format_weight(102.5), "102.5");
        assert_eq!(format_weight(60.0), "60.0");
    }

    #[test]
    fn test_estimate_formatting() {
        assert_eq!(format_estimate(None), "-");
        assert_eq!(format_estimate(Some(0.0)), "-");
        assert_eq!(format_estimate(Some(f64::NAN)), "-");
        assert_eq!(format_estimate(Some(116.6)), "117");
        assert_eq!(format_estimate(Some(119.5)), "120");
        assert_eq!(format_estimate(Some(154.0)), "154");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("squat"), "Squat");
        assert_eq!(capitalize("bench press"), "Bench press");
        assert_eq!(capitalize("Deadlift"), "Deadlift");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_series_labels_match_distinct_exercises() {
        let records = sample();
        let chart = chart_config(&records, Palette::Random, &mut StdRng::seed_from_u64(42));

        let labels: HashSet<&str> = chart.data.datasets.iter().map(|d| d.label.as_str()).collect();
        let expected: HashSet<String> = records.iter().map(|r| capitalize(&r.exercise)).collect();
        let expected: HashSet<&str> = expected.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, expected);

        let order: Vec<&str> = chart.data.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(order, vec!["Squat", "Bench", "Deadlift"]);
    }

    #[test]
    fn test_series_values_are_weights_in_load_order() {
        let records = sample();
        let chart = chart_config(&records, Palette::Random, &mut StdRng::seed_from_u64(42));

        assert_eq!(chart.data.datasets[0].data, vec![100.0, 102.5]);
        assert_eq!(chart.data.datasets[1].data, vec![70.0]);
        assert_eq!(chart.data.datasets[2].data, vec![140.0]);
    }

    #[test]
    fn test_exercise_grouping_is_case_sensitive() {
        let records = vec![
            record("2026-01-10", "Squat", 100.0, 5, None),
            record("2026-01-11", "squat", 105.0, 5, None),
        ];
        let series = group_by_exercise(&records);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_date_axis_sorted_with_duplicates() {
        let axis = date_axis(&sample());
        assert_eq!(axis, vec!["2026-01-10", "2026-01-10", "2026-01-11", "2026-01-12"]);
    }

    #[test]
    fn test_date_axis_is_lexicographic() {
        let records = vec![
            record("2026-1-9", "squat", 100.0, 5, None),
            record("2026-1-10", "squat", 100.0, 5, None),
        ];
        assert_eq!(date_axis(&records), vec!["2026-1-10", "2026-1-9"]);
    }

    #[test]
    fn test_dataset_style() {
        let chart = chart_config(&sample(), Palette::Random, &mut StdRng::seed_from_u64(9));
        for dataset in &chart.data.datasets {
            assert_eq!(dataset.tension, LINE_TENSION);
            assert!(dataset.fill);
            assert!(!dataset.hidden);
            assert!(dataset.border_color.starts_with("rgba("));
            assert!(dataset.background_color.ends_with(", 0.2)"));
        }
    }

    #[test]
    fn test_chart_config_serializes_for_chartjs() {
        let chart = chart_config(&sample(), Palette::Stable, &mut StdRng::seed_from_u64(0));
        let json = serde_json::to_value(&chart).unwrap();

        assert_eq!(json["type"], "line");
        assert_eq!(json["data"]["datasets"][0]["label"], "Squat");
        assert!(json["data"]["datasets"][0]["borderColor"].is_string());
        assert_eq!(json["options"]["plugins"]["title"]["text"], CHART_TITLE);
        assert_eq!(json["options"]["plugins"]["legend"]["position"], "top");
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], false);
        assert_eq!(json["options"]["scales"]["y"]["title"]["text"], "Weight (lbs)");
        assert!(json["options"]["scales"]["x"].get("beginAtZero").is_none());
    }

    #[test]
    fn test_empty_records() {
        let view = DashboardView::build(&[], Palette::Random, &mut StdRng::seed_from_u64(0));
        assert!(view.rows.is_empty());
        assert!(view.chart.data.labels.is_empty());
        assert!(view.chart.data.datasets.is_empty());
    }
}
