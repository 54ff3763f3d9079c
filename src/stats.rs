//! Training statistics
//!
//! Estimated one-rep max (Epley), training volume and per-exercise
//! summaries used by the `stats` and `report` commands and the
//! `/api/v1/stats` endpoint.

use serde::Serialize;
use std::borrow::Borrow;

use crate::storage::WorkoutRecord;

/// Epley estimate of the one-repetition maximum.
///
/// A single rep (or zero) is already a max, so the load is returned as is.
pub fn epley_1rm(weight: f64, reps: u32) -> f64 {
    if reps <= 1 {
        weight
    } else {
        weight * (1.0 + reps as f64 / 30.0)
    }
}

/// Fill `estimated_1rm` on every record, rounded to a whole number
pub fn annotate(records: &mut [WorkoutRecord]) {
    for record in records.iter_mut() {
        record.estimated_1rm = Some(epley_1rm(record.weight, record.reps).round());
    }
}

/// Training volume of one set (weight x reps)
pub fn volume(record: &WorkoutRecord) -> f64 {
    record.weight * record.reps as f64
}

/// Normalized exercise key: trimmed and lower-cased
pub fn normalize_exercise(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Put records in calendar order.
///
/// Records with unparseable dates go last. Equal dates keep their relative
/// order.
pub fn sort_chronologically<T: Borrow<WorkoutRecord>>(records: &mut [T]) {
    records.sort_by_key(|r| {
        let record: &WorkoutRecord = r.borrow();
        let date = record.parsed_date();
        (date.is_none(), date)
    });
}

/// Aggregates for one exercise
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExerciseSummary {
    /// Normalized exercise name
    pub exercise: String,
    /// Number of logged sets
    pub entries: usize,
    /// Heaviest load lifted
    pub max_weight: f64,
    /// Sum of weight x reps
    pub total_volume: f64,
    /// Best Epley estimate across all sets
    pub best_estimated_1rm: f64,
}

/// Summary over the whole log
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrainingSummary {
    pub exercises: Vec<ExerciseSummary>,
    pub total_volume: f64,
}

/// Summarize records per exercise.
///
/// Labels are normalized so `Squat` and ` squat ` count as one movement.
/// Exercises are listed in order of first appearance once the log is put in
/// order given by [`sort_chronologically`].
pub fn summarize(records: &[WorkoutRecord]) -> TrainingSummary {
    let mut ordered: Vec<&WorkoutRecord> = records.iter().collect();
    sort_chronologically(&mut ordered);

    let mut exercises: Vec<ExerciseSummary> = Vec::new();
    for record in ordered {
        let key = normalize_exercise(&record.exercise);
        let estimate = epley_1rm(record.weight, record.reps);

        match exercises.iter_mut().find(|s| s.exercise == key) {
            Some(summary) => {
                summary.entries += 1;
                summary.max_weight = summary.max_weight.max(record.weight);
                summary.total_volume += volume(record);
                summary.best_estimated_1rm = summary.best_estimated_1rm.max(estimate);
            }
            None => exercises.push(ExerciseSummary {
                exercise: key,
                entries: 1,
                max_weight: record.weight,
                total_volume: volume(record),
                best_estimated_1rm: estimate,
            }),
        }
    }

    let total_volume: f64 = records.iter().map(volume).sum();

    TrainingSummary {
        exercises,
        total_volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, exercise: &str, weight: f64, reps: u32) -> WorkoutRecord {
        WorkoutRecord::new(date, exercise, weight, reps).unwrap()
    }

    #[test]
    fn test_epley_single_rep_is_weight() {
        assert_eq!(epley_1rm(140.0, 1), 140.0);
        assert_eq!(epley_1rm(140.0, 0), 140.0);
    }

    #[test]
    fn test_epley_multiple_reps() {
        assert!((epley_1rm(100.0, 5) - 116.666_666).abs() < 1e-3);
        assert!((epley_1rm(60.0, 30) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_annotate_rounds() {
        let mut records = vec![
            record("2026-01-10", "squat", 100.0, 5),
            record("2026-01-11", "bench", 80.0, 1),
        ];
        annotate(&mut records);
        assert_eq!(records[0].estimated_1rm, Some(117.0));
        assert_eq!(records[1].estimated_1rm, Some(80.0));
    }

    #[test]
    fn test_summarize_normalizes_and_orders_chronologically() {
        let records = vec![
            record("2026-01-12", "Bench", 70.0, 8),
            record("2026-01-10", "Squat", 100.0, 5),
            record("2026-01-14", " squat", 105.0, 3),
        ];

        let summary = summarize(&records);
        let names: Vec<&str> = summary.exercises.iter().map(|s| s.exercise.as_str()).collect();
        assert_eq!(names, vec!["squat", "bench"]);

        let squat = &summary.exercises[0];
        assert_eq!(squat.entries, 2);
        assert_eq!(squat.max_weight, 105.0);
        assert_eq!(squat.total_volume, 815.0);
        assert!((squat.best_estimated_1rm - 116.666_666).abs() < 1e-3);

        assert_eq!(summary.total_volume, 815.0 + 560.0);
    }

    #[test]
    fn test_sort_uses_calendar_dates() {
        let mut records = vec![
            record("2026-01-10", "squat", 100.0, 5),
            record("2026-01-09", "bench", 70.0, 5),
            record("2026-01-11", "press", 40.0, 5),
        ];
        records[1].date = "2026-1-9".to_string();
        records[2].date = "someday".to_string();

        sort_chronologically(&mut records);
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-1-9", "2026-01-10", "someday"]);

        let names: Vec<String> = summarize(&records)
            .exercises
            .into_iter()
            .map(|s| s.exercise)
            .collect();
        assert_eq!(names, vec!["bench", "squat", "press"]);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert!(summary.exercises.is_empty());
        assert_eq!(summary.total_volume, 0.0);
    }
}
