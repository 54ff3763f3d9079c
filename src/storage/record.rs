//! Workout record type
//!
//! A `WorkoutRecord` is one logged set: the date it was performed, the
//! movement, the load, the repetition count and, once stats have been
//! computed, an estimated one-rep max.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{StoreError, StoreResult};

/// Date format used for every record written by the CLI
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One training entry
///
/// `date` is kept as the raw string token from the log file. The dashboard
/// never parses it; only user input coming through [`WorkoutRecord::new`]
/// is validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutRecord {
    /// ISO date, e.g. `2026-01-10`
    pub date: String,
    /// Movement label, e.g. `squat`
    pub exercise: String,
    /// Load in pounds
    pub weight: f64,
    /// Repetitions performed
    pub reps: u32,
    /// Estimated one-repetition maximum, if computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_1rm: Option<f64>,
}

impl WorkoutRecord {
    /// Create a validated record from user input
    pub fn new(
        date: impl Into<String>,
        exercise: impl Into<String>,
        weight: f64,
        reps: u32,
    ) -> StoreResult<Self> {
        let date = date.into();
        validate_date(&date)?;

        let exercise = exercise.into();
        if exercise.trim().is_empty() {
            return Err(StoreError::InvalidRecord(
                "exercise must not be empty".to_string(),
            ));
        }

        if !weight.is_finite() || weight < 0.0 {
            return Err(StoreError::InvalidRecord(format!(
                "weight must be a non-negative number, got {}",
                weight
            )));
        }

        Ok(Self {
            date,
            exercise,
            weight,
            reps,
            estimated_1rm: None,
        })
    }

    /// Builder method: set the estimated 1RM
    pub fn with_estimate(mut self, estimate: f64) -> Self {
        self.estimated_1rm = Some(estimate);
        self
    }

    /// Parsed calendar date. Lenient about zero padding so hand-edited logs
    /// still order by date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// Check that a date token is `YYYY-MM-DD`, zero-padded.
///
/// chrono alone accepts `2026-1-9`; those tokens would not sort as dates.
pub fn validate_date(date: &str) -> StoreResult<NaiveDate> {
    if date.len() != 10 {
        return Err(StoreError::InvalidDate(date.to_string()));
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| StoreError::InvalidDate(date.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_valid() {
        let record = WorkoutRecord::new("2026-01-10", "Squat", 100.0, 5).unwrap();
        assert_eq!(record.date, "2026-01-10");
        assert_eq!(record.exercise, "Squat");
        assert_eq!(record.estimated_1rm, None);
    }

    #[test]
    fn test_new_record_rejects_bad_date() {
        let err = WorkoutRecord::new("10/01/2026", "Squat", 100.0, 5).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDate(_)));
    }

    #[test]
    fn test_new_record_rejects_unpadded_date() {
        for date in ["2026-1-9", "2026-01-9", "2026-1-09"] {
            let err = WorkoutRecord::new(date, "Squat", 100.0, 5).unwrap_err();
            assert!(matches!(err, StoreError::InvalidDate(_)), "{}", date);
        }
        assert!(validate_date("2026-01-09").is_ok());
    }

    #[test]
    fn test_new_record_rejects_negative_weight() {
        let err = WorkoutRecord::new("2026-01-10", "Squat", -5.0, 5).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(_)));
    }

    #[test]
    fn test_missing_estimate_is_not_serialized() {
        let record = WorkoutRecord::new("2026-01-10", "bench", 60.0, 8).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("estimated_1rm"));

        let with = record.with_estimate(76.0);
        let json = serde_json::to_string(&with).unwrap();
        assert!(json.contains("\"estimated_1rm\":76.0"));
    }

    #[test]
    fn test_deserialize_without_estimate() {
        let record: WorkoutRecord = serde_json::from_str(
            r#"{"date":"2026-01-11","exercise":"deadlift","weight":140,"reps":3}"#,
        )
        .unwrap();
        assert_eq!(record.weight, 140.0);
        assert_eq!(record.reps, 3);
        assert!(record.estimated_1rm.is_none());
    }

    #[test]
    fn test_parsed_date() {
        let mut record = WorkoutRecord::new("2026-02-01", "squat", 90.0, 5).unwrap();
        assert_eq!(
            record.parsed_date(),
            NaiveDate::from_ymd_opt(2026, 2, 1)
        );
        record.date = "2026-2-1".to_string();
        assert_eq!(
            record.parsed_date(),
            NaiveDate::from_ymd_opt(2026, 2, 1)
        );
        record.date = "someday".to_string();
        assert!(record.parsed_date().is_none());
    }
}
