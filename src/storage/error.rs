//! Workout log error types
//!
//! Defines all errors that can occur while reading or writing the log file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Log file contents are not a JSON array of workouts
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization failed while writing the log
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Date is not `YYYY-MM-DD`
    #[error("Date must be in YYYY-MM-DD format, got {0:?}")]
    InvalidDate(String),

    /// Record fields failed validation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::InvalidDate("tomorrow".to_string());
        assert_eq!(
            err.to_string(),
            "Date must be in YYYY-MM-DD format, got \"tomorrow\""
        );
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StoreError::io("data/workouts.json", io_err);
        assert!(err.to_string().contains("data/workouts.json"));
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
