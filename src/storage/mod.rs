//! Workout storage
//!
//! The training log is one JSON file (by default `data/workouts.json`)
//! holding an array of [`WorkoutRecord`]s in the order they were logged.
//!
//! ## Components
//!
//! - [`WorkoutRecord`]: one logged set
//! - [`WorkoutLog`]: load / append / rewrite the log file
//! - [`write_csv`]: CSV export
//! - [`StoreError`]: everything that can go wrong on the way

mod error;
mod export;
mod log;
mod record;

pub use error::{StoreError, StoreResult};
pub use export::{write_csv, CSV_HEADER};
pub use log::WorkoutLog;
pub use record::{validate_date, WorkoutRecord, DATE_FORMAT};
