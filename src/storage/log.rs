//! Workout log file
//!
//! The log is a single JSON array on disk. Every write rewrites the whole
//! file with two-space indentation so it stays hand-editable.
//!
//! Writes go through a lock shared by every clone of a [`WorkoutLog`], and
//! land in a sibling temp file that is renamed over the log. Readers never
//! see a half-written file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::error::{StoreError, StoreResult};
use super::record::WorkoutRecord;

/// Handle to the JSON workout log
#[derive(Debug, Clone)]
pub struct WorkoutLog {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl WorkoutLog {
    /// Create a handle for the log at `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the log file exists yet
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Read all records. A missing or empty file is an empty log.
    pub async fn load(&self) -> StoreResult<Vec<WorkoutRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Append one record and persist the log
    pub async fn append(&self, record: WorkoutRecord) -> StoreResult<usize> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        records.push(record);
        self.write(&records).await?;

        tracing::debug!(path = ?self.path, count = records.len(), "Appended workout");
        Ok(records.len())
    }

    /// Overwrite the log with `records`
    pub async fn replace_all(&self, records: &[WorkoutRecord]) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write(records).await
    }

    /// Caller must hold `write_lock`
    async fn write(&self, records: &[WorkoutRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(records)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, json)
            .await
            .map_err(|e| StoreError::io(&staging, e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }

    /// `workouts.json` -> `workouts.json.tmp` in the same directory
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("workouts.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
