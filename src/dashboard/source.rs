//! Workout sources
//!
//! Where the dashboard gets its records from. The default is the local log
//! file; an HTTP source covers a dashboard pointed at a log served elsewhere.

use async_trait::async_trait;
use std::path::PathBuf;

use super::error::{DashboardError, DashboardResult};
use crate::storage::WorkoutRecord;

/// Something that can produce the full list of workout records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable location, used in log lines
    fn describe(&self) -> String;

    /// Fetch and decode all records, in stored order
    async fn load(&self) -> DashboardResult<Vec<WorkoutRecord>>;
}

/// Reads the JSON log straight from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> DashboardResult<Vec<WorkoutRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DashboardError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Fetches the JSON log over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Use a preconfigured client (timeouts, proxies)
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> DashboardResult<Vec<WorkoutRecord>> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use tempfile::tempdir;

    /// Serve `router` on an ephemeral local port and return its base URL
    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_file_source_loads_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        std::fs::write(
            &path,
            r#"[{"date":"2026-01-10","exercise":"squat","weight":100,"reps":5,
                 "estimated_1rm":117}]"#,
        )
        .unwrap();

        let records = FileSource::new(&path).load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].estimated_1rm, Some(117.0));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.json")).load().await.unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
    }

    #[tokio::test]
    async fn test_file_source_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        std::fs::write(&path, "[{\"date\": ").unwrap();

        let err = FileSource::new(&path).load().await.unwrap_err();
        assert!(matches!(err, DashboardError::Parse(_)));
    }

    #[tokio::test]
    async fn test_http_source_loads_records() {
        let router = Router::new().route(
            "/data/workouts.json",
            get(|| async {
                r#"[{"date":"2026-01-10","exercise":"bench","weight":60.5,"reps":8}]"#
            }),
        );
        let base = spawn_server(router).await;

        let records = HttpSource::new(format!("{}/data/workouts.json", base))
            .load()
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weight, 60.5);
    }

    #[tokio::test]
    async fn test_http_source_not_found() {
        let router = Router::new().route("/other", get(|| async { StatusCode::OK }));
        let base = spawn_server(router).await;

        let err = HttpSource::new(format!("{}/data/workouts.json", base))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Status(404)));
    }
}
