//! Dashboard server
//!
//! Local HTTP server for the training log, built with Axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Redirect to `/dashboard/`
//! - `GET /dashboard/` - Rendered dashboard
//! - `GET /data/workouts.json` - The raw workout log
//!
//! ## Workouts
//! - `GET /api/v1/workouts` - List workouts
//! - `POST /api/v1/workouts` - Append a workout
//! - `GET /api/v1/stats` - Per-exercise summary
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use athletelog::api::{serve, AppState};
//! use athletelog::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let state = AppState::from_config(&config).await?;
//!     serve(state, &config.dashboard).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeFile, trace::TraceLayer};

use crate::config::DashboardConfig;

/// Path the dashboard page is served under
pub const DASHBOARD_PATH: &str = "/dashboard/";

/// Path the raw workout log is served under
pub const DATA_PATH: &str = "/data/workouts.json";

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/workouts",
            get(routes::workouts::list_workouts).post(routes::workouts::create_workout),
        )
        .route("/stats", get(routes::workouts::get_stats));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let data_file = ServeFile::new(state.log.path());

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .route(DASHBOARD_PATH, get(routes::dashboard::dashboard_page))
        .route_service(DATA_PATH, data_file)
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the dashboard server and run until Ctrl+C / SIGTERM
pub async fn serve(state: AppState, config: &DashboardConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    let url = dashboard_url(listener.local_addr()?);

    tracing::info!("Dashboard available at {}", url);

    if config.open_browser {
        match open_in_browser(&url) {
            Ok(()) => tracing::info!("Opening dashboard in your browser..."),
            Err(e) => tracing::warn!("Auto-open failed: {}. Visit {}", e, url),
        }
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard server shut down gracefully");
    Ok(())
}

/// Browser URL for a bound address. Wildcard binds are reached via localhost.
pub fn dashboard_url(addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        format!("http://localhost:{}{}", addr.port(), DASHBOARD_PATH)
    } else {
        format!("http://{}{}", addr, DASHBOARD_PATH)
    }
}

/// Launch the platform's default browser without waiting for it
pub fn open_in_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        let mut c = std::process::Command::new("open");
        c.arg(url);
        c
    } else if cfg!(target_os = "windows") {
        let mut c = std::process::Command::new("powershell");
        c.args(["-NoProfile", "-Command", "Start-Process", url]);
        c
    } else {
        let mut c = std::process::Command::new("xdg-open");
        c.arg(url);
        c
    };

    command
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map(|_| ())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
