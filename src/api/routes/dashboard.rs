//! Dashboard Routes
//!
//! - GET / - Redirect to the dashboard
//! - GET /dashboard/ - Rendered dashboard page

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::api::DASHBOARD_PATH;

/// GET /
///
/// Redirects to the dashboard page.
pub async fn index() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, DASHBOARD_PATH)])
}

/// GET /dashboard/
///
/// Loads the workouts and renders the page. Load failures still return 200
/// with the error paragraph in the page; colours are redrawn per request.
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.renderer.render_page().await)
}
