use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    scraper_configured: bool,
    rehoster_configured: bool,
}

/// Health check endpoint
///
/// Always 200 while the process is serving. The flags tell whether each
/// job has the credentials it needs.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            scraper_configured: state.deps.scraper_configured(),
            rehoster_configured: state.deps.rehoster_configured(),
        }),
    )
}
