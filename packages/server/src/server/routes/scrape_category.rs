use acquisition::category::normalize_url;
use acquisition::{AcquisitionError, CategoryScrape, DEFAULT_LIMIT};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::kernel::ServerDeps;
use crate::server::app::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeCategoryRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ScrapeCategoryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CategoryScrape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeCategoryResponse {
    fn ok(data: CategoryScrape) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Run one category scrape and shape the outcome into the response envelope.
pub async fn scrape_category(
    deps: &ServerDeps,
    request: ScrapeCategoryRequest,
) -> (StatusCode, ScrapeCategoryResponse) {
    match try_scrape_category(deps, &request).await {
        Ok(data) => (StatusCode::OK, ScrapeCategoryResponse::ok(data)),
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                tracing::error!(url = %request.url, error = %e, "Category scrape failed");
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, ScrapeCategoryResponse::failed(e.to_string()))
        }
    }
}

async fn try_scrape_category(
    deps: &ServerDeps,
    request: &ScrapeCategoryRequest,
) -> Result<CategoryScrape, AcquisitionError> {
    let limit = match request.limit {
        None => DEFAULT_LIMIT,
        Some(limit) if limit > 0 => limit as usize,
        Some(_) => return Err(AcquisitionError::validation("limit must be a positive integer")),
    };

    // Caller mistakes are reported before any setup problem.
    let url = normalize_url(&request.url)?;

    deps.category_scraper()?.scrape_category(&url, limit).await
}

/// POST /scrape-category
pub async fn scrape_category_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ScrapeCategoryRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ScrapeCategoryResponse::failed(rejection.body_text())),
            )
                .into_response()
        }
    };

    let (status, response) = scrape_category(&state.deps, request).await;
    (status, Json(response)).into_response()
}
