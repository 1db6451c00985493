use acquisition::RehostReport;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::kernel::ServerDeps;
use crate::server::app::AppState;

/// Body of `POST /rehost-images`: a run summary, or the setup error that
/// stopped the run before any image was touched.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RehostImagesResponse {
    Summary {
        message: String,
        total: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        success: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        failures: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        errors: Option<Vec<String>>,
    },
    Failed {
        error: String,
    },
}

impl From<RehostReport> for RehostImagesResponse {
    fn from(report: RehostReport) -> Self {
        let message = report.summary_message();

        if report.is_empty() {
            return Self::Summary {
                message,
                total: 0,
                success: None,
                failures: None,
                errors: None,
            };
        }

        Self::Summary {
            message,
            total: report.total,
            success: Some(report.success),
            failures: Some(report.failures),
            errors: (!report.errors.is_empty()).then_some(report.errors),
        }
    }
}

/// Run one rehost pass and shape the outcome into the response body.
pub async fn rehost_images(deps: &ServerDeps) -> (StatusCode, RehostImagesResponse) {
    let outcome = match deps.image_rehoster() {
        Ok(rehoster) => rehoster.rehost_proxied_images().await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(report) => (StatusCode::OK, report.into()),
        Err(e) => {
            tracing::error!(error = %e, "Image rehosting failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                RehostImagesResponse::Failed {
                    error: e.to_string(),
                },
            )
        }
    }
}

/// POST /rehost-images
pub async fn rehost_images_handler(Extension(state): Extension<AppState>) -> Response {
    let (status, response) = rehost_images(&state.deps).await;
    (status, Json(response)).into_response()
}
