//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{health_handler, rehost_images_handler, scrape_category_handler};

/// Headers browser clients of the hosted backend send on every call.
const CLIENT_INFO_HEADERS: [HeaderName; 6] = [
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    HeaderName::from_static("x-supabase-client-platform"),
    HeaderName::from_static("x-supabase-client-platform-version"),
    HeaderName::from_static("x-supabase-client-runtime"),
    HeaderName::from_static("x-supabase-client-runtime-version"),
];

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

impl AppState {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            deps: Arc::new(deps),
        }
    }
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let app_state = AppState::new(deps);

    // CORS configuration - any origin, pre-flight answered by the layer
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(
            [AUTHORIZATION, CONTENT_TYPE]
                .into_iter()
                .chain(CLIENT_INFO_HEADERS)
                .collect::<Vec<_>>(),
        );

    Router::new()
        .route("/scrape-category", post(scrape_category_handler))
        .route("/rehost-images", post(rehost_images_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
