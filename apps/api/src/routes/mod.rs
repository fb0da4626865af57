pub mod health;
pub mod resume;

use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::limit::RequestBodyLimitLayer;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /
async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": health::SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "detailed_health": "GET /api/v1/health",
            "generate_resume": "POST /api/v1/generate-resume",
            "validate_resume": "POST /api/v1/validate-resume",
            "config": "GET /api/v1/config",
            "templates": "GET /api/v1/templates"
        }
    }))
}

async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_request_bytes;

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/health", get(health::detailed_health_handler))
        .route(
            "/api/v1/generate-resume",
            post(resume::handle_generate_resume),
        )
        .route(
            "/api/v1/validate-resume",
            post(resume::handle_validate_resume),
        )
        .route("/api/v1/config", get(resume::handle_get_config))
        .route("/api/v1/templates", get(resume::handle_list_templates))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
