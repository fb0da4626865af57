use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised by the rendering pipeline (builder, style resolver, paginator, PDF writer).
///
/// A render either produces a complete PDF or one of these. Partial output is never returned.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Unsupported style: {0}")]
    UnsupportedStyle(String),

    #[error("Font load error: {0}")]
    FontLoad(String),

    #[error("Pagination overflow: {0}")]
    PaginationOverflow(String),

    #[error("PDF serialization failed: {0}")]
    Serialization(String),

    #[error("Render timed out after {0}s")]
    Timeout(u64),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {}", .issues.join("; "))]
    Validation { issues: Vec<String> },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Validation { issues } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Resume data failed validation".to_string(),
                Some(json!({ "issues": issues })),
            ),
            AppError::Render(err) => render_error_parts(err),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

fn render_error_parts(
    err: &RenderError,
) -> (StatusCode, &'static str, String, Option<serde_json::Value>) {
    match err {
        RenderError::MissingRequiredField(_) => (
            StatusCode::BAD_REQUEST,
            "MISSING_REQUIRED_FIELD",
            err.to_string(),
            None,
        ),
        RenderError::UnsupportedStyle(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "UNSUPPORTED_STYLE",
            err.to_string(),
            None,
        ),
        RenderError::PaginationOverflow(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "PAGINATION_OVERFLOW",
            err.to_string(),
            None,
        ),
        RenderError::Timeout(_) => {
            tracing::error!("Render timeout: {err}");
            (
                StatusCode::GATEWAY_TIMEOUT,
                "RENDER_TIMEOUT",
                err.to_string(),
                None,
            )
        }
        RenderError::FontLoad(_) | RenderError::Serialization(_) => {
            tracing::error!("Render failure: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "RENDER_ERROR",
                "PDF generation failed".to_string(),
                None,
            )
        }
    }
}
