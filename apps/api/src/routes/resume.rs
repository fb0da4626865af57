use axum::{
    extract::State,
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::AppError,
    layout::{
        templates::{COLOR_SCHEMES, TEMPLATES},
        FontFamily, PageSize,
    },
    models::ResumeDocument,
    render::{attachment_filename, render_with_timeout},
    state::AppState,
    validation::{validate_content, validate_resume, ValidationResult},
};

const RENDER_ID_HEADER: HeaderName = HeaderName::from_static("x-render-id");

#[derive(Serialize)]
pub struct ValidationSummary {
    pub total_issues: usize,
    pub total_warnings: usize,
    pub sections_validated: Vec<String>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: ValidationSummary,
}

impl From<ValidationResult> for ValidateResponse {
    fn from(result: ValidationResult) -> Self {
        Self {
            valid: result.is_valid,
            summary: ValidationSummary {
                total_issues: result.issues.len(),
                total_warnings: result.warnings.len(),
                sections_validated: result.sections_validated,
            },
            issues: result.issues,
            warnings: result.warnings,
        }
    }
}

/// Parse a raw request body, filling absent settings from configured defaults.
fn parse_document(state: &AppState, body: &[u8]) -> Result<ResumeDocument, AppError> {
    let mut value: Value = serde_json::from_slice(body).map_err(|e| AppError::Validation {
        issues: vec![format!("Invalid JSON: {e}")],
    })?;
    state.config.pdf_defaults.apply_to(&mut value);
    serde_json::from_value(value).map_err(|e| AppError::Validation {
        issues: vec![format!("Invalid resume data: {e}")],
    })
}

/// POST /api/v1/generate-resume
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let render_id = Uuid::new_v4();
    let document = parse_document(&state, &body)?;

    let validation = validate_content(&document, &state.config.validation);
    if !validation.is_valid {
        warn!(%render_id, issues = validation.issues.len(), "Resume rejected by validation");
        return Err(AppError::Validation {
            issues: validation.issues,
        });
    }

    let filename = attachment_filename(&document.personal_info.name);
    let rendered = render_with_timeout(
        state.renderer.clone(),
        document,
        state.config.render_timeout,
        render_id,
    )
    .await?;

    info!(%render_id, %filename, "Serving generated resume");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
            (RENDER_ID_HEADER, render_id.to_string()),
        ],
        rendered.bytes,
    )
        .into_response())
}

/// POST /api/v1/validate-resume
pub async fn handle_validate_resume(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ValidateResponse>, AppError> {
    let document = parse_document(&state, &body)?;
    let result = validate_resume(&document, &state.config.validation);
    Ok(Json(result.into()))
}

/// GET /api/v1/config
/// Public, non-sensitive configuration.
pub async fn handle_get_config(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "pdf_settings": config.pdf_defaults,
        "validation": config.validation,
        "api": {
            "version": env!("CARGO_PKG_VERSION"),
            "max_pages": config.max_pages,
            "render_timeout_secs": config.render_timeout.as_secs(),
            "max_request_bytes": config.max_request_bytes
        }
    }))
}

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<Value> {
    let available = state.fonts.available_families();
    let fonts: Vec<Value> = FontFamily::ALL
        .iter()
        .map(|family| {
            json!({
                "name": family.name(),
                "available": available.contains(family)
            })
        })
        .collect();
    let sizes: Vec<&str> = PageSize::ALL.iter().map(PageSize::name).collect();

    Json(json!({
        "templates": TEMPLATES,
        "color_schemes": COLOR_SCHEMES,
        "fonts": fonts,
        "document_sizes": sizes
    }))
}
