use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub const SERVICE_NAME: &str = "resume-api";

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE_NAME
    }))
}

/// GET /api/v1/health
/// Reports config and font library state.
pub async fn detailed_health_handler(State(state): State<AppState>) -> Json<Value> {
    let fonts = if state.fonts.has_embedded() {
        "embedded"
    } else {
        "builtin-fallback"
    };
    let families: Vec<&str> = state
        .fonts
        .available_families()
        .iter()
        .map(|f| f.name())
        .collect();

    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "checks": {
            "config": "loaded",
            "fonts": fonts,
            "font_families": families,
            "renderer": "native-pdf"
        }
    }))
}
