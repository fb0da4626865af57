//! Rendering entry points: document → PDF bytes.
//!
//! `Renderer` is the seam for alternative backends; `NativePdfRenderer` is the
//! in-process implementation (builder → style resolver → paginator → PDF writer).
//! Rendering is CPU-bound and synchronous; `render_with_timeout` moves it onto
//! the blocking pool and bounds it with a deadline.

pub mod pdf;

use std::{sync::Arc, time::Duration};

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    errors::{AppError, RenderError},
    layout::{build, paginate, FontLibrary, StyleCache},
    models::ResumeDocument,
};

use self::pdf::{write_pdf, DocumentInfo};

/// A finished PDF.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub trait Renderer: Send + Sync {
    fn render(&self, document: &ResumeDocument) -> Result<RenderedPdf, RenderError>;
}

/// Pure-Rust renderer. Fonts are shared read-only across renders.
pub struct NativePdfRenderer {
    fonts: Arc<FontLibrary>,
    max_pages: usize,
}

impl NativePdfRenderer {
    pub fn new(fonts: Arc<FontLibrary>, max_pages: usize) -> Self {
        Self { fonts, max_pages }
    }
}

impl Renderer for NativePdfRenderer {
    fn render(&self, document: &ResumeDocument) -> Result<RenderedPdf, RenderError> {
        let blocks = build(document)?;

        // Styles live only as long as this render.
        let mut styles = StyleCache::new();
        let resolved = styles.get_or_resolve(&document.settings, &self.fonts)?;

        let pages = paginate(&blocks, &resolved, self.max_pages)?;
        let bytes = write_pdf(
            &pages,
            &DocumentInfo {
                title: document.personal_info.name.trim().to_string(),
            },
        )?;

        Ok(RenderedPdf {
            bytes,
            page_count: pages.len(),
        })
    }
}

/// Render on the blocking pool, failing with `Timeout` past the deadline.
///
/// A timed-out render keeps running on its blocking thread until it finishes;
/// its output is discarded.
#[instrument(skip_all, fields(render_id = %render_id))]
pub async fn render_with_timeout(
    renderer: Arc<dyn Renderer>,
    document: ResumeDocument,
    timeout: Duration,
    render_id: Uuid,
) -> Result<RenderedPdf, AppError> {
    let task = tokio::task::spawn_blocking(move || renderer.render(&document));

    let joined = match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined,
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "Render deadline exceeded");
            return Err(RenderError::Timeout(timeout.as_secs()).into());
        }
    };

    let rendered = joined
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    info!(
        pages = rendered.page_count,
        bytes = rendered.bytes.len(),
        "Resume rendered"
    );
    Ok(rendered)
}

/// `resume_<Name_With_Underscores>.pdf`, restricted to ASCII alphanumerics and `_`.
pub fn attachment_filename(name: &str) -> String {
    let stem: String = name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if stem.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("resume_{stem}.pdf")
    }
}
