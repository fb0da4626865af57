use std::sync::Arc;

use crate::config::Config;
use crate::layout::FontLibrary;
use crate::render::{NativePdfRenderer, Renderer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Loaded once at startup; read-only afterwards.
    pub fonts: Arc<FontLibrary>,
    /// Pluggable renderer. Default: NativePdfRenderer.
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    pub fn new(config: Config, fonts: FontLibrary) -> Self {
        let fonts = Arc::new(fonts);
        let renderer = Arc::new(NativePdfRenderer::new(fonts.clone(), config.max_pages));
        Self {
            config: Arc::new(config),
            fonts,
            renderer,
        }
    }
}
