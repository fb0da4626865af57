// Layout pipeline: document model builder, style resolver, pagination engine.
// Everything here is synchronous CPU work; callers run it inside
// tokio::task::spawn_blocking (see render::render_with_timeout).

pub mod blocks;
pub mod font_metrics;
pub mod fonts;
pub mod paginate;
pub mod style;
pub mod templates;

// Re-export the public API consumed by the renderer and handlers.
pub use blocks::build;
pub use font_metrics::FontFamily;
pub use fonts::FontLibrary;
pub use paginate::{paginate, DEFAULT_MAX_PAGES};
pub use style::{PageSize, StyleCache};
