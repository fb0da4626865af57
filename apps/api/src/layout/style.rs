//! Style resolution: raw `StyleConfig` → concrete fonts, sizes, colors and page geometry.
//!
//! `resolve` is pure. Invalid colors, sizes and page sizes are errors; an
//! unknown or unavailable font family is downgraded to Helvetica with a warning.

use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
    sync::Arc,
};

use serde::Serialize;
use tracing::warn;

use crate::{
    errors::RenderError,
    layout::{
        font_metrics::{FontFace, FontFamily},
        fonts::FontLibrary,
        templates::{template_or_default, Spacing},
    },
    models::StyleConfig,
};

pub const MIN_FONT_SIZE: f32 = 8.0;
pub const MAX_FONT_SIZE: f32 = 16.0;
pub const NAME_FONT_SIZE: f32 = 20.0;
/// Line height as a multiple of the font size.
pub const LEADING_FACTOR: f32 = 1.2;
const POINTS_PER_INCH: f32 = 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Color
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parse `#RRGGBB` or `#RGB`.
    pub fn from_hex(value: &str) -> Result<Self, RenderError> {
        let invalid = || RenderError::UnsupportedStyle(format!("invalid theme color '{value}'"));
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?,
                })
            }
            _ => Err(invalid()),
        }
    }

    /// Components scaled to 0.0..=1.0 for PDF color operators.
    pub fn unit_components(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageSize {
    Letter,
    A4,
}

impl PageSize {
    pub const ALL: [PageSize; 2] = [PageSize::Letter, PageSize::A4];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "letter" => Some(Self::Letter),
            "a4" => Some(Self::A4),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Letter => "Letter",
            Self::A4 => "A4",
        }
    }

    /// (width, height) in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            Self::Letter => (612.0, 792.0),
            Self::A4 => (595.28, 841.89),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Roles and text styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleRole {
    Name,
    Contact,
    SectionHeading,
    ItemTitle,
    ItemSubtitle,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
    pub alignment: Alignment,
}

impl TextStyle {
    pub fn leading(&self) -> f32 {
        self.size * LEADING_FACTOR
    }

    pub fn measure(&self, text: &str) -> f32 {
        self.face.measure_str(text, self.size)
    }

    /// Distance from the top of a line box to the baseline.
    pub fn baseline_offset(&self) -> f32 {
        self.face.baseline_offset(self.size, self.leading())
    }
}

/// Every concrete style a single render needs.
#[derive(Debug, Clone)]
pub struct ResolvedStyleSet {
    pub page_size: PageSize,
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    pub spacing: Spacing,
    pub theme_color: Rgb,
    pub family: FontFamily,
    pub name: TextStyle,
    pub contact: TextStyle,
    pub section_heading: TextStyle,
    pub item_title: TextStyle,
    pub item_subtitle: TextStyle,
    pub body: TextStyle,
}

impl ResolvedStyleSet {
    pub fn role(&self, role: StyleRole) -> &TextStyle {
        match role {
            StyleRole::Name => &self.name,
            StyleRole::Contact => &self.contact,
            StyleRole::SectionHeading => &self.section_heading,
            StyleRole::ItemTitle => &self.item_title,
            StyleRole::ItemSubtitle => &self.item_subtitle,
            StyleRole::Body => &self.body,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.page_height - self.margins.top - self.margins.bottom
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolution
// ────────────────────────────────────────────────────────────────────────────

pub fn resolve(config: &StyleConfig, fonts: &FontLibrary) -> Result<ResolvedStyleSet, RenderError> {
    let theme_color = Rgb::from_hex(&config.theme_color)?;

    let page_size = PageSize::parse(&config.document_size).ok_or_else(|| {
        RenderError::UnsupportedStyle(format!(
            "unsupported document size '{}', expected Letter or A4",
            config.document_size
        ))
    })?;

    let body_size = parse_font_size(&config.font_size)?;

    let family = FontFamily::parse(&config.font_family).unwrap_or_else(|| {
        warn!(
            requested = %config.font_family,
            "Unsupported font family, using {}",
            FontFamily::FALLBACK.name()
        );
        FontFamily::FALLBACK
    });
    let (family, (regular, bold)) = match fonts.faces(family) {
        Some(faces) => (family, faces),
        None => {
            warn!(
                requested = family.name(),
                "Font family unavailable (font files not loaded), using {}",
                FontFamily::FALLBACK.name()
            );
            let faces = FontLibrary::builtin_only()
                .faces(FontFamily::FALLBACK)
                .ok_or_else(|| RenderError::FontLoad("no usable font family".to_string()))?;
            (FontFamily::FALLBACK, faces)
        }
    };

    let template = template_or_default(config.template.as_deref());
    let (page_width, page_height) = page_size.dimensions();

    let style = |face: &FontFace, size: f32, color: Rgb, alignment: Alignment| TextStyle {
        face: face.clone(),
        size,
        color,
        alignment,
    };

    Ok(ResolvedStyleSet {
        page_size,
        page_width,
        page_height,
        margins: Margins {
            top: template.margins.top * POINTS_PER_INCH,
            right: template.margins.right * POINTS_PER_INCH,
            bottom: template.margins.bottom * POINTS_PER_INCH,
            left: template.margins.left * POINTS_PER_INCH,
        },
        spacing: template.spacing,
        theme_color,
        family,
        name: style(&bold, NAME_FONT_SIZE, theme_color, Alignment::Center),
        contact: style(&regular, body_size, Rgb::BLACK, Alignment::Center),
        section_heading: style(&bold, body_size + 2.0, theme_color, Alignment::Left),
        item_title: style(&bold, body_size, Rgb::BLACK, Alignment::Left),
        item_subtitle: style(&regular, body_size, Rgb::BLACK, Alignment::Left),
        body: style(&regular, body_size, Rgb::BLACK, Alignment::Left),
    })
}

/// Parse a font size in points. Non-numeric values are rejected; values
/// outside the supported range are clamped.
pub fn parse_font_size(raw: &str) -> Result<f32, RenderError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("pt").unwrap_or(trimmed).trim();
    let size: f32 = number
        .parse()
        .ok()
        .filter(|v: &f32| v.is_finite() && *v > 0.0)
        .ok_or_else(|| RenderError::UnsupportedStyle(format!("invalid font size '{raw}'")))?;

    if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
        let clamped = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        warn!(requested = size, clamped, "Font size out of range, clamping");
        return Ok(clamped);
    }
    Ok(size)
}

// ────────────────────────────────────────────────────────────────────────────
// Per-render cache
// ────────────────────────────────────────────────────────────────────────────

/// Memoizes resolved style sets by config hash for the lifetime of one render.
#[derive(Default)]
pub struct StyleCache {
    entries: HashMap<u64, Arc<ResolvedStyleSet>>,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_resolve(
        &mut self,
        config: &StyleConfig,
        fonts: &FontLibrary,
    ) -> Result<Arc<ResolvedStyleSet>, RenderError> {
        let key = config_hash(config);
        if let Some(styles) = self.entries.get(&key) {
            return Ok(styles.clone());
        }
        let styles = Arc::new(resolve(config, fonts)?);
        self.entries.insert(key, styles.clone());
        Ok(styles)
    }
}

fn config_hash(config: &StyleConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> FontLibrary {
        FontLibrary::builtin_only()
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(
            Rgb::from_hex("#1f2937").unwrap(),
            Rgb { r: 0x1f, g: 0x29, b: 0x37 }
        );
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb { r: 255, g: 255, b: 255 });
        for bad in ["notacolor", "#12345", "1f2937", "#ggg", "#1f29378"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(RenderError::UnsupportedStyle(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let config = StyleConfig {
            font_family: "Helvetica".into(),
            ..StyleConfig::default()
        };
        let styles = resolve(&config, &builtin()).unwrap();
        assert_eq!(styles.page_size, PageSize::Letter);
        assert_eq!(styles.page_width, 612.0);
        assert_eq!(styles.margins.left, 36.0);
        assert_eq!(styles.body.size, 11.0);
        assert_eq!(styles.section_heading.size, 13.0);
        assert_eq!(styles.name.size, NAME_FONT_SIZE);
        assert_eq!(styles.name.alignment, Alignment::Center);
        assert_eq!(styles.section_heading.color, styles.theme_color);
        assert_eq!(styles.body.color, Rgb::BLACK);
        assert_eq!(styles.item_title.face.resource_key(), "Helvetica-Bold");
        assert_eq!(styles.item_subtitle.face.resource_key(), "Helvetica");
    }

    #[test]
    fn test_invalid_theme_color_is_unsupported_style() {
        let config = StyleConfig {
            theme_color: "notacolor".into(),
            ..StyleConfig::default()
        };
        assert!(matches!(
            resolve(&config, &builtin()),
            Err(RenderError::UnsupportedStyle(_))
        ));
    }

    #[test]
    fn test_unknown_document_size_rejected() {
        let config = StyleConfig {
            document_size: "Tabloid".into(),
            ..StyleConfig::default()
        };
        assert!(matches!(
            resolve(&config, &builtin()),
            Err(RenderError::UnsupportedStyle(_))
        ));
    }

    #[test]
    fn test_a4_dimensions() {
        let config = StyleConfig {
            document_size: "a4".into(),
            ..StyleConfig::default()
        };
        let styles = resolve(&config, &builtin()).unwrap();
        assert_eq!((styles.page_width, styles.page_height), (595.28, 841.89));
    }

    #[test]
    fn test_font_size_parsing() {
        assert_eq!(parse_font_size("12").unwrap(), 12.0);
        assert_eq!(parse_font_size(" 10.5pt ").unwrap(), 10.5);
        assert_eq!(parse_font_size("30").unwrap(), MAX_FONT_SIZE);
        assert_eq!(parse_font_size("4").unwrap(), MIN_FONT_SIZE);
        assert!(parse_font_size("large").is_err());
        assert!(parse_font_size("-3").is_err());
    }

    #[test]
    fn test_unknown_family_falls_back_to_helvetica() {
        let config = StyleConfig {
            font_family: "Comic Sans".into(),
            ..StyleConfig::default()
        };
        let styles = resolve(&config, &builtin()).unwrap();
        assert_eq!(styles.family, FontFamily::Helvetica);
    }

    #[test]
    fn test_embedded_family_unavailable_falls_back() {
        // Default family is OpenSans, which the built-in library cannot supply.
        let styles = resolve(&StyleConfig::default(), &builtin()).unwrap();
        assert_eq!(styles.family, FontFamily::Helvetica);
        assert_eq!(styles.body.face.resource_key(), "Helvetica");
    }

    #[test]
    fn test_template_controls_margins_and_spacing() {
        let config = StyleConfig {
            template: Some("classic".into()),
            ..StyleConfig::default()
        };
        let styles = resolve(&config, &builtin()).unwrap();
        assert_eq!(styles.margins.top, 54.0);
        assert_eq!(styles.spacing.section, 10.0);
    }

    #[test]
    fn test_style_cache_reuses_entries() {
        let fonts = builtin();
        let mut cache = StyleCache::new();
        let config = StyleConfig::default();
        let first = cache.get_or_resolve(&config, &fonts).unwrap();
        let second = cache.get_or_resolve(&config, &fonts).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let other = StyleConfig {
            font_size: "12".into(),
            ..StyleConfig::default()
        };
        let resized = cache.get_or_resolve(&other, &fonts).unwrap();
        assert!(!Arc::ptr_eq(&first, &resized));
        assert_eq!(resized.body.size, 12.0);
    }
}
