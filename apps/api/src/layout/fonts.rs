//! Font library: the embedded TrueType family plus the built-in PDF fonts.
//!
//! Loaded once at startup and shared read-only through `Arc`. A missing or
//! corrupt font file is not fatal; the library degrades to the built-in
//! families and the style resolver falls back to Helvetica.

use std::{collections::HashMap, path::Path, sync::Arc};

use tracing::{info, warn};

use crate::{
    errors::RenderError,
    layout::font_metrics::{FontFace, FontFamily},
};

/// Unicode ranges probed when building the character → glyph map.
/// Résumé text outside these ranges renders as `.notdef`.
const MAPPED_RANGES: &[(u32, u32)] = &[
    (0x0020, 0x007E), // Basic Latin
    (0x00A0, 0x024F), // Latin-1 Supplement, Latin Extended-A/B
    (0x0370, 0x03FF), // Greek
    (0x0400, 0x04FF), // Cyrillic
    (0x2000, 0x206F), // General Punctuation
    (0x20A0, 0x20CF), // Currency Symbols
    (0x2100, 0x214F), // Letterlike Symbols
];

/// A parsed TrueType font ready for measurement and embedding.
pub struct EmbeddedFont {
    postscript_name: String,
    data: Vec<u8>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    cap_height: i16,
    bbox: [i16; 4],
    glyphs: HashMap<char, u16>,
    advances: Vec<u16>,
}

impl std::fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedFont")
            .field("postscript_name", &self.postscript_name)
            .field("bytes", &self.data.len())
            .field("glyphs", &self.glyphs.len())
            .finish()
    }
}

impl EmbeddedFont {
    pub fn from_bytes(postscript_name: &str, data: Vec<u8>) -> Result<Self, RenderError> {
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| RenderError::FontLoad(format!("{postscript_name}: {e}")))?;

        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(RenderError::FontLoad(format!(
                "{postscript_name}: units_per_em is zero"
            )));
        }

        let advances: Vec<u16> = (0..face.number_of_glyphs())
            .map(|gid| {
                face.glyph_hor_advance(ttf_parser::GlyphId(gid))
                    .unwrap_or(0)
            })
            .collect();

        let mut glyphs = HashMap::new();
        for &(start, end) in MAPPED_RANGES {
            for cp in start..=end {
                let Some(ch) = char::from_u32(cp) else {
                    continue;
                };
                if let Some(gid) = face.glyph_index(ch) {
                    glyphs.insert(ch, gid.0);
                }
            }
        }

        let rect = face.global_bounding_box();
        let ascender = face.ascender();
        let cap_height = face.capital_height().unwrap_or(ascender);

        Ok(Self {
            postscript_name: postscript_name.to_string(),
            units_per_em,
            ascender,
            descender: face.descender(),
            cap_height,
            bbox: [rect.x_min, rect.y_min, rect.x_max, rect.y_max],
            glyphs,
            advances,
            data,
        })
    }

    pub fn from_path(postscript_name: &str, path: &Path) -> Result<Self, RenderError> {
        let data = std::fs::read(path)
            .map_err(|e| RenderError::FontLoad(format!("{}: {e}", path.display())))?;
        Self::from_bytes(postscript_name, data)
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Glyph id for `ch`; 0 (`.notdef`) when the font has no mapping.
    pub fn glyph_id(&self, ch: char) -> u16 {
        self.glyphs.get(&ch).copied().unwrap_or(0)
    }

    /// Advance width of the glyph in font units.
    pub fn glyph_advance(&self, gid: u16) -> u16 {
        self.advances.get(gid as usize).copied().unwrap_or(0)
    }

    /// Advance width of `ch` as a fraction of the em.
    pub fn advance_em(&self, ch: char) -> f32 {
        self.glyph_advance(self.glyph_id(ch)) as f32 / self.units_per_em as f32
    }

    /// Scale factor from font units to PDF glyph space (1/1000 em).
    pub fn to_pdf_units(&self, value: i32) -> i32 {
        (value as f64 * 1000.0 / self.units_per_em as f64).round() as i32
    }

    pub fn vertical_metrics_em(&self) -> (f32, f32) {
        let upem = self.units_per_em as f32;
        (self.ascender as f32 / upem, self.descender as f32 / upem)
    }

    pub fn ascender(&self) -> i16 {
        self.ascender
    }

    pub fn descender(&self) -> i16 {
        self.descender
    }

    pub fn cap_height(&self) -> i16 {
        self.cap_height
    }

    pub fn bbox(&self) -> [i16; 4] {
        self.bbox
    }
}

/// Process-wide font set. Built-in families are always present; the embedded
/// family is present only when both font files parsed.
#[derive(Debug, Clone, Default)]
pub struct FontLibrary {
    embedded: Option<EmbeddedPair>,
}

#[derive(Debug, Clone)]
struct EmbeddedPair {
    regular: Arc<EmbeddedFont>,
    bold: Arc<EmbeddedFont>,
}

impl FontLibrary {
    /// Library with the PDF standard families only.
    pub fn builtin_only() -> Self {
        Self { embedded: None }
    }

    /// Load the embedded family from disk, failing on the first bad file.
    pub fn try_load(regular: &Path, bold: &Path) -> Result<Self, RenderError> {
        let regular = EmbeddedFont::from_path("OpenSans-Regular", regular)?;
        let bold = EmbeddedFont::from_path("OpenSans-Bold", bold)?;
        Ok(Self {
            embedded: Some(EmbeddedPair {
                regular: Arc::new(regular),
                bold: Arc::new(bold),
            }),
        })
    }

    /// Load the embedded family, degrading to built-in fonts on failure.
    pub fn load(regular: &Path, bold: &Path) -> Self {
        match Self::try_load(regular, bold) {
            Ok(library) => {
                info!(
                    "Loaded embedded font family from {} and {}",
                    regular.display(),
                    bold.display()
                );
                library
            }
            Err(e) => {
                warn!("{e}; falling back to built-in PDF fonts");
                Self::builtin_only()
            }
        }
    }

    pub fn has_embedded(&self) -> bool {
        self.embedded.is_some()
    }

    /// Families that can be rendered right now.
    pub fn available_families(&self) -> Vec<FontFamily> {
        FontFamily::ALL
            .into_iter()
            .filter(|family| self.faces(*family).is_some())
            .collect()
    }

    /// (regular, bold) faces for a family; `None` when it is not available.
    pub fn faces(&self, family: FontFamily) -> Option<(FontFace, FontFace)> {
        match family.standard_pair() {
            Some((regular, bold)) => Some((FontFace::Standard(regular), FontFace::Standard(bold))),
            None => self.embedded.as_ref().map(|pair| {
                (
                    FontFace::Embedded(pair.regular.clone()),
                    FontFace::Embedded(pair.bold.clone()),
                )
            }),
        }
    }
}
