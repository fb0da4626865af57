//! # PDF Serializer
//!
//! Writes paginated draw operations as a PDF 1.7 file.
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- catalog, page tree, fonts, per-page content + page objects
//! ...
//! xref                <- byte offsets of each object
//! trailer             <- root + info
//! %%EOF
//! ```
//!
//! Standard fonts are Type1 with WinAnsiEncoding. Embedded TrueType fonts are
//! written as CIDFontType2 with Identity-H encoding (FontFile2, FontDescriptor,
//! CIDFont, ToUnicode CMap, Type0). No dates or file IDs are written, so the
//! same pages always produce the same bytes.

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::{
    errors::RenderError,
    layout::{
        font_metrics::{unicode_to_winansi, FontFace},
        fonts::EmbeddedFont,
        paginate::{DrawOp, Page},
        style::Rgb,
    },
};

const PRODUCER: &str = concat!("resume-api ", env!("CARGO_PKG_VERSION"));
const COMPRESSION_LEVEL: u8 = 6;

/// Document-level metadata written to the Info dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
}

struct PdfObject {
    data: Vec<u8>,
}

/// A font referenced by at least one text run.
struct FontEntry {
    face: FontFace,
    used_chars: BTreeSet<char>,
    object_id: usize,
}

#[derive(Default)]
struct PdfBuilder {
    objects: Vec<PdfObject>,
    fonts: Vec<FontEntry>,
}

impl PdfBuilder {
    fn new() -> Self {
        // 0 = placeholder (objects are 1-indexed), 1 = Catalog, 2 = Pages
        let mut builder = Self::default();
        for _ in 0..3 {
            builder.objects.push(PdfObject { data: Vec::new() });
        }
        builder
    }

    fn add(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(PdfObject { data });
        self.objects.len() - 1
    }

    fn add_stream(&mut self, raw: &[u8], extra_dict: &str) -> Result<usize, RenderError> {
        let compressed = compress_to_vec_zlib(raw, COMPRESSION_LEVEL);
        let mut data: Vec<u8> = Vec::with_capacity(compressed.len() + 64);
        write!(
            data,
            "<< /Length {} {}/Filter /FlateDecode >>\nstream\n",
            compressed.len(),
            extra_dict
        )
        .map_err(|e| RenderError::Serialization(e.to_string()))?;
        data.extend_from_slice(&compressed);
        data.extend_from_slice(b"\nendstream");
        Ok(self.add(data))
    }

    fn font_index(&self, face: &FontFace) -> Option<usize> {
        self.fonts.iter().position(|f| f.face == *face)
    }
}

/// Serialize pages into a complete PDF byte vector.
pub fn write_pdf(pages: &[Page], info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
    if pages.is_empty() {
        return Err(RenderError::Serialization("document has no pages".to_string()));
    }

    let mut builder = PdfBuilder::new();
    collect_fonts(&mut builder, pages);
    write_font_objects(&mut builder)?;

    let font_resources = font_resource_dict(&builder);
    let mut page_ids = Vec::with_capacity(pages.len());

    for page in pages {
        let content = content_stream(&builder, page)?;
        let content_id = builder.add_stream(content.as_bytes(), "")?;

        let annots = link_annotations(page);
        let annots_entry = if annots.is_empty() {
            String::new()
        } else {
            let ids: Vec<String> = annots
                .into_iter()
                .map(|annot| format!("{} 0 R", builder.add(annot.into_bytes())))
                .collect();
            format!(" /Annots [{}]", ids.join(" "))
        };

        let page_dict = format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Contents {} 0 R /Resources << /Font << {} >> >>{} >>",
            page.width, page.height, content_id, font_resources, annots_entry
        );
        page_ids.push(builder.add(page_dict.into_bytes()));
    }

    builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

    let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();
    builder.objects[2].data = format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        page_ids.len()
    )
    .into_bytes();

    let info_dict = format!(
        "<< /Title {} /Producer {} /Creator {} >>",
        pdf_text_string(&info.title),
        pdf_text_string(PRODUCER),
        pdf_text_string(PRODUCER)
    );
    let info_id = builder.add(info_dict.into_bytes());

    serialize(&builder, info_id)
}

// ────────────────────────────────────────────────────────────────────────────
// Fonts
// ────────────────────────────────────────────────────────────────────────────

/// Register fonts in first-use order so resource names are stable.
fn collect_fonts(builder: &mut PdfBuilder, pages: &[Page]) {
    for op in pages.iter().flat_map(|p| p.ops.iter()) {
        let DrawOp::Text { text, face, .. } = op else {
            continue;
        };
        let index = match builder.font_index(face) {
            Some(index) => index,
            None => {
                builder.fonts.push(FontEntry {
                    face: face.clone(),
                    used_chars: BTreeSet::new(),
                    object_id: 0,
                });
                builder.fonts.len() - 1
            }
        };
        builder.fonts[index].used_chars.extend(text.chars());
    }
}

fn write_font_objects(builder: &mut PdfBuilder) -> Result<(), RenderError> {
    for index in 0..builder.fonts.len() {
        let face = builder.fonts[index].face.clone();
        let object_id = match &face {
            FontFace::Standard(font) => {
                let dict = format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.pdf_name()
                );
                builder.add(dict.into_bytes())
            }
            FontFace::Embedded(font) => {
                let used = builder.fonts[index].used_chars.clone();
                write_embedded_font(builder, font, &used)?
            }
        };
        builder.fonts[index].object_id = object_id;
    }
    Ok(())
}

/// Write the five CIDFont objects for an embedded TrueType font.
/// Returns the object id of the Type0 root dictionary.
fn write_embedded_font(
    builder: &mut PdfBuilder,
    font: &EmbeddedFont,
    used_chars: &BTreeSet<char>,
) -> Result<usize, RenderError> {
    let name = sanitize_font_name(font.postscript_name());

    // 1. FontFile2: the whole TrueType file
    let fontfile_id = builder.add_stream(
        font.data(),
        &format!("/Length1 {} ", font.data().len()),
    )?;

    // 2. FontDescriptor
    let [x_min, y_min, x_max, y_max] = font.bbox();
    let scale = |v: i16| font.to_pdf_units(v as i32);
    let stem_v = if name.contains("Bold") { 120 } else { 80 };
    let descriptor = format!(
        "<< /Type /FontDescriptor /FontName /{} /Flags 32 \
         /FontBBox [{} {} {} {}] /ItalicAngle 0 \
         /Ascent {} /Descent {} /CapHeight {} /StemV {} \
         /FontFile2 {} 0 R >>",
        name,
        scale(x_min),
        scale(y_min),
        scale(x_max),
        scale(y_max),
        scale(font.ascender()),
        scale(font.descender()),
        scale(font.cap_height()),
        stem_v,
        fontfile_id
    );
    let descriptor_id = builder.add(descriptor.into_bytes());

    // 3. CIDFont with per-glyph widths for the glyphs actually drawn
    let glyphs: BTreeSet<(u16, char)> = used_chars
        .iter()
        .map(|&ch| (font.glyph_id(ch), ch))
        .collect();
    let mut widths = String::from("[");
    let mut last_gid = None;
    for &(gid, _) in &glyphs {
        if last_gid == Some(gid) {
            continue;
        }
        last_gid = Some(gid);
        let width = font.to_pdf_units(font.glyph_advance(gid) as i32);
        let _ = write!(widths, " {gid} [{width}]");
    }
    widths.push_str(" ]");
    let default_width = font.to_pdf_units(font.glyph_advance(0) as i32);
    let cidfont = format!(
        "<< /Type /Font /Subtype /CIDFontType2 /BaseFont /{} \
         /CIDSystemInfo << /Registry (Adobe) /Ordering (Identity) /Supplement 0 >> \
         /FontDescriptor {} 0 R /DW {} /W {} /CIDToGIDMap /Identity >>",
        name, descriptor_id, default_width, widths
    );
    let cidfont_id = builder.add(cidfont.into_bytes());

    // 4. ToUnicode CMap
    let cmap = tounicode_cmap(&name, &glyphs);
    let tounicode_id = builder.add_stream(cmap.as_bytes(), "")?;

    // 5. Type0 root
    let type0 = format!(
        "<< /Type /Font /Subtype /Type0 /BaseFont /{} /Encoding /Identity-H \
         /DescendantFonts [{} 0 R] /ToUnicode {} 0 R >>",
        name, cidfont_id, tounicode_id
    );
    Ok(builder.add(type0.into_bytes()))
}

fn tounicode_cmap(name: &str, glyphs: &BTreeSet<(u16, char)>) -> String {
    let mut seen = BTreeSet::new();
    let entries: Vec<(u16, char)> = glyphs
        .iter()
        .copied()
        .filter(|(gid, _)| *gid != 0 && seen.insert(*gid))
        .collect();

    let mut cmap = String::new();
    cmap.push_str("/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n");
    cmap.push_str("/CIDSystemInfo\n<< /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
    let _ = writeln!(cmap, "/CMapName /{name}-UTF16 def");
    cmap.push_str("/CMapType 2 def\n1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

    // At most 100 entries per bfchar block.
    for chunk in entries.chunks(100) {
        let _ = writeln!(cmap, "{} beginbfchar", chunk.len());
        for &(gid, ch) in chunk {
            let mut utf16 = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            let _ = writeln!(cmap, "<{gid:04X}> <{hex}>");
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}

fn font_resource_dict(builder: &PdfBuilder) -> String {
    builder
        .fonts
        .iter()
        .enumerate()
        .map(|(i, font)| format!("/F{} {} 0 R", i, font.object_id))
        .collect::<Vec<_>>()
        .join(" ")
}

/// PDF name objects allow only a restricted character set.
fn sanitize_font_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        cleaned
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page content
// ────────────────────────────────────────────────────────────────────────────

fn content_stream(builder: &PdfBuilder, page: &Page) -> Result<String, RenderError> {
    let mut stream = String::new();
    let height = page.height;

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                text,
                face,
                size,
                color,
            } => {
                let index = builder.font_index(face).ok_or_else(|| {
                    RenderError::Serialization(format!(
                        "font {} was not registered",
                        face.resource_key()
                    ))
                })?;
                let _ = writeln!(
                    stream,
                    "BT /F{} {:.2} Tf {} rg {:.2} {:.2} Td {} Tj ET",
                    index,
                    size,
                    color_operands(*color),
                    x,
                    height - baseline,
                    encode_text(face, text)
                );
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness,
                color,
            } => {
                let y = height - y;
                let _ = writeln!(
                    stream,
                    "q {} RG {:.2} w {:.2} {:.2} m {:.2} {:.2} l S Q",
                    color_operands(*color),
                    thickness,
                    x1,
                    y,
                    x2,
                    y
                );
            }
            // Links are annotations, not content.
            DrawOp::Link { .. } => {}
        }
    }

    Ok(stream)
}

fn link_annotations(page: &Page) -> Vec<String> {
    page.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Link {
                x,
                top,
                width,
                height,
                uri,
            } => {
                let y_top = page.height - top;
                Some(format!(
                    "<< /Type /Annot /Subtype /Link /Rect [{:.2} {:.2} {:.2} {:.2}] \
                     /Border [0 0 0] /A << /Type /Action /S /URI /URI {} >> >>",
                    x,
                    y_top - height,
                    x + width,
                    y_top,
                    literal_string(uri.as_bytes())
                ))
            }
            _ => None,
        })
        .collect()
}

fn color_operands(color: Rgb) -> String {
    let [r, g, b] = color.unit_components();
    format!("{r:.3} {g:.3} {b:.3}")
}

/// Encode a run for the given font: WinAnsi literal string for standard
/// fonts, 2-byte glyph ids for Identity-H fonts.
fn encode_text(face: &FontFace, text: &str) -> String {
    match face {
        FontFace::Standard(_) => {
            let bytes: Vec<u8> = text
                .chars()
                .map(|ch| unicode_to_winansi(ch).unwrap_or(b'?'))
                .collect();
            literal_string(&bytes)
        }
        FontFace::Embedded(font) => {
            let mut hex = String::with_capacity(text.len() * 4 + 2);
            hex.push('<');
            for ch in text.chars() {
                let _ = write!(hex, "{:04X}", font.glyph_id(ch));
            }
            hex.push('>');
            hex
        }
    }
}

/// PDF literal string with delimiters escaped and non-ASCII bytes as octal.
fn literal_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('(');
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x20..=0x7E => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    out.push(')');
    out
}

/// Text string for the Info dictionary: literal when ASCII, UTF-16BE otherwise.
fn pdf_text_string(s: &str) -> String {
    if s.is_ascii() {
        return literal_string(s.as_bytes());
    }
    let mut hex = String::from("<FEFF");
    for unit in s.encode_utf16() {
        let _ = write!(hex, "{unit:04X}");
    }
    hex.push('>');
    hex
}

// ────────────────────────────────────────────────────────────────────────────
// File assembly
// ────────────────────────────────────────────────────────────────────────────

fn serialize(builder: &PdfBuilder, info_id: usize) -> Result<Vec<u8>, RenderError> {
    let io_err = |e: std::io::Error| RenderError::Serialization(e.to_string());
    let mut output: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

    output.extend_from_slice(b"%PDF-1.7\n");
    output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

    for (i, obj) in builder.objects.iter().enumerate().skip(1) {
        offsets[i] = output.len();
        write!(output, "{i} 0 obj\n").map_err(io_err)?;
        output.extend_from_slice(&obj.data);
        output.extend_from_slice(b"\nendobj\n\n");
    }

    let xref_offset = output.len();
    write!(output, "xref\n0 {}\n", builder.objects.len()).map_err(io_err)?;
    output.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        write!(output, "{offset:010} 00000 n \n").map_err(io_err)?;
    }

    write!(
        output,
        "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        builder.objects.len(),
        info_id,
        xref_offset
    )
    .map_err(io_err)?;

    Ok(output)
}
