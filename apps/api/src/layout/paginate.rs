//! Layout/pagination engine: layout blocks → positioned draw operations per page.
//!
//! Coordinates are in points measured from the top-left corner of the page;
//! the PDF writer flips them. Blocks are first turned into atomic units (a
//! heading, an item header, one bullet). Units then flow down the page, and a
//! unit marked `keep_with_next` only starts if the unit after it fits too.

use tracing::debug;

use crate::{
    errors::RenderError,
    layout::{
        blocks::{
            ContactPart, HeaderBlock, HeadingBlock, ItemBlock, ItemLine, LayoutBlock,
            BULLET_PREFIX, CONTACT_SEPARATOR,
        },
        font_metrics::{wrap_lines, FontFace},
        style::{Alignment, ResolvedStyleSet, Rgb, StyleRole, TextStyle},
    },
};

pub const DEFAULT_MAX_PAGES: usize = 10;

const EPSILON: f32 = 0.01;
const BULLET_GLYPH: &str = "\u{2022}";
const RULE_GAP: f32 = 1.5;
const RULE_THICKNESS: f32 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single-line run of text; `baseline` is measured from the page top.
    Text {
        x: f32,
        baseline: f32,
        text: String,
        face: FontFace,
        size: f32,
        color: Rgb,
    },
    /// Horizontal rule centred on `y`.
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Rgb,
    },
    /// Clickable URI area.
    Link {
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        uri: String,
    },
}

impl DrawOp {
    fn shifted(mut self, dy: f32) -> Self {
        match &mut self {
            DrawOp::Text { baseline, .. } => *baseline += dy,
            DrawOp::Rule { y, .. } => *y += dy,
            DrawOp::Link { top, .. } => *top += dy,
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    fn blank(styles: &ResolvedStyleSet) -> Self {
        Self {
            width: styles.page_width,
            height: styles.page_height,
            ops: Vec::new(),
        }
    }

    /// Text runs in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Content placed as a whole; y positions in `ops` are relative to the unit top.
#[derive(Debug)]
struct Unit {
    space_before: f32,
    height: f32,
    ops: Vec<DrawOp>,
    keep_with_next: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

pub fn paginate(
    blocks: &[LayoutBlock],
    styles: &ResolvedStyleSet,
    max_pages: usize,
) -> Result<Vec<Page>, RenderError> {
    let max_pages = max_pages.max(1);
    let units = layout_units(blocks, styles);

    let content_top = styles.margins.top;
    let content_bottom = styles.page_height - styles.margins.bottom;
    let content_height = styles.content_height();

    // Minimum height needed to start unit i: itself plus any kept-with chain,
    // capped at one page so an oversized chain moves to a fresh page once.
    let mut required = vec![0.0_f32; units.len()];
    for i in (0..units.len()).rev() {
        required[i] = units[i].height;
        if units[i].keep_with_next && i + 1 < units.len() {
            required[i] += units[i + 1].space_before + required[i + 1];
        }
    }
    for need in &mut required {
        *need = need.min(content_height);
    }

    let mut pages: Vec<Page> = Vec::new();
    let mut current = Page::blank(styles);
    let mut cursor = content_top;
    let mut page_empty = true;

    let mut chained = false;
    for (i, unit) in units.into_iter().enumerate() {
        if unit.height > content_height + EPSILON {
            return Err(RenderError::PaginationOverflow(format!(
                "content block is {:.0}pt tall but a page holds {:.0}pt",
                unit.height, content_height
            )));
        }

        // A unit kept with its predecessor was already accounted for when the
        // chain started; it only breaks if it cannot fit by itself.
        let need = if chained { unit.height } else { required[i] };
        chained = unit.keep_with_next;

        let mut space = if page_empty { 0.0 } else { unit.space_before };
        if !page_empty && cursor + space + need > content_bottom + EPSILON {
            if pages.len() + 2 > max_pages {
                return Err(RenderError::PaginationOverflow(format!(
                    "document needs more than {max_pages} pages"
                )));
            }
            pages.push(std::mem::replace(&mut current, Page::blank(styles)));
            cursor = content_top;
            space = 0.0;
        }

        cursor += space;
        current
            .ops
            .extend(unit.ops.into_iter().map(|op| op.shifted(cursor)));
        cursor += unit.height;
        page_empty = false;
    }

    pages.push(current);
    debug!(pages = pages.len(), "Pagination complete");
    Ok(pages)
}

// ────────────────────────────────────────────────────────────────────────────
// Block → unit layout
// ────────────────────────────────────────────────────────────────────────────

fn layout_units(blocks: &[LayoutBlock], styles: &ResolvedStyleSet) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut after_heading = false;
    for block in blocks {
        match block {
            LayoutBlock::Header(header) => {
                units.push(header_unit(header, styles));
                after_heading = false;
            }
            LayoutBlock::SectionHeading(heading) => {
                units.push(heading_unit(heading, styles));
                after_heading = true;
            }
            LayoutBlock::Item(item) => {
                units.extend(item_units(item, styles, after_heading));
                after_heading = false;
            }
        }
    }
    units
}

/// Accumulates ops for one unit, tracking the current line top.
struct UnitBuilder<'a> {
    styles: &'a ResolvedStyleSet,
    y: f32,
    ops: Vec<DrawOp>,
}

impl<'a> UnitBuilder<'a> {
    fn new(styles: &'a ResolvedStyleSet) -> Self {
        Self {
            styles,
            y: 0.0,
            ops: Vec::new(),
        }
    }

    fn left(&self) -> f32 {
        self.styles.margins.left
    }

    fn width(&self) -> f32 {
        self.styles.content_width()
    }

    fn text_at(&mut self, style: &TextStyle, text: &str, x: f32, line_top: f32) {
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            x,
            baseline: line_top + style.baseline_offset(),
            text: text.to_string(),
            face: style.face.clone(),
            size: style.size,
            color: style.color,
        });
    }

    /// Wrap `text` across the full content width using the style's alignment.
    fn paragraph(&mut self, style: &TextStyle, text: &str) {
        let width = self.width();
        for line in wrap_lines(text, &style.face, style.size, width, width) {
            let x = self.aligned_x(style, &line);
            let top = self.y;
            self.text_at(style, &line, x, top);
            self.y += style.leading();
        }
    }

    fn aligned_x(&self, style: &TextStyle, line: &str) -> f32 {
        let slack = (self.width() - style.measure(line)).max(0.0);
        match style.alignment {
            Alignment::Left => self.left(),
            Alignment::Center => self.left() + slack / 2.0,
        }
    }

    fn finish(self, space_before: f32, keep_with_next: bool) -> Unit {
        Unit {
            space_before,
            height: self.y,
            ops: self.ops,
            keep_with_next,
        }
    }
}

fn header_unit(header: &HeaderBlock, styles: &ResolvedStyleSet) -> Unit {
    let mut unit = UnitBuilder::new(styles);
    unit.paragraph(styles.role(StyleRole::Name), &header.name);

    if !header.contact.is_empty() {
        unit.y += styles.spacing.line;
        contact_lines(&mut unit, &header.contact);
    }

    if let Some(summary) = &header.summary {
        unit.y += styles.spacing.header;
        unit.paragraph(styles.role(StyleRole::Body), summary);
    }

    unit.finish(0.0, false)
}

/// Lay out contact parts joined by separators, centred, wrapping between parts.
fn contact_lines(unit: &mut UnitBuilder<'_>, parts: &[ContactPart]) {
    let style = unit.styles.role(StyleRole::Contact).clone();
    let max_width = unit.width();
    let separator_w = style.measure(CONTACT_SEPARATOR);

    let mut lines: Vec<Vec<&ContactPart>> = Vec::new();
    let mut line: Vec<&ContactPart> = Vec::new();
    let mut line_w = 0.0_f32;
    for part in parts {
        let part_w = style.measure(part.text());
        let extra = if line.is_empty() { part_w } else { separator_w + part_w };
        if !line.is_empty() && line_w + extra > max_width {
            lines.push(std::mem::take(&mut line));
            line_w = part_w;
        } else {
            line_w += extra;
        }
        line.push(part);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    for line in lines {
        let total: f32 = line.iter().map(|p| style.measure(p.text())).sum::<f32>()
            + separator_w * line.len().saturating_sub(1) as f32;
        let mut x = unit.left() + ((max_width - total) / 2.0).max(0.0);
        let top = unit.y;

        for (idx, part) in line.iter().enumerate() {
            if idx > 0 {
                unit.text_at(&style, CONTACT_SEPARATOR, x, top);
                x += separator_w;
            }
            let part_w = style.measure(part.text());
            unit.text_at(&style, part.text(), x, top);
            if let ContactPart::Link { uri, .. } = part {
                unit.ops.push(DrawOp::Link {
                    x,
                    top,
                    width: part_w,
                    height: style.leading(),
                    uri: uri.clone(),
                });
            }
            x += part_w;
        }
        unit.y += style.leading();
    }
}

fn heading_unit(heading: &HeadingBlock, styles: &ResolvedStyleSet) -> Unit {
    let mut unit = UnitBuilder::new(styles);
    unit.paragraph(styles.role(StyleRole::SectionHeading), &heading.text);

    let rule_y = unit.y + RULE_GAP;
    unit.ops.push(DrawOp::Rule {
        x1: styles.margins.left,
        x2: styles.page_width - styles.margins.right,
        y: rule_y,
        thickness: RULE_THICKNESS,
        color: styles.theme_color,
    });
    unit.y = rule_y + RULE_THICKNESS + styles.spacing.header;

    unit.finish(styles.spacing.section, true)
}

fn item_units(item: &ItemBlock, styles: &ResolvedStyleSet, after_heading: bool) -> Vec<Unit> {
    let spacing = styles.spacing;
    let mut item_space = if after_heading {
        0.0
    } else if item.header.is_some() {
        spacing.item
    } else {
        spacing.line
    };

    let mut units = Vec::with_capacity(item.lines.len() + 1);

    if item.header.is_some() || item.subtitle.is_some() {
        let mut unit = UnitBuilder::new(styles);
        if let Some(row) = &item.header {
            two_column_row(&mut unit, &row.left, &row.right);
        }
        if let Some(subtitle) = &item.subtitle {
            unit.paragraph(styles.role(StyleRole::ItemSubtitle), subtitle);
        }
        units.push(unit.finish(item_space, !item.lines.is_empty()));
        item_space = spacing.line;
    }

    for line in &item.lines {
        let mut unit = UnitBuilder::new(styles);
        match line {
            ItemLine::Bullet(text) => bullet(&mut unit, text),
            ItemLine::Labeled { label, text } => labeled(&mut unit, label, text),
        }
        units.push(unit.finish(item_space, false));
        item_space = spacing.line;
    }

    units
}

/// Left column 2/3 of the content width in the title style; right column
/// 1/3 in the body style, flush with the right margin.
fn two_column_row(unit: &mut UnitBuilder<'_>, left: &str, right: &str) {
    let styles = unit.styles;
    let title = styles.role(StyleRole::ItemTitle);
    let body = styles.role(StyleRole::Body);
    let left_w = unit.width() * 2.0 / 3.0;
    let right_w = unit.width() - left_w;
    let right_edge = unit.left() + unit.width();
    let top = unit.y;

    let left_lines = wrap_lines(left, &title.face, title.size, left_w, left_w);
    for (i, line) in left_lines.iter().enumerate() {
        let x = unit.left();
        unit.text_at(title, line, x, top + i as f32 * title.leading());
    }

    let right_lines = wrap_lines(right, &body.face, body.size, right_w, right_w);
    for (i, line) in right_lines.iter().enumerate() {
        let x = right_edge - body.measure(line);
        unit.text_at(body, line, x, top + i as f32 * body.leading());
    }

    let left_h = left_lines.len() as f32 * title.leading();
    let right_h = right_lines.len() as f32 * body.leading();
    unit.y += left_h.max(right_h);
}

/// `• text`, with continuation lines hanging under the text.
fn bullet(unit: &mut UnitBuilder<'_>, text: &str) {
    let styles = unit.styles;
    let body = styles.role(StyleRole::Body);
    let indent = body.measure(BULLET_PREFIX);
    let text_w = unit.width() - indent;
    let left = unit.left();
    let first_top = unit.y;

    unit.text_at(body, BULLET_GLYPH, left, first_top);
    for line in wrap_lines(text, &body.face, body.size, text_w, text_w) {
        let top = unit.y;
        unit.text_at(body, &line, left + indent, top);
        unit.y += body.leading();
    }
}

/// Bold label then regular text on the same line; wrapped lines start at the margin.
/// A label wider than the content area wraps on its own; the text starts on a
/// fresh line when less than a quarter of the width is left after the label.
fn labeled(unit: &mut UnitBuilder<'_>, label: &str, text: &str) {
    let styles = unit.styles;
    let label_style = styles.role(StyleRole::ItemTitle);
    let body = styles.role(StyleRole::Body);
    let left = unit.left();
    let width = unit.width();

    let mut label_lines = wrap_lines(label, &label_style.face, label_style.size, width, width);
    let last_label = label_lines.pop().unwrap_or_default();
    for line in &label_lines {
        let top = unit.y;
        unit.text_at(label_style, line, left, top);
        unit.y += label_style.leading();
    }

    let top = unit.y;
    unit.text_at(label_style, &last_label, left, top);
    let mut label_w = label_style.measure(&last_label) + body.measure(" ");
    if width - label_w < width / 4.0 {
        unit.y += label_style.leading();
        label_w = 0.0;
    }

    let lines = wrap_lines(text, &body.face, body.size, width - label_w, width);
    if lines.is_empty() {
        if label_w > 0.0 {
            unit.y += label_style.leading();
        }
        return;
    }
    for (i, line) in lines.iter().enumerate() {
        let x = if i == 0 { left + label_w } else { left };
        let line_top = unit.y;
        unit.text_at(body, line, x, line_top);
        let label_leading = if i == 0 && label_w > 0.0 { label_style.leading() } else { 0.0 };
        unit.y += body.leading().max(label_leading);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use serde_json::json;

    use super::*;
    use crate::{
        layout::{blocks::build, fonts::FontLibrary, style::resolve},
        models::ResumeDocument,
    };

    fn render_pages(value: serde_json::Value, max_pages: usize) -> Result<Vec<Page>, RenderError> {
        let doc: ResumeDocument = serde_json::from_value(value).unwrap();
        let styles = resolve(&doc.settings, &FontLibrary::builtin_only()).unwrap();
        let blocks = build(&doc).unwrap();
        paginate(&blocks, &styles, max_pages)
    }

    fn styles_for(value: &serde_json::Value) -> ResolvedStyleSet {
        let doc: ResumeDocument = serde_json::from_value(value.clone()).unwrap();
        resolve(&doc.settings, &FontLibrary::builtin_only()).unwrap()
    }

    fn work(bullets: Vec<String>) -> serde_json::Value {
        json!({ "company": "Acme", "jobTitle": "Engineer", "date": "2020 - 2023", "descriptions": bullets })
    }

    fn base(work_items: Vec<serde_json::Value>) -> serde_json::Value {
        json!({
            "personalInfo": { "name": "Jane Doe", "email": "jane@x.com" },
            "workExperiences": work_items,
            "settings": { "fontFamily": "Helvetica" }
        })
    }

    #[test]
    fn test_minimal_document_fits_one_page() {
        let pages = render_pages(base(vec![work(vec!["Did X".into()])]), DEFAULT_MAX_PAGES).unwrap();
        assert_eq!(pages.len(), 1);
        let texts = pages[0].texts();
        assert_eq!(texts[0], "Jane Doe");
        assert!(texts.contains(&"WORK EXPERIENCE"));
        assert!(texts.contains(&"Engineer"));
        assert!(texts.contains(&"Acme"));
        assert!(texts.contains(&"Did X"));
        assert!(pages[0].ops.iter().any(|op| matches!(op, DrawOp::Rule { .. })));
    }

    #[test]
    fn test_forty_bullets_span_pages_inside_content_area() {
        let items: Vec<serde_json::Value> = (0..5)
            .map(|item| {
                let bullets = (0..8)
                    .map(|b| {
                        let id = item * 8 + b;
                        (0..30).map(|w| format!("b{id}w{w}")).collect::<Vec<_>>().join(" ")
                    })
                    .collect();
                work(bullets)
            })
            .collect();
        let value = base(items);
        let styles = styles_for(&value);
        let pages = render_pages(value, DEFAULT_MAX_PAGES).unwrap();
        assert!(pages.len() > 1, "expected several pages, got {}", pages.len());

        let top = styles.margins.top;
        let bottom = styles.page_height - styles.margins.bottom;
        let right = styles.page_width - styles.margins.right;
        let mut pages_per_bullet: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();

        for (page_idx, page) in pages.iter().enumerate() {
            for op in &page.ops {
                let DrawOp::Text { x, baseline, text, face, size, .. } = op else {
                    continue;
                };
                let (ascender, descender) = face.vertical_metrics();
                assert!(baseline - ascender * size >= top - EPSILON, "{text} above content area");
                assert!(baseline - descender * size <= bottom + EPSILON, "{text} below content area");
                assert!(x + face.measure_str(text, *size) <= right + EPSILON, "{text} past right margin");

                if let Some(id) = text.strip_prefix('b').and_then(|t| t.split('w').next()) {
                    if id.chars().all(|c| c.is_ascii_digit()) && !id.is_empty() {
                        pages_per_bullet.entry(id.to_string()).or_default().insert(page_idx);
                    }
                }
            }
        }

        assert_eq!(pages_per_bullet.len(), 40);
        for (id, pages) in pages_per_bullet {
            assert_eq!(pages.len(), 1, "bullet {id} split across pages {pages:?}");
        }
    }

    #[test]
    fn test_long_bullet_wraps_within_margins() {
        let long = "Delivered ".repeat(50);
        assert!(long.len() >= 500);
        let value = base(vec![work(vec![long.trim().to_string()])]);
        let styles = styles_for(&value);
        let pages = render_pages(value, DEFAULT_MAX_PAGES).unwrap();

        let runs: Vec<(f32, String, FontFace, f32)> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, text, face, size, .. } if text.starts_with("Delivered") => {
                    Some((*x, text.clone(), face.clone(), *size))
                }
                _ => None,
            })
            .collect();
        assert!(runs.len() > 1, "bullet should wrap");
        for (x, text, face, size) in &runs {
            assert!(*x >= styles.margins.left);
            assert!(x + face.measure_str(text, *size) <= styles.page_width - styles.margins.right + EPSILON);
        }
        // Continuation lines hang under the first line's text.
        assert!(runs.iter().all(|(x, ..)| (x - runs[0].0).abs() < EPSILON));
    }

    #[test]
    fn test_heading_never_ends_a_page() {
        for filler in 1..=45 {
            let bullets = (0..filler).map(|i| format!("Filler bullet number {i}")).collect();
            let mut value = base(vec![work(bullets)]);
            value["educations"] = json!([{ "school": "MIT", "degree": "BS CS", "date": "2019" }]);
            let pages = render_pages(value, DEFAULT_MAX_PAGES).unwrap();
            let page = pages
                .iter()
                .find(|p| p.texts().contains(&"EDUCATION"))
                .unwrap();
            assert!(
                page.texts().contains(&"BS CS"),
                "heading separated from its first item with {filler} filler bullets"
            );
        }
    }

    #[test]
    fn test_page_limit_exceeded_is_overflow() {
        let bullets = (0..200).map(|i| format!("Bullet {i} with some text")).collect();
        let err = render_pages(base(vec![work(bullets)]), 2).unwrap_err();
        assert!(matches!(err, RenderError::PaginationOverflow(_)));
    }

    #[test]
    fn test_bullet_taller_than_page_is_overflow() {
        let huge = "word ".repeat(6000);
        let err = render_pages(base(vec![work(vec![huge])]), DEFAULT_MAX_PAGES).unwrap_err();
        assert!(matches!(err, RenderError::PaginationOverflow(_)));
    }

    #[test]
    fn test_url_gets_link_annotation() {
        let mut value = base(vec![]);
        value["personalInfo"]["url"] = json!("https://janedoe.dev");
        value["personalInfo"]["phone"] = json!("555-0100");
        let pages = render_pages(value, DEFAULT_MAX_PAGES).unwrap();
        let links: Vec<&DrawOp> = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Link { .. }))
            .collect();
        assert_eq!(links.len(), 1);
        let DrawOp::Link { uri, width, .. } = links[0] else {
            unreachable!()
        };
        assert_eq!(uri, "https://janedoe.dev");
        assert!(*width > 0.0);
    }

    #[test]
    fn test_date_right_aligned() {
        let value = base(vec![work(vec!["Did X".into()])]);
        let styles = styles_for(&value);
        let pages = render_pages(value, DEFAULT_MAX_PAGES).unwrap();
        let (x, face, size) = pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, text, face, size, .. } if text == "2020 - 2023" => {
                    Some((*x, face.clone(), *size))
                }
                _ => None,
            })
            .unwrap();
        let right_edge = x + face.measure_str("2020 - 2023", size);
        assert!((right_edge - (styles.page_width - styles.margins.right)).abs() < EPSILON);
    }

    #[test]
    fn test_oversized_keep_chain_does_not_strand_heading() {
        let mut checked = 0;
        for words in (900..=1100).step_by(10) {
            let mut value = base(vec![work(vec!["Did X".into(), "Did Y".into()])]);
            value["educations"] = json!([{
                "school": "MIT",
                "degree": "BS CS",
                "date": "2019",
                "descriptions": ["word ".repeat(words)]
            }]);
            let Ok(pages) = render_pages(value, DEFAULT_MAX_PAGES) else {
                continue;
            };
            checked += 1;
            let page = pages
                .iter()
                .find(|p| p.texts().contains(&"EDUCATION"))
                .unwrap();
            assert!(
                page.texts().contains(&"BS CS"),
                "heading left alone with a {words}-word first bullet"
            );
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_label_wider_than_content_wraps_inside_margins() {
        let mut value = base(vec![]);
        value["skills"] = json!([{ "category": "W".repeat(80), "skills": ["Go", "Rust"] }]);
        let styles = styles_for(&value);
        let pages = render_pages(value, DEFAULT_MAX_PAGES).unwrap();
        let right = styles.page_width - styles.margins.right;

        let mut saw_skills = false;
        for op in &pages[0].ops {
            let DrawOp::Text { x, text, face, size, .. } = op else {
                continue;
            };
            assert!(*x >= styles.margins.left - EPSILON, "{text} left of margin");
            assert!(x + face.measure_str(text, *size) <= right + EPSILON, "{text} past right margin");
            saw_skills |= text.contains("Go, Rust");
        }
        assert!(saw_skills);
        let label_runs = pages[0].texts().iter().filter(|t| t.starts_with('W')).count();
        assert!(label_runs >= 2, "label should wrap");
    }

    #[test]
    fn test_skill_label_and_text_share_a_line() {
        let mut value = base(vec![]);
        value["skills"] = json!([{ "category": "Languages", "skills": ["Go", "Rust"] }]);
        let pages = render_pages(value, DEFAULT_MAX_PAGES).unwrap();
        let baselines: Vec<f32> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, baseline, .. } if text == "Languages:" || text == "Go, Rust" => {
                    Some(*baseline)
                }
                _ => None,
            })
            .collect();
        assert_eq!(baselines.len(), 2);
        assert!((baselines[0] - baselines[1]).abs() < EPSILON);
    }
}
