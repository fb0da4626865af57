//! Built-in résumé templates and color schemes.
//!
//! A template supplies page margins and vertical spacing; the theme color and
//! font family it lists are suggestions surfaced by `GET /api/v1/templates`,
//! the request's own settings always win.

use serde::Serialize;

pub const DEFAULT_TEMPLATE: &str = "professional";

/// Vertical spacing in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    /// Space above each section heading.
    pub section: f32,
    /// Space between items within a section.
    pub item: f32,
    /// Extra space between wrapped lines and bullets.
    pub line: f32,
    /// Space between a section heading rule and its first item.
    pub header: f32,
}

/// Page margins in inches, as templates are authored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginsInches {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl MarginsInches {
    const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateStyle {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub theme_color: &'static str,
    pub font_family: &'static str,
    pub font_size: u8,
    pub spacing: Spacing,
    pub margins: MarginsInches,
}

pub static TEMPLATES: [TemplateStyle; 3] = [
    TemplateStyle {
        key: "professional",
        name: "Professional",
        description: "Clean, ATS-friendly single-column layout",
        theme_color: "#1f2937",
        font_family: "OpenSans",
        font_size: 11,
        spacing: Spacing {
            section: 12.0,
            item: 6.0,
            line: 3.0,
            header: 6.0,
        },
        margins: MarginsInches::uniform(0.5),
    },
    TemplateStyle {
        key: "modern",
        name: "Modern",
        description: "Contemporary design with bold accents",
        theme_color: "#2563eb",
        font_family: "OpenSans",
        font_size: 11,
        spacing: Spacing {
            section: 14.0,
            item: 7.0,
            line: 3.0,
            header: 8.0,
        },
        margins: MarginsInches::uniform(0.6),
    },
    TemplateStyle {
        key: "classic",
        name: "Classic",
        description: "Traditional professional format",
        theme_color: "#374151",
        font_family: "OpenSans",
        font_size: 11,
        spacing: Spacing {
            section: 10.0,
            item: 5.0,
            line: 2.0,
            header: 5.0,
        },
        margins: MarginsInches::uniform(0.75),
    },
];

/// Look up a template by key; unknown or absent names yield `professional`.
pub fn template_or_default(name: Option<&str>) -> &'static TemplateStyle {
    name.map(|n| n.trim().to_ascii_lowercase())
        .and_then(|n| TEMPLATES.iter().find(|t| t.key == n))
        .or_else(|| TEMPLATES.iter().find(|t| t.key == DEFAULT_TEMPLATE))
        .unwrap_or(&TEMPLATES[0])
}

pub fn is_known_template(name: &str) -> bool {
    let name = name.trim().to_ascii_lowercase();
    TEMPLATES.iter().any(|t| t.key == name)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColorScheme {
    pub name: &'static str,
    pub colors: [&'static str; 4],
}

pub static COLOR_SCHEMES: [ColorScheme; 4] = [
    ColorScheme {
        name: "professional",
        colors: ["#1f2937", "#374151", "#4b5563", "#6b7280"],
    },
    ColorScheme {
        name: "vibrant",
        colors: ["#dc2626", "#ea580c", "#d97706", "#65a30d"],
    },
    ColorScheme {
        name: "cool",
        colors: ["#2563eb", "#7c3aed", "#c026d3", "#db2777"],
    },
    ColorScheme {
        name: "earth",
        colors: ["#92400e", "#a16207", "#166534", "#075985"],
    },
];
