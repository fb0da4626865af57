//! Résumé input schema. Field names follow the camelCase JSON the clients send.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_THEME_COLOR: &str = "#1f2937";
pub const DEFAULT_FONT_FAMILY: &str = "OpenSans";
pub const DEFAULT_FONT_SIZE: &str = "11";
pub const DEFAULT_DOCUMENT_SIZE: &str = "Letter";

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// One complete résumé as received by the generate/validate endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub work_experiences: Vec<WorkExperience>,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub custom: CustomSection,
    #[serde(default)]
    pub settings: StyleConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Required. Defaulted on parse so a missing name reaches validation instead of a 422.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "non_blank_strings")]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default, deserialize_with = "non_blank_strings")]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, alias = "project")]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "non_blank_strings")]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "non_blank_strings")]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomSection {
    #[serde(default, deserialize_with = "non_blank_strings")]
    pub descriptions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Style configuration
// ────────────────────────────────────────────────────────────────────────────

/// Raw styling settings as sent by the client. Resolved into concrete styles
/// by `layout::style::resolve`; nothing here is interpreted at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size", deserialize_with = "string_or_number")]
    pub font_size: String,
    #[serde(default = "default_document_size")]
    pub document_size: String,
    /// Section key → heading text. Missing keys use the built-in heading.
    #[serde(default)]
    pub form_to_heading: BTreeMap<String, String>,
    /// Section key → visibility. Missing keys are visible.
    #[serde(default)]
    pub form_to_show: BTreeMap<String, bool>,
    #[serde(default, alias = "formsOrder")]
    pub section_order: Option<Vec<String>>,
    #[serde(default)]
    pub template: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            theme_color: default_theme_color(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            document_size: default_document_size(),
            form_to_heading: BTreeMap::new(),
            form_to_show: BTreeMap::new(),
            section_order: None,
            template: None,
        }
    }
}

impl StyleConfig {
    pub fn is_visible(&self, key: SectionKey) -> bool {
        self.form_to_show.get(key.as_str()).copied().unwrap_or(true)
    }

    pub fn heading_for(&self, key: SectionKey) -> &str {
        self.form_to_heading
            .get(key.as_str())
            .map(String::as_str)
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| key.default_heading())
    }

    /// Effective section order: configured keys first (unknown and duplicate
    /// keys dropped), then any omitted keys in default order.
    pub fn resolved_order(&self) -> Vec<SectionKey> {
        let mut order: Vec<SectionKey> = Vec::with_capacity(SectionKey::DEFAULT_ORDER.len());
        if let Some(configured) = &self.section_order {
            for key in configured.iter().filter_map(|k| SectionKey::from_key(k)) {
                if !order.contains(&key) {
                    order.push(key);
                }
            }
        }
        for key in SectionKey::DEFAULT_ORDER {
            if !order.contains(&key) {
                order.push(key);
            }
        }
        order
    }
}

/// The five section kinds a résumé can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    WorkExperiences,
    Educations,
    Projects,
    Skills,
    Custom,
}

impl SectionKey {
    pub const DEFAULT_ORDER: [SectionKey; 5] = [
        SectionKey::WorkExperiences,
        SectionKey::Educations,
        SectionKey::Projects,
        SectionKey::Skills,
        SectionKey::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkExperiences => "workExperiences",
            Self::Educations => "educations",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Custom => "custom",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|k| k.as_str() == key.trim())
    }

    pub fn default_heading(&self) -> &'static str {
        match self {
            Self::WorkExperiences => "WORK EXPERIENCE",
            Self::Educations => "EDUCATION",
            Self::Projects => "PROJECTS",
            Self::Skills => "SKILLS",
            Self::Custom => "ADDITIONAL",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Serde helpers
// ────────────────────────────────────────────────────────────────────────────

fn default_theme_color() -> String {
    DEFAULT_THEME_COLOR.to_string()
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_font_size() -> String {
    DEFAULT_FONT_SIZE.to_string()
}

fn default_document_size() -> String {
    DEFAULT_DOCUMENT_SIZE.to_string()
}

/// Trims entries and drops blank ones.
fn non_blank_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

/// Accepts `"11"` or `11` for the font size.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}
