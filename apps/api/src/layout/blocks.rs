//! Document model builder: `ResumeDocument` → ordered layout blocks.
//!
//! Pure transformation. Visibility, ordering and heading text come from the
//! document's settings; nothing here measures text.

use crate::{
    errors::RenderError,
    models::{ResumeDocument, SectionKey},
};

pub const CONTACT_SEPARATOR: &str = " \u{2022} ";
pub const BULLET_PREFIX: &str = "\u{2022} ";

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutBlock {
    Header(HeaderBlock),
    SectionHeading(HeadingBlock),
    Item(ItemBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBlock {
    pub name: String,
    /// Ordered contact parts; rendered joined by `CONTACT_SEPARATOR`.
    pub contact: Vec<ContactPart>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContactPart {
    Text(String),
    Link { text: String, uri: String },
}

impl ContactPart {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Link { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingBlock {
    pub section: SectionKey,
    pub text: String,
}

/// Primary text on the left, secondary (usually a date) right-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoColumnRow {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemBlock {
    pub section: SectionKey,
    pub header: Option<TwoColumnRow>,
    pub subtitle: Option<String>,
    pub lines: Vec<ItemLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemLine {
    Bullet(String),
    /// Bold label followed by regular text, e.g. `Languages: Go, Rust`.
    Labeled { label: String, text: String },
}

impl ItemLine {
    /// The line as a reader sees it.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Bullet(text) => format!("{BULLET_PREFIX}{text}"),
            Self::Labeled { label, text } => format!("{label} {text}"),
        }
    }
}

/// Build the block sequence for a document: header first, then each visible,
/// non-empty section in configured order.
pub fn build(document: &ResumeDocument) -> Result<Vec<LayoutBlock>, RenderError> {
    let info = &document.personal_info;
    let name = info.name.trim();
    if name.is_empty() {
        return Err(RenderError::MissingRequiredField("personalInfo.name"));
    }
    let email = info.email.trim();
    if email.is_empty() {
        return Err(RenderError::MissingRequiredField("personalInfo.email"));
    }

    let mut blocks = vec![LayoutBlock::Header(header_block(document, name, email))];

    let settings = &document.settings;
    for key in settings.resolved_order() {
        if !settings.is_visible(key) {
            continue;
        }
        let items = section_items(document, key);
        if items.is_empty() {
            continue;
        }
        blocks.push(LayoutBlock::SectionHeading(HeadingBlock {
            section: key,
            text: settings.heading_for(key).trim().to_string(),
        }));
        blocks.extend(items.into_iter().map(LayoutBlock::Item));
    }

    Ok(blocks)
}

fn header_block(document: &ResumeDocument, name: &str, email: &str) -> HeaderBlock {
    let info = &document.personal_info;
    let mut contact = vec![ContactPart::Text(email.to_string())];

    if let Some(phone) = non_blank(info.phone.as_deref()) {
        contact.push(ContactPart::Text(phone.to_string()));
    }
    if let Some(url) = non_blank(info.url.as_deref()) {
        contact.push(ContactPart::Link {
            text: url.to_string(),
            uri: link_target(url),
        });
    }
    if let Some(location) = non_blank(info.location.as_deref()) {
        contact.push(ContactPart::Text(location.to_string()));
    }

    HeaderBlock {
        name: name.to_string(),
        contact,
        summary: non_blank(info.summary.as_deref()).map(str::to_string),
    }
}

fn section_items(document: &ResumeDocument, key: SectionKey) -> Vec<ItemBlock> {
    match key {
        SectionKey::WorkExperiences => document
            .work_experiences
            .iter()
            .map(|exp| ItemBlock {
                section: key,
                header: Some(TwoColumnRow {
                    left: exp.job_title.trim().to_string(),
                    right: exp.date.trim().to_string(),
                }),
                subtitle: non_blank(Some(exp.company.as_str())).map(str::to_string),
                lines: bullets(&exp.descriptions),
            })
            .collect(),

        SectionKey::Educations => document
            .educations
            .iter()
            .map(|edu| {
                let degree = edu.degree.trim();
                let left = match non_blank(edu.gpa.as_deref()) {
                    Some(gpa) => format!("{degree} | GPA: {gpa}"),
                    None => degree.to_string(),
                };
                ItemBlock {
                    section: key,
                    header: Some(TwoColumnRow {
                        left,
                        right: edu.date.trim().to_string(),
                    }),
                    subtitle: non_blank(Some(edu.school.as_str())).map(str::to_string),
                    lines: bullets(&edu.descriptions),
                }
            })
            .collect(),

        SectionKey::Projects => document
            .projects
            .iter()
            .map(|project| ItemBlock {
                section: key,
                header: Some(TwoColumnRow {
                    left: project.name.trim().to_string(),
                    right: project.date.trim().to_string(),
                }),
                subtitle: None,
                lines: bullets(&project.descriptions),
            })
            .collect(),

        SectionKey::Skills => document
            .skills
            .iter()
            .filter(|group| !group.skills.is_empty())
            .map(|group| ItemBlock {
                section: key,
                header: None,
                subtitle: None,
                lines: vec![ItemLine::Labeled {
                    label: format!("{}:", group.category.trim()),
                    text: group.skills.join(", "),
                }],
            })
            .collect(),

        SectionKey::Custom => {
            if document.custom.descriptions.is_empty() {
                Vec::new()
            } else {
                vec![ItemBlock {
                    section: key,
                    header: None,
                    subtitle: None,
                    lines: bullets(&document.custom.descriptions),
                }]
            }
        }
    }
}

fn bullets(descriptions: &[String]) -> Vec<ItemLine> {
    descriptions
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(|d| ItemLine::Bullet(d.to_string()))
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Bare domains get an https scheme so the annotation is a usable URI.
fn link_target(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("mailto:")
    {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> ResumeDocument {
        serde_json::from_value(value).unwrap()
    }

    fn jane_doe() -> serde_json::Value {
        json!({
            "personalInfo": { "name": "Jane Doe", "email": "jane@x.com" },
            "workExperiences": [
                { "company": "Acme", "jobTitle": "Engineer", "date": "2020-2023", "descriptions": ["Did X"] }
            ]
        })
    }

    fn headings(blocks: &[LayoutBlock]) -> Vec<SectionKey> {
        blocks
            .iter()
            .filter_map(|b| match b {
                LayoutBlock::SectionHeading(h) => Some(h.section),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_minimal_scenario() {
        let blocks = build(&document(jane_doe())).unwrap();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], LayoutBlock::Header(h) if h.name == "Jane Doe"));
        assert!(
            matches!(&blocks[1], LayoutBlock::SectionHeading(h) if h.text == "WORK EXPERIENCE")
        );
        match &blocks[2] {
            LayoutBlock::Item(item) => {
                assert_eq!(
                    item.header,
                    Some(TwoColumnRow {
                        left: "Engineer".into(),
                        right: "2020-2023".into()
                    })
                );
                assert_eq!(item.subtitle.as_deref(), Some("Acme"));
                assert_eq!(item.lines, vec![ItemLine::Bullet("Did X".into())]);
            }
            other => panic!("expected item, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let doc = document(json!({ "personalInfo": { "name": "  ", "email": "a@b.co" } }));
        assert!(matches!(
            build(&doc),
            Err(RenderError::MissingRequiredField("personalInfo.name"))
        ));
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let doc = document(json!({ "personalInfo": { "name": "Jane" } }));
        assert!(matches!(
            build(&doc),
            Err(RenderError::MissingRequiredField("personalInfo.email"))
        ));
    }

    #[test]
    fn test_empty_and_hidden_sections_suppressed() {
        let mut value = jane_doe();
        value["educations"] = json!([]);
        value["projects"] = json!([{ "name": "Builder", "date": "2023", "descriptions": ["Made it"] }]);
        value["custom"] = json!({ "descriptions": ["", "  "] });
        value["settings"] = json!({ "formToShow": { "projects": false } });

        let blocks = build(&document(value)).unwrap();
        assert_eq!(headings(&blocks), vec![SectionKey::WorkExperiences]);
    }

    #[test]
    fn test_section_order_follows_permutation() {
        let mut value = jane_doe();
        value["educations"] = json!([{ "school": "MIT", "degree": "BS CS", "date": "2019" }]);
        value["projects"] = json!([{ "name": "Builder", "date": "2023" }]);
        value["skills"] = json!([{ "category": "Languages", "skills": ["Go"] }]);
        value["custom"] = json!({ "descriptions": ["Volunteer"] });
        value["settings"] = json!({
            "sectionOrder": ["custom", "skills", "projects", "educations", "workExperiences"]
        });

        let blocks = build(&document(value)).unwrap();
        assert!(matches!(blocks[0], LayoutBlock::Header(_)));
        assert_eq!(
            headings(&blocks),
            vec![
                SectionKey::Custom,
                SectionKey::Skills,
                SectionKey::Projects,
                SectionKey::Educations,
                SectionKey::WorkExperiences,
            ]
        );
    }

    #[test]
    fn test_skills_line_text() {
        let mut value = jane_doe();
        value["skills"] = json!([
            { "category": "Languages", "skills": ["Go", "Rust"] },
            { "category": "Empty", "skills": [] }
        ]);
        let blocks = build(&document(value)).unwrap();
        let skill_lines: Vec<String> = blocks
            .iter()
            .filter_map(|b| match b {
                LayoutBlock::Item(item) if item.section == SectionKey::Skills => Some(item),
                _ => None,
            })
            .flat_map(|item| item.lines.iter().map(ItemLine::plain_text))
            .collect();
        assert_eq!(skill_lines, vec!["Languages: Go, Rust".to_string()]);
    }

    #[test]
    fn test_education_header_includes_gpa() {
        let mut value = jane_doe();
        value["educations"] =
            json!([{ "school": "MIT", "degree": "BS Computer Science", "date": "2019", "gpa": "3.9" }]);
        let blocks = build(&document(value)).unwrap();
        let edu = blocks
            .iter()
            .find_map(|b| match b {
                LayoutBlock::Item(item) if item.section == SectionKey::Educations => Some(item),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            edu.header.as_ref().unwrap().left,
            "BS Computer Science | GPA: 3.9"
        );
        assert_eq!(edu.subtitle.as_deref(), Some("MIT"));
    }

    #[test]
    fn test_contact_line_order_and_link() {
        let doc = document(json!({
            "personalInfo": {
                "name": "Jane Doe",
                "email": "jane@x.com",
                "phone": "555-0100",
                "url": "janedoe.dev",
                "location": "Berlin"
            }
        }));
        let blocks = build(&doc).unwrap();
        let LayoutBlock::Header(header) = &blocks[0] else {
            panic!("header must come first");
        };
        let texts: Vec<&str> = header.contact.iter().map(ContactPart::text).collect();
        assert_eq!(texts, vec!["jane@x.com", "555-0100", "janedoe.dev", "Berlin"]);
        assert_eq!(
            header.contact[2],
            ContactPart::Link {
                text: "janedoe.dev".into(),
                uri: "https://janedoe.dev".into()
            }
        );
    }

    #[test]
    fn test_custom_section_is_single_item() {
        let mut value = jane_doe();
        value["custom"] = json!({ "descriptions": ["Speaker at RustConf", "Open source maintainer"] });
        let blocks = build(&document(value)).unwrap();
        let custom: Vec<&ItemBlock> = blocks
            .iter()
            .filter_map(|b| match b {
                LayoutBlock::Item(item) if item.section == SectionKey::Custom => Some(item),
                _ => None,
            })
            .collect();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].lines.len(), 2);
        assert!(custom[0].header.is_none());
    }

    #[test]
    fn test_custom_heading_text() {
        let mut value = jane_doe();
        value["settings"] = json!({ "formToHeading": { "workExperiences": "EXPERIENCE" } });
        let blocks = build(&document(value)).unwrap();
        assert!(matches!(&blocks[1], LayoutBlock::SectionHeading(h) if h.text == "EXPERIENCE"));
    }
}
