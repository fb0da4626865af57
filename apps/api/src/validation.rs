//! Résumé content validation.
//!
//! Issues reject the request; warnings are advisory and returned alongside a
//! successful validation. Limits come from configuration.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::{
    layout::{
        font_metrics::FontFamily,
        style::{PageSize, MAX_FONT_SIZE, MIN_FONT_SIZE},
        templates::{is_known_template, DEFAULT_TEMPLATE},
    },
    models::{
        CustomSection, Education, PersonalInfo, Project, ResumeDocument, SkillGroup, StyleConfig,
        WorkExperience,
    },
};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_PHONE_LENGTH: usize = 20;
pub const MAX_LOCATION_LENGTH: usize = 100;
/// Company, job title, school, degree and project name.
pub const MAX_FIELD_LENGTH: usize = 100;
pub const MAX_CATEGORY_LENGTH: usize = 50;
/// Hard cap on one bullet (or one joined skill line); the configurable
/// description length only warns.
pub const MAX_BULLET_LENGTH: usize = 1000;
pub const MAX_SUMMARY_LENGTH: usize = 500;
pub const MIN_SUMMARY_LENGTH: usize = 50;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_SKILLS_PER_GROUP: usize = 20;
pub const MAX_GPA: f32 = 4.0;

// Static regex patterns compiled once
static RE_HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("Invalid regex"));
static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex"));
static RE_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]?[\d\-().]{7,15}$").expect("Invalid regex"));
static RE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^https?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$",
    )
    .expect("Invalid regex")
});
// "Jan 2020 - Dec 2021", "Jan 2020 - Present", "2020 - 2021", "2020 - Present"
static RE_DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\w+ \d{4} - (?:\w+ \d{4}|Present)|\d{4} - (?:\d{4}|Present))")
        .expect("Invalid regex")
});

/// Per-section limits, overridable through the environment.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationLimits {
    pub max_work_experiences: usize,
    pub max_educations: usize,
    pub max_projects: usize,
    pub max_skill_categories: usize,
    pub max_description_length: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_work_experiences: 10,
            max_educations: 5,
            max_projects: 10,
            max_skill_categories: 10,
            max_description_length: 200,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub sections_validated: Vec<String>,
}

impl ValidationResult {
    fn section(&mut self, name: &str) {
        if !self.sections_validated.iter().any(|s| s == name) {
            self.sections_validated.push(name.to_string());
        }
    }
}

/// Full validation: content sections plus settings.
pub fn validate_resume(doc: &ResumeDocument, limits: &ValidationLimits) -> ValidationResult {
    let mut result = validate_content(doc, limits);
    validate_settings(&doc.settings, &mut result);
    result.is_valid = result.issues.is_empty();
    result
}

/// Content sections only. Settings errors are left to the style resolver,
/// which reports them as unsupported styles.
pub fn validate_content(doc: &ResumeDocument, limits: &ValidationLimits) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_personal_info(&doc.personal_info, &mut result);
    if !doc.work_experiences.is_empty() {
        validate_work_experiences(&doc.work_experiences, limits, &mut result);
    }
    if !doc.educations.is_empty() {
        validate_educations(&doc.educations, limits, &mut result);
    }
    if !doc.projects.is_empty() {
        validate_projects(&doc.projects, limits, &mut result);
    }
    if !doc.skills.is_empty() {
        validate_skills(&doc.skills, limits, &mut result);
    }
    if !doc.custom.descriptions.is_empty() {
        validate_custom(&doc.custom, &mut result);
    }

    if doc.work_experiences.is_empty() && doc.educations.is_empty() && doc.projects.is_empty() {
        result
            .warnings
            .push("Resume has no work experience, education, or projects sections".to_string());
    }

    result.is_valid = result.issues.is_empty();
    result
}

fn validate_personal_info(info: &PersonalInfo, result: &mut ValidationResult) {
    result.section("personal_info");

    let name = info.name.trim();
    if name.is_empty() {
        result.issues.push("Name is required".to_string());
    } else if name.chars().count() > MAX_NAME_LENGTH {
        result
            .issues
            .push(format!("Name exceeds maximum length of {MAX_NAME_LENGTH} characters"));
    }

    let email = info.email.trim();
    if email.is_empty() {
        result.issues.push("Email is required".to_string());
    } else if !RE_EMAIL.is_match(email) {
        result.issues.push(format!("Invalid email address: {email}"));
    }

    if let Some(phone) = info.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        if phone.trim().chars().count() > MAX_PHONE_LENGTH {
            result.issues.push(format!(
                "Phone number exceeds maximum length of {MAX_PHONE_LENGTH} characters"
            ));
        }
        let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
        if !RE_PHONE.is_match(&compact) {
            result
                .warnings
                .push("Phone number format may not be recognized by all systems".to_string());
        }
    }

    if let Some(url) = info.url.as_deref().filter(|u| !u.trim().is_empty()) {
        if !RE_URL.is_match(url.trim()) {
            result
                .warnings
                .push("URL format should include http:// or https://".to_string());
        }
    }

    if let Some(location) = info.location.as_deref() {
        if location.trim().chars().count() > MAX_LOCATION_LENGTH {
            result.issues.push(format!(
                "Location exceeds maximum length of {MAX_LOCATION_LENGTH} characters"
            ));
        }
    }

    if let Some(summary) = info.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        let length = summary.chars().count();
        if length > MAX_SUMMARY_LENGTH {
            result.issues.push(format!(
                "Summary exceeds maximum length of {MAX_SUMMARY_LENGTH} characters"
            ));
        }
        if length < MIN_SUMMARY_LENGTH {
            result
                .warnings
                .push("Summary is quite short - consider adding more details".to_string());
        }
    }
}

fn validate_work_experiences(
    experiences: &[WorkExperience],
    limits: &ValidationLimits,
    result: &mut ValidationResult,
) {
    result.section("work_experience");
    if experiences.len() > limits.max_work_experiences {
        result.issues.push(format!(
            "Too many work experiences (max: {})",
            limits.max_work_experiences
        ));
    }

    for (i, exp) in experiences.iter().enumerate() {
        let prefix = format!("Work Experience {}:", i + 1);
        require(&exp.company, &prefix, "Company name", result);
        within(&exp.company, &prefix, "Company name", MAX_FIELD_LENGTH, result);
        require(&exp.job_title, &prefix, "Job title", result);
        within(&exp.job_title, &prefix, "Job title", MAX_FIELD_LENGTH, result);
        require(&exp.date, &prefix, "Date", result);

        if exp.descriptions.is_empty() {
            result
                .warnings
                .push(format!("{prefix} No job descriptions provided"));
        } else {
            check_descriptions(&exp.descriptions, &prefix, limits, true, result);
        }

        if !exp.date.trim().is_empty() && !RE_DATE_RANGE.is_match(exp.date.trim()) {
            result.warnings.push(format!(
                "{prefix} Date format may not be standard (consider 'MMM YYYY - MMM YYYY' format)"
            ));
        }
    }
}

fn validate_educations(
    educations: &[Education],
    limits: &ValidationLimits,
    result: &mut ValidationResult,
) {
    result.section("education");
    if educations.len() > limits.max_educations {
        result.issues.push(format!(
            "Too many education entries (max: {})",
            limits.max_educations
        ));
    }

    for (i, edu) in educations.iter().enumerate() {
        let prefix = format!("Education {}:", i + 1);
        require(&edu.school, &prefix, "School name", result);
        within(&edu.school, &prefix, "School name", MAX_FIELD_LENGTH, result);
        require(&edu.degree, &prefix, "Degree", result);
        within(&edu.degree, &prefix, "Degree", MAX_FIELD_LENGTH, result);
        require(&edu.date, &prefix, "Date", result);
        check_bullet_lengths(&edu.descriptions, &prefix, result);

        if let Some(gpa) = edu.gpa.as_deref().filter(|g| !g.trim().is_empty()) {
            // "3.8" or "3.8/4.0"
            let value = gpa.split('/').next().unwrap_or_default().trim();
            match value.parse::<f32>() {
                Ok(v) if v > MAX_GPA => result.warnings.push(format!(
                    "{prefix} GPA seems high (>{MAX_GPA:.1}) - verify format"
                )),
                Ok(_) => {}
                Err(_) => result.warnings.push(format!(
                    "{prefix} GPA format not recognized - consider using 'X.X/4.0' format"
                )),
            }
        }
    }
}

fn validate_projects(projects: &[Project], limits: &ValidationLimits, result: &mut ValidationResult) {
    result.section("projects");
    if projects.len() > limits.max_projects {
        result
            .issues
            .push(format!("Too many projects (max: {})", limits.max_projects));
    }

    for (i, project) in projects.iter().enumerate() {
        let prefix = format!("Project {}:", i + 1);
        require(&project.name, &prefix, "Project name", result);
        within(&project.name, &prefix, "Project name", MAX_FIELD_LENGTH, result);
        require(&project.date, &prefix, "Date", result);

        if project.descriptions.is_empty() {
            result
                .warnings
                .push(format!("{prefix} No project descriptions provided"));
        } else {
            check_descriptions(&project.descriptions, &prefix, limits, false, result);
        }
    }
}

fn validate_skills(skills: &[SkillGroup], limits: &ValidationLimits, result: &mut ValidationResult) {
    result.section("skills");
    if skills.len() > limits.max_skill_categories {
        result.issues.push(format!(
            "Too many skill categories (max: {})",
            limits.max_skill_categories
        ));
    }

    for (i, group) in skills.iter().enumerate() {
        let prefix = format!("Skill Category {}:", i + 1);
        require(&group.category, &prefix, "Category name", result);
        within(&group.category, &prefix, "Category name", MAX_CATEGORY_LENGTH, result);
        if group.skills.is_empty() {
            result
                .issues
                .push(format!("{prefix} No skills listed in category"));
        }
        let line_length: usize = group.skills.iter().map(|s| s.chars().count() + 2).sum();
        if line_length > MAX_BULLET_LENGTH {
            result.issues.push(format!(
                "{prefix} Skills list exceeds maximum length of {MAX_BULLET_LENGTH} characters"
            ));
        }
        if group.skills.len() > MAX_SKILLS_PER_GROUP {
            result.warnings.push(format!(
                "{prefix} Many skills listed - consider grouping or prioritizing"
            ));
        }
    }
}

fn validate_custom(custom: &CustomSection, result: &mut ValidationResult) {
    result.section("custom");
    check_bullet_lengths(&custom.descriptions, "Custom:", result);
}

fn validate_settings(settings: &StyleConfig, result: &mut ValidationResult) {
    result.section("settings");

    if !RE_HEX_COLOR.is_match(settings.theme_color.trim()) {
        result
            .issues
            .push("Theme color must be a valid hex color (e.g., #1f2937)".to_string());
    }

    let raw_size = settings.font_size.trim();
    match raw_size.strip_suffix("pt").unwrap_or(raw_size).trim().parse::<f32>() {
        Ok(size) if size.is_finite() && size > 0.0 => {
            if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
                result.warnings.push(format!(
                    "Font size should be between {MIN_FONT_SIZE} and {MAX_FONT_SIZE} for best results"
                ));
            }
        }
        _ => result
            .issues
            .push("Font size must be a valid number".to_string()),
    }

    if PageSize::parse(&settings.document_size).is_none() {
        let valid: Vec<&str> = PageSize::ALL.iter().map(PageSize::name).collect();
        result.issues.push(format!(
            "Document size must be one of: {}",
            valid.join(", ")
        ));
    }

    if FontFamily::parse(&settings.font_family).is_none() {
        result.warnings.push(format!(
            "Font family '{}' is not supported; {} will be used",
            settings.font_family,
            FontFamily::FALLBACK.name()
        ));
    }

    if let Some(template) = settings.template.as_deref() {
        if !is_known_template(template) {
            result.warnings.push(format!(
                "Unknown template '{template}'; the {DEFAULT_TEMPLATE} template will be used"
            ));
        }
    }
}

fn require(value: &str, prefix: &str, label: &str, result: &mut ValidationResult) {
    if value.trim().is_empty() {
        result.issues.push(format!("{prefix} {label} is required"));
    }
}

fn within(value: &str, prefix: &str, label: &str, max: usize, result: &mut ValidationResult) {
    if value.trim().chars().count() > max {
        result.issues.push(format!(
            "{prefix} {label} exceeds maximum length of {max} characters"
        ));
    }
}

fn check_bullet_lengths(descriptions: &[String], prefix: &str, result: &mut ValidationResult) {
    for (j, desc) in descriptions.iter().enumerate() {
        if desc.chars().count() > MAX_BULLET_LENGTH {
            result.issues.push(format!(
                "{prefix} Description {} exceeds maximum length of {MAX_BULLET_LENGTH} characters",
                j + 1
            ));
        }
    }
}

fn check_descriptions(
    descriptions: &[String],
    prefix: &str,
    limits: &ValidationLimits,
    warn_short: bool,
    result: &mut ValidationResult,
) {
    check_bullet_lengths(descriptions, prefix, result);
    for (j, desc) in descriptions.iter().enumerate() {
        if desc.chars().count() > limits.max_description_length {
            result.warnings.push(format!(
                "{prefix} Description {} exceeds recommended length ({} chars)",
                j + 1,
                limits.max_description_length
            ));
        }
        if warn_short && desc.trim().chars().count() < MIN_DESCRIPTION_LENGTH {
            result
                .warnings
                .push(format!("{prefix} Description {} is very short", j + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> ResumeDocument {
        serde_json::from_value(value).unwrap()
    }

    fn valid_doc() -> serde_json::Value {
        json!({
            "personalInfo": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "phone": "+1 555 010 0199",
                "url": "https://janedoe.dev"
            },
            "workExperiences": [{
                "company": "Acme",
                "jobTitle": "Engineer",
                "date": "Jan 2020 - Present",
                "descriptions": ["Built the billing pipeline in Rust"]
            }],
            "educations": [{ "school": "MIT", "degree": "BS CS", "date": "2015 - 2019", "gpa": "3.8/4.0" }],
            "skills": [{ "category": "Languages", "skills": ["Go", "Rust"] }]
        })
    }

    #[test]
    fn test_valid_resume_has_no_issues() {
        let result = validate_resume(&doc(valid_doc()), &ValidationLimits::default());
        assert!(result.is_valid, "unexpected issues: {:?}", result.issues);
        assert!(result.warnings.is_empty(), "unexpected warnings: {:?}", result.warnings);
        assert_eq!(
            result.sections_validated,
            vec!["personal_info", "work_experience", "education", "skills", "settings"]
        );
    }

    #[test]
    fn test_missing_name_and_bad_email() {
        let mut value = valid_doc();
        value["personalInfo"]["name"] = json!("");
        value["personalInfo"]["email"] = json!("not-an-email");
        let result = validate_resume(&doc(value), &ValidationLimits::default());
        assert!(!result.is_valid);
        assert!(result.issues.iter().any(|i| i == "Name is required"));
        assert!(result.issues.iter().any(|i| i.starts_with("Invalid email address")));
    }

    #[test]
    fn test_required_item_fields() {
        let mut value = valid_doc();
        value["workExperiences"][0]["company"] = json!(" ");
        value["projects"] = json!([{ "name": "", "date": "2023" }]);
        let result = validate_resume(&doc(value), &ValidationLimits::default());
        assert!(result
            .issues
            .contains(&"Work Experience 1: Company name is required".to_string()));
        assert!(result
            .issues
            .contains(&"Project 1: Project name is required".to_string()));
    }

    #[test]
    fn test_field_length_caps() {
        let mut value = valid_doc();
        value["personalInfo"]["phone"] = json!("+1 555 010 0199 ext 12345");
        value["personalInfo"]["location"] = json!("x".repeat(101));
        value["workExperiences"][0]["jobTitle"] = json!("y".repeat(101));
        value["educations"][0]["school"] = json!("z".repeat(101));
        value["projects"] = json!([{ "name": "p".repeat(101), "date": "2023", "descriptions": ["Shipped a thing"] }]);
        value["skills"][0]["category"] = json!("c".repeat(51));
        let result = validate_content(&doc(value), &ValidationLimits::default());
        for expected in [
            "Phone number exceeds maximum length of 20 characters",
            "Location exceeds maximum length of 100 characters",
            "Work Experience 1: Job title exceeds maximum length of 100 characters",
            "Education 1: School name exceeds maximum length of 100 characters",
            "Project 1: Project name exceeds maximum length of 100 characters",
            "Skill Category 1: Category name exceeds maximum length of 50 characters",
        ] {
            assert!(result.issues.contains(&expected.to_string()), "missing: {expected}");
        }
        assert!(!result.is_valid);
    }

    #[test]
    fn test_field_at_cap_is_accepted() {
        let mut value = valid_doc();
        value["workExperiences"][0]["company"] = json!("a".repeat(MAX_FIELD_LENGTH));
        value["skills"][0]["category"] = json!("b".repeat(MAX_CATEGORY_LENGTH));
        let result = validate_content(&doc(value), &ValidationLimits::default());
        assert!(result.is_valid, "unexpected issues: {:?}", result.issues);
    }

    #[test]
    fn test_oversized_bullets_rejected_in_every_section() {
        let huge = "w".repeat(200_000);
        let mut value = valid_doc();
        value["workExperiences"][0]["descriptions"] = json!([huge.clone()]);
        value["educations"][0]["descriptions"] = json!([huge.clone()]);
        value["custom"] = json!({ "descriptions": [huge.clone()] });
        value["skills"][0]["skills"] = json!([huge]);
        let result = validate_content(&doc(value), &ValidationLimits::default());
        assert!(!result.is_valid);
        for expected in [
            "Work Experience 1: Description 1 exceeds maximum length of 1000 characters",
            "Education 1: Description 1 exceeds maximum length of 1000 characters",
            "Custom: Description 1 exceeds maximum length of 1000 characters",
            "Skill Category 1: Skills list exceeds maximum length of 1000 characters",
        ] {
            assert!(result.issues.contains(&expected.to_string()), "missing: {expected}");
        }
    }

    #[test]
    fn test_section_limits_from_config() {
        let mut value = valid_doc();
        value["educations"] = json!([
            { "school": "A", "degree": "B", "date": "2019" },
            { "school": "C", "degree": "D", "date": "2020" }
        ]);
        let limits = ValidationLimits {
            max_educations: 1,
            ..ValidationLimits::default()
        };
        let result = validate_resume(&doc(value), &limits);
        assert!(result
            .issues
            .contains(&"Too many education entries (max: 1)".to_string()));
    }

    #[test]
    fn test_settings_issues() {
        let mut value = valid_doc();
        value["settings"] = json!({ "themeColor": "notacolor", "fontSize": "big", "documentSize": "Legal" });
        let result = validate_resume(&doc(value), &ValidationLimits::default());
        assert_eq!(result.issues.len(), 3, "{:?}", result.issues);
    }

    #[test]
    fn test_content_validation_skips_settings() {
        let mut value = valid_doc();
        value["settings"] = json!({ "themeColor": "notacolor" });
        let document = doc(value);
        assert!(validate_content(&document, &ValidationLimits::default()).is_valid);
        assert!(!validate_resume(&document, &ValidationLimits::default()).is_valid);
    }

    #[test]
    fn test_settings_warnings() {
        let mut value = valid_doc();
        value["settings"] = json!({ "fontSize": 20, "fontFamily": "Papyrus", "template": "retro" });
        let result = validate_resume(&doc(value), &ValidationLimits::default());
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 3, "{:?}", result.warnings);
    }

    #[test]
    fn test_empty_skill_group_is_issue() {
        let mut value = valid_doc();
        value["skills"] = json!([{ "category": "Tools", "skills": ["  "] }]);
        let result = validate_resume(&doc(value), &ValidationLimits::default());
        assert!(result
            .issues
            .contains(&"Skill Category 1: No skills listed in category".to_string()));
    }

    #[test]
    fn test_content_warnings() {
        let mut value = valid_doc();
        value["personalInfo"]["url"] = json!("janedoe.dev");
        value["personalInfo"]["summary"] = json!("Engineer.");
        value["workExperiences"][0]["date"] = json!("since forever");
        value["workExperiences"][0]["descriptions"] = json!(["Short", "x".repeat(250)]);
        value["educations"][0]["gpa"] = json!("4.7");
        let result = validate_resume(&doc(value), &ValidationLimits::default());
        assert!(result.is_valid, "{:?}", result.issues);
        for fragment in [
            "URL format",
            "Summary is quite short",
            "Date format may not be standard",
            "Description 1 is very short",
            "Description 2 exceeds recommended length",
            "GPA seems high",
        ] {
            assert!(
                result.warnings.iter().any(|w| w.contains(fragment)),
                "missing warning: {fragment}"
            );
        }
    }

    #[test]
    fn test_no_main_sections_warns() {
        let value = json!({ "personalInfo": { "name": "Jane", "email": "jane@x.com" } });
        let result = validate_resume(&doc(value), &ValidationLimits::default());
        assert!(result.is_valid);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("no work experience, education, or projects")));
    }

    #[test]
    fn test_date_patterns() {
        for ok in ["Jan 2020 - Dec 2021", "Jan 2020 - Present", "2020 - 2021", "2020 - Present"] {
            assert!(RE_DATE_RANGE.is_match(ok), "{ok}");
        }
        assert!(!RE_DATE_RANGE.is_match("last year"));
    }
}
