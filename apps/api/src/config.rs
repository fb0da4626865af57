use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::{
    layout::DEFAULT_MAX_PAGES,
    models::resume::{
        DEFAULT_DOCUMENT_SIZE, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_THEME_COLOR,
    },
    validation::ValidationLimits,
};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_REQUEST_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Immutable for the life of the process; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub font_regular_path: PathBuf,
    pub font_bold_path: PathBuf,
    pub render_timeout: Duration,
    pub max_pages: usize,
    pub max_request_bytes: usize,
    pub pdf_defaults: PdfDefaults,
    pub validation: ValidationLimits,
}

/// Settings applied when a request omits them.
#[derive(Debug, Clone, Serialize)]
pub struct PdfDefaults {
    pub theme_color: String,
    pub font_family: String,
    pub font_size: String,
    pub document_size: String,
}

impl Default for PdfDefaults {
    fn default() -> Self {
        Self {
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            document_size: DEFAULT_DOCUMENT_SIZE.to_string(),
        }
    }
}

impl PdfDefaults {
    /// Fill absent or null `settings` fields of a raw request body.
    /// Values the client sent are left untouched, even if invalid.
    pub fn apply_to(&self, body: &mut Value) {
        let Some(root) = body.as_object_mut() else {
            return;
        };
        let settings = root
            .entry("settings")
            .or_insert_with(|| Value::Object(Default::default()));
        if settings.is_null() {
            *settings = Value::Object(Default::default());
        }
        let Some(settings) = settings.as_object_mut() else {
            return;
        };

        for (key, default) in [
            ("themeColor", &self.theme_color),
            ("fontFamily", &self.font_family),
            ("fontSize", &self.font_size),
            ("documentSize", &self.document_size),
        ] {
            let slot = settings.entry(key).or_insert(Value::Null);
            if slot.is_null() {
                *slot = Value::String(default.clone());
            }
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PdfDefaults::default();
        let limits = ValidationLimits::default();
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            rust_log: string_or("RUST_LOG", "info"),
            font_regular_path: PathBuf::from(string_or(
                "FONT_REGULAR_PATH",
                "static/fonts/OpenSans-Regular.ttf",
            )),
            font_bold_path: PathBuf::from(string_or(
                "FONT_BOLD_PATH",
                "static/fonts/OpenSans-Bold.ttf",
            )),
            render_timeout: Duration::from_secs(parse_or(
                &lookup,
                "RENDER_TIMEOUT_SECS",
                DEFAULT_RENDER_TIMEOUT_SECS,
            )?),
            max_pages: parse_or(&lookup, "MAX_PAGES", DEFAULT_MAX_PAGES)?,
            max_request_bytes: parse_or(&lookup, "MAX_REQUEST_BYTES", DEFAULT_MAX_REQUEST_BYTES)?,
            pdf_defaults: PdfDefaults {
                theme_color: string_or("DEFAULT_THEME_COLOR", &defaults.theme_color),
                font_family: string_or("DEFAULT_FONT_FAMILY", &defaults.font_family),
                font_size: string_or("DEFAULT_FONT_SIZE", &defaults.font_size),
                document_size: string_or("DEFAULT_DOCUMENT_SIZE", &defaults.document_size),
            },
            validation: ValidationLimits {
                max_work_experiences: parse_or(
                    &lookup,
                    "MAX_WORK_EXPERIENCES",
                    limits.max_work_experiences,
                )?,
                max_educations: parse_or(&lookup, "MAX_EDUCATIONS", limits.max_educations)?,
                max_projects: parse_or(&lookup, "MAX_PROJECTS", limits.max_projects)?,
                max_skill_categories: parse_or(
                    &lookup,
                    "MAX_SKILL_CATEGORIES",
                    limits.max_skill_categories,
                )?,
                max_description_length: parse_or(
                    &lookup,
                    "MAX_DESCRIPTION_LENGTH",
                    limits.max_description_length,
                )?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
