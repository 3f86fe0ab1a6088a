use crate::i18n::TranslationSource;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Translations
    pub translations_url: Option<String>,
    pub translations_dir: PathBuf,

    // Preferences
    pub preferences_file: PathBuf,

    // Language negotiation
    pub preferred_languages: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Translations - HTTP when a URL is given, otherwise a local directory
            translations_url: std::env::var("TRANSLATIONS_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            translations_dir: std::env::var("TRANSLATIONS_DIR")
                .unwrap_or_else(|_| "i18n/translations".to_string())
                .into(),

            // Preferences
            preferences_file: std::env::var("PREFERENCES_FILE")
                .unwrap_or_else(|_| ".little-beans/preferences.json".to_string())
                .into(),

            // Language negotiation
            preferred_languages: match std::env::var("PREFERRED_LANGUAGES") {
                Ok(raw) => Some(parse_language_list(&raw)),
                Err(std::env::VarError::NotPresent) => None,
                Err(e) => return Err(e).context("PREFERRED_LANGUAGES is not valid unicode"),
            },
        })
    }

    /// Where dictionaries are loaded from.
    pub fn translation_source(&self) -> TranslationSource {
        match &self.translations_url {
            Some(base_url) => TranslationSource::Http {
                base_url: base_url.clone(),
            },
            None => TranslationSource::Directory(self.translations_dir.clone()),
        }
    }

    /// The visitor's ordered language preferences.
    ///
    /// Uses `PREFERRED_LANGUAGES` when set, otherwise the operating system's
    /// locale list.
    pub fn preferred_languages(&self) -> Vec<String> {
        match &self.preferred_languages {
            Some(languages) => languages.clone(),
            None => sys_locale::get_locales().collect(),
        }
    }
}

/// Split a comma-separated language list, dropping blanks and `;q=` weights.
fn parse_language_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|entry| entry.split(';').next().unwrap_or_default().trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
