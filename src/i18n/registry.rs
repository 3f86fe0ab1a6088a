//! Language registry: Single source of truth for all supported languages.
//!
//! The site ships a closed set of five languages. The registry is a
//! singleton initialized with `OnceLock` on first access and immutable
//! thereafter; everything else in the crate asks it which codes exist.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "de")
    pub code: &'static str,

    /// English name of the language (e.g., "German")
    pub name: &'static str,

    /// Native name of the language (e.g., "Deutsch")
    pub native_name: &'static str,

    /// Whether missing keys and failed loads fall back to this language (only one should be true)
    pub is_fallback: bool,

    /// Whether this is the language shown before any dictionary has loaded (only one should be true)
    pub is_default: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its exact (lowercase) code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all supported languages in registry order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the fallback language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one fallback language
    /// (this indicates a configuration error).
    pub fn fallback(&self) -> &LanguageConfig {
        self.single(|lang| lang.is_fallback, "fallback")
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default language.
    pub fn default_language(&self) -> &LanguageConfig {
        self.single(|lang| lang.is_default, "default")
    }

    fn single(&self, predicate: impl Fn(&LanguageConfig) -> bool, role: &str) -> &LanguageConfig {
        let matching: Vec<_> = self.languages.iter().filter(|lang| predicate(lang)).collect();

        match matching.len() {
            0 => panic!("No {} language found in registry", role),
            1 => matching[0],
            _ => panic!("Multiple {} languages found in registry", role),
        }
    }
}

/// Default language configurations.
///
/// English is the fallback; German is what the page starts in.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_fallback: true,
            is_default: false,
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_fallback: false,
            is_default: true,
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            is_fallback: false,
            is_default: false,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_fallback: false,
            is_default: false,
        },
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            is_fallback: false,
            is_default: false,
        },
    ]
}
