//! Language type and language negotiation.
//!
//! A `Language` can only be constructed for a code that exists in the
//! registry. `Language::resolve` is the negotiation entry point used for
//! stored preferences, switcher values and the browser/OS preference list.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "it")
    code: &'static str,
}

impl Language {
    /// Language used when a key is missing or a dictionary fails to load.
    pub fn fallback() -> Language {
        let config = LanguageRegistry::get().fallback();
        Language { code: config.code }
    }

    /// Language the translator reports before the first switch completes.
    pub fn initial() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    /// Resolve a candidate language tag against the supported set.
    ///
    /// The candidate is lowercased and matched exactly first; failing that,
    /// the primary subtag (everything before the first `-` or `_`) is tried.
    /// Returns `None` for empty input or when nothing matches.
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!(Language::resolve("en-US"), Some(Language::fallback()));
    /// assert_eq!(Language::resolve("fr"), None);
    /// ```
    pub fn resolve(candidate: &str) -> Option<Language> {
        let normalized = candidate.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let registry = LanguageRegistry::get();
        if let Some(config) = registry.get_by_code(&normalized) {
            return Some(Language { code: config.code });
        }

        let base = normalized.split(['-', '_']).next().unwrap_or_default();
        registry
            .get_by_code(base)
            .map(|config| Language { code: config.code })
    }

    /// Resolve the first supported entry of an ordered preference list.
    ///
    /// Unresolvable entries are skipped.
    pub fn resolve_first<I, S>(candidates: I) -> Option<Language>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .find_map(|candidate| Language::resolve(candidate.as_ref()))
    }

    /// All supported languages in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_all()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// `Language` built through `resolve`, `from_str` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the fallback language.
    pub fn is_fallback(&self) -> bool {
        self.config().is_fallback
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Language::resolve(s) {
            Some(language) => Ok(language),
            None => bail!("Unsupported language code: '{}'", s),
        }
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
