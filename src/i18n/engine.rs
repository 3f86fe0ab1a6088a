//! Translation engine: current language, loaded dictionaries and lookup.

use crate::i18n::interpolate::interpolate;
use crate::i18n::{Dictionary, Language, TranslationMetrics};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

#[derive(Debug)]
struct EngineState {
    language: Language,
    dictionaries: HashMap<Language, Dictionary>,
}

/// Holds the current language and every dictionary loaded so far.
///
/// Lookups never fail: a key missing from the current language is taken
/// from the fallback language, and a key missing from both is returned
/// unchanged.
#[derive(Debug)]
pub struct Translator {
    state: RwLock<EngineState>,
    metrics: Arc<TranslationMetrics>,
}

impl Translator {
    /// Create a translator in the default language with an empty fallback
    /// dictionary.
    pub fn new(metrics: Arc<TranslationMetrics>) -> Self {
        let mut dictionaries = HashMap::new();
        dictionaries.insert(Language::fallback(), Dictionary::new());

        Self {
            state: RwLock::new(EngineState {
                language: Language::initial(),
                dictionaries,
            }),
            metrics,
        }
    }

    /// The language lookups currently resolve against.
    pub fn language(&self) -> Language {
        self.read().language
    }

    pub fn set_current(&self, language: Language) {
        self.write().language = language;
    }

    /// Store (or replace) the dictionary for a language.
    pub fn insert(&self, language: Language, dictionary: Dictionary) {
        self.write().dictionaries.insert(language, dictionary);
    }

    /// Whether a non-empty dictionary is present for a language.
    pub fn has_dictionary(&self, language: Language) -> bool {
        self.read()
            .dictionaries
            .get(&language)
            .is_some_and(|dictionary| !dictionary.is_empty())
    }

    /// A copy of the dictionary stored for a language.
    pub fn dictionary(&self, language: Language) -> Option<Dictionary> {
        self.read().dictionaries.get(&language).cloned()
    }

    /// Translate a dotted key.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Translate a dotted key and fill `{placeholder}` tokens from `values`.
    pub fn t_with(&self, key: &str, values: &[(&str, &str)]) -> String {
        self.metrics.record_lookup();
        let state = self.read();

        let current = state
            .dictionaries
            .get(&state.language)
            .and_then(|dictionary| dictionary.lookup(key));

        let template = match current {
            Some(template) => template,
            None => {
                let fallback = state
                    .dictionaries
                    .get(&Language::fallback())
                    .and_then(|dictionary| dictionary.lookup(key));

                match fallback {
                    Some(template) => {
                        if state.language != Language::fallback() {
                            warn!(
                                "[i18n] Missing key \"{}\" in \"{}\", falling back to \"{}\".",
                                key,
                                state.language,
                                Language::fallback()
                            );
                            self.metrics.record_fallback_hit();
                        }
                        template
                    }
                    None => {
                        warn!("[i18n] Missing translation key: {}", key);
                        self.metrics.record_missing_key();
                        return key.to_string();
                    }
                }
            }
        };

        interpolate(&template, values)
    }

    fn read(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dict(value: serde_json::Value) -> Dictionary {
        Dictionary::try_from(value).unwrap()
    }

    fn translator() -> (Translator, Arc<TranslationMetrics>) {
        let metrics = Arc::new(TranslationMetrics::new());
        (Translator::new(metrics.clone()), metrics)
    }

    fn italian() -> Language {
        Language::resolve("it").unwrap()
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_starts_in_default_language() {
        let (translator, _) = translator();
        assert_eq!(translator.language(), Language::initial());
    }

    #[test]
    fn test_starts_with_empty_fallback_entry() {
        let (translator, _) = translator();
        assert_eq!(translator.dictionary(Language::fallback()), Some(Dictionary::new()));
        assert!(!translator.has_dictionary(Language::fallback()));
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_t_current_language() {
        let (translator, _) = translator();
        translator.insert(italian(), dict(json!({"nav": {"home": "Casa"}})));
        translator.set_current(italian());

        assert_eq!(translator.t("nav.home"), "Casa");
    }

    #[test]
    fn test_t_falls_back_to_fallback_language() {
        let (translator, metrics) = translator();
        translator.insert(Language::fallback(), dict(json!({"nav": {"home": "Home", "faq": "FAQ"}})));
        translator.insert(italian(), dict(json!({"nav": {"home": "Casa"}})));
        translator.set_current(italian());

        assert_eq!(translator.t("nav.faq"), "FAQ");
        assert_eq!(metrics.fallback_hits(), 1);
    }

    #[test]
    fn test_t_missing_everywhere_returns_key() {
        let (translator, metrics) = translator();
        translator.insert(Language::fallback(), dict(json!({"nav": {"home": "Home"}})));
        translator.set_current(italian());

        assert_eq!(translator.t("nav.unknown"), "nav.unknown");
        assert_eq!(metrics.missing_keys(), 1);
    }

    #[test]
    fn test_t_current_language_without_dictionary() {
        let (translator, _) = translator();
        translator.insert(Language::fallback(), dict(json!({"title": "Little Beans"})));

        // Default language has nothing loaded yet
        assert_eq!(translator.t("title"), "Little Beans");
    }

    #[test]
    fn test_t_in_fallback_language_is_not_a_fallback_hit() {
        let (translator, metrics) = translator();
        translator.insert(Language::fallback(), dict(json!({"title": "Little Beans"})));
        translator.set_current(Language::fallback());

        assert_eq!(translator.t("title"), "Little Beans");
        assert_eq!(metrics.fallback_hits(), 0);
    }

    // ==================== Interpolation Tests ====================

    #[test]
    fn test_t_with_interpolates() {
        let (translator, _) = translator();
        translator.insert(Language::fallback(), dict(json!({"greeting": "Hi {name}"})));
        translator.set_current(Language::fallback());

        assert_eq!(translator.t_with("greeting", &[("name", "Ana")]), "Hi Ana");
        assert_eq!(translator.t("greeting"), "Hi {name}");
    }

    #[test]
    fn test_t_with_interpolates_fallback_value() {
        let (translator, _) = translator();
        translator.insert(Language::fallback(), dict(json!({"greeting": "Hi {name}"})));
        translator.set_current(italian());

        assert_eq!(translator.t_with("greeting", &[("name", "Ana")]), "Hi Ana");
    }

    #[test]
    fn test_t_with_missing_key_is_not_interpolated() {
        let (translator, _) = translator();
        assert_eq!(translator.t_with("{name}", &[("name", "Ana")]), "{name}");
    }

    // ==================== State Tests ====================

    #[test]
    fn test_insert_replaces_dictionary() {
        let (translator, _) = translator();
        translator.insert(Language::fallback(), dict(json!({"a": "1"})));
        translator.insert(Language::fallback(), dict(json!({"a": "2"})));
        translator.set_current(Language::fallback());

        assert_eq!(translator.t("a"), "2");
        assert!(translator.has_dictionary(Language::fallback()));
    }

    #[test]
    fn test_lookups_are_counted() {
        let (translator, metrics) = translator();
        translator.t("a");
        translator.t_with("b", &[]);
        assert_eq!(metrics.lookups(), 2);
    }
}
