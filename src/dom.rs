//! In-memory page model and the translation applier.
//!
//! Pages mark translatable elements declaratively:
//!
//! - `data-i18n="planner.title"` replaces the element's text
//! - `data-i18n-attr="placeholder"` redirects the text into that attribute
//! - `data-language-switcher` marks a control whose `value` mirrors the
//!   current language and whose changes request a language switch

use crate::i18n::{Language, Translator};
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::{broadcast, mpsc};
use tracing::debug;

pub const I18N_KEY_ATTR: &str = "data-i18n";
pub const I18N_TARGET_ATTR: &str = "data-i18n-attr";
pub const LANGUAGE_SWITCHER_ATTR: &str = "data-language-switcher";

/// Notification that translations were (re)applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageChanged {
    pub language: Language,
}

/// A language switcher's value was changed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherChange {
    pub value: String,
}

/// A single page element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// The `data-i18n` key, if this element is translatable.
    pub fn translation_key(&self) -> Option<&str> {
        self.attribute(I18N_KEY_ATTR)
    }

    pub fn is_language_switcher(&self) -> bool {
        self.attributes.contains_key(LANGUAGE_SWITCHER_ATTR)
    }

    /// Current value of a form control.
    pub fn value(&self) -> Option<&str> {
        self.attribute("value")
    }
}

/// A page: the root `lang` attribute plus a flat list of elements.
#[derive(Debug, Default)]
pub struct Document {
    lang: String,
    elements: Vec<Element>,
    switcher_events: Option<mpsc::UnboundedSender<SwitcherChange>>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            lang: String::new(),
            elements,
            switcher_events: None,
        }
    }

    /// The document-wide language attribute.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn set_lang(&mut self, lang: &str) {
        self.lang = lang.to_string();
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }

    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id.as_deref() == Some(id))
    }

    /// Elements carrying an attribute, in document order.
    pub fn query_all<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements
            .iter()
            .filter(move |e| e.attributes.contains_key(attribute))
    }

    /// Route future switcher changes into `sender`.
    pub fn bind_switcher_events(&mut self, sender: mpsc::UnboundedSender<SwitcherChange>) {
        self.switcher_events = Some(sender);
    }

    /// Simulate the user picking `value` in the switcher with this id.
    ///
    /// Returns `false` when no switcher has that id.
    pub fn change_switcher(&mut self, id: &str, value: &str) -> bool {
        let Some(switcher) = self
            .elements
            .iter_mut()
            .find(|e| e.id.as_deref() == Some(id) && e.is_language_switcher())
        else {
            return false;
        };
        switcher.set_attribute("value", value);

        if let Some(sender) = &self.switcher_events {
            if sender
                .send(SwitcherChange {
                    value: value.to_string(),
                })
                .is_err()
            {
                debug!("Language switcher listener has gone away");
            }
        }
        true
    }
}

/// Rewrite every translatable element in `document` for the translator's
/// current language, then announce the change on `events`.
///
/// Elements whose key has no translation keep their existing content.
/// Calling this repeatedly is harmless.
pub fn apply_translations(
    document: &mut Document,
    translator: &Translator,
    events: &broadcast::Sender<LanguageChanged>,
) {
    let language = translator.language();

    for element in document.elements.iter_mut() {
        let Some(key) = element.translation_key().map(str::to_string) else {
            continue;
        };

        let translated = translator.t(&key);
        if translated == key {
            continue;
        }

        let target = element
            .attribute(I18N_TARGET_ATTR)
            .filter(|target| !target.is_empty())
            .map(str::to_string);
        match target {
            Some(target) => element.set_attribute(&target, &translated),
            None => element.text = translated,
        }
    }

    document.lang = language.code().to_string();

    for element in document.elements.iter_mut() {
        if element.is_language_switcher() {
            element.set_attribute("value", language.code());
        }
    }

    // No subscribers is fine: widgets may not be mounted.
    let _ = events.send(LanguageChanged { language });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Dictionary, TranslationMetrics};
    use serde_json::json;
    use std::sync::Arc;

    fn english_translator() -> Translator {
        let translator = Translator::new(Arc::new(TranslationMetrics::new()));
        translator.insert(
            Language::fallback(),
            Dictionary::try_from(json!({
                "hero": {"title": "Play, rest, repeat"},
                "form": {"namePlaceholder": "Your name"}
            }))
            .unwrap(),
        );
        translator.set_current(Language::fallback());
        translator
    }

    fn page() -> Document {
        Document::new(vec![
            Element::new("h1")
                .with_id("hero-title")
                .with_attr(I18N_KEY_ATTR, "hero.title")
                .with_text("Spielen"),
            Element::new("input")
                .with_id("name")
                .with_attr(I18N_KEY_ATTR, "form.namePlaceholder")
                .with_attr(I18N_TARGET_ATTR, "placeholder"),
            Element::new("p")
                .with_id("missing")
                .with_attr(I18N_KEY_ATTR, "hero.subtitle")
                .with_text("Original markup"),
            Element::new("select")
                .with_id("lang-switch")
                .with_attr(LANGUAGE_SWITCHER_ATTR, "")
                .with_attr("value", "de"),
            Element::new("p").with_id("plain").with_text("Untouched"),
        ])
    }

    // ==================== Element Tests ====================

    #[test]
    fn test_element_builders() {
        let element = Element::new("select")
            .with_id("switch")
            .with_attr(LANGUAGE_SWITCHER_ATTR, "")
            .with_attr("value", "en");

        assert_eq!(element.tag, "select");
        assert!(element.is_language_switcher());
        assert_eq!(element.value(), Some("en"));
        assert_eq!(element.translation_key(), None);
    }

    #[test]
    fn test_query_all() {
        let document = page();
        let ids: Vec<_> = document
            .query_all(I18N_KEY_ATTR)
            .filter_map(|e| e.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["hero-title", "name", "missing"]);
    }

    // ==================== apply_translations Tests ====================

    #[test]
    fn test_apply_rewrites_text_and_attributes() {
        let mut document = page();
        let (events, _rx) = broadcast::channel(4);

        apply_translations(&mut document, &english_translator(), &events);

        assert_eq!(document.get_by_id("hero-title").unwrap().text, "Play, rest, repeat");
        let input = document.get_by_id("name").unwrap();
        assert_eq!(input.attribute("placeholder"), Some("Your name"));
        assert_eq!(input.text, "");
        assert_eq!(document.get_by_id("plain").unwrap().text, "Untouched");
    }

    #[test]
    fn test_apply_empty_target_rewrites_text() {
        let mut document = Document::new(vec![Element::new("h1")
            .with_id("hero-title")
            .with_attr(I18N_KEY_ATTR, "hero.title")
            .with_attr(I18N_TARGET_ATTR, "")
            .with_text("old")]);
        let (events, _rx) = broadcast::channel(4);

        apply_translations(&mut document, &english_translator(), &events);

        let heading = document.get_by_id("hero-title").unwrap();
        assert_eq!(heading.text, "Play, rest, repeat");
        assert_eq!(heading.attribute(""), None);
    }

    #[test]
    fn test_apply_keeps_markup_for_missing_keys() {
        let mut document = page();
        let (events, _rx) = broadcast::channel(4);

        apply_translations(&mut document, &english_translator(), &events);

        assert_eq!(document.get_by_id("missing").unwrap().text, "Original markup");
    }

    #[test]
    fn test_apply_sets_lang_and_switchers() {
        let mut document = page();
        let (events, _rx) = broadcast::channel(4);

        apply_translations(&mut document, &english_translator(), &events);

        assert_eq!(document.lang(), "en");
        assert_eq!(document.get_by_id("lang-switch").unwrap().value(), Some("en"));
    }

    #[test]
    fn test_apply_broadcasts_language_changed() {
        let mut document = page();
        let (events, mut rx) = broadcast::channel(4);

        apply_translations(&mut document, &english_translator(), &events);

        let event = rx.try_recv().expect("Should receive event");
        assert_eq!(event.language, Language::fallback());
    }

    #[test]
    fn test_apply_without_subscribers() {
        let mut document = page();
        let (events, rx) = broadcast::channel(4);
        drop(rx);

        apply_translations(&mut document, &english_translator(), &events);
        assert_eq!(document.lang(), "en");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let translator = english_translator();
        let (events, _rx) = broadcast::channel(4);

        let mut once = page();
        apply_translations(&mut once, &translator, &events);
        let mut twice = page();
        apply_translations(&mut twice, &translator, &events);
        apply_translations(&mut twice, &translator, &events);

        assert_eq!(once.elements(), twice.elements());
        assert_eq!(once.lang(), twice.lang());
    }

    // ==================== Switcher Tests ====================

    #[test]
    fn test_change_switcher_sends_event() {
        let mut document = page();
        let (tx, mut rx) = mpsc::unbounded_channel();
        document.bind_switcher_events(tx);

        assert!(document.change_switcher("lang-switch", "it"));
        assert_eq!(document.get_by_id("lang-switch").unwrap().value(), Some("it"));
        assert_eq!(
            rx.try_recv().unwrap(),
            SwitcherChange {
                value: "it".to_string()
            }
        );
    }

    #[test]
    fn test_change_switcher_rejects_non_switcher() {
        let mut document = page();
        assert!(!document.change_switcher("plain", "it"));
        assert!(!document.change_switcher("nope", "it"));
    }

    #[test]
    fn test_change_switcher_unbound() {
        let mut document = page();
        assert!(document.change_switcher("lang-switch", "ru"));
    }
}
