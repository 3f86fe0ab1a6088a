//! Waitlist sign-up form.
//!
//! The confirmation is produced once per submission; a later language change
//! leaves it as written.

use crate::dom::Document;
use crate::i18n::Translator;

pub const FORM_ID: &str = "join-form";
pub const NAME_INPUT_ID: &str = "name";
pub const MESSAGE_ID: &str = "form-message";

/// Handles submission of the join form.
#[derive(Debug, Default)]
pub struct JoinForm;

impl JoinForm {
    pub fn new() -> Self {
        Self
    }

    /// The confirmation shown after submitting with `name`.
    pub fn confirmation(translator: &Translator, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            translator.t("form.thanks")
        } else {
            translator.t_with("form.thanksNamed", &[("name", name)])
        }
    }

    /// Submit the form: show the confirmation and reset every field.
    ///
    /// Returns the message, or `None` when the page has no message element.
    pub fn submit(&self, translator: &Translator, document: &mut Document) -> Option<String> {
        document.get_by_id(MESSAGE_ID)?;

        let name = document
            .get_by_id(NAME_INPUT_ID)
            .and_then(|e| e.value())
            .unwrap_or_default()
            .to_string();
        let message = Self::confirmation(translator, &name);

        if let Some(output) = document.get_by_id_mut(MESSAGE_ID) {
            output.text = message.clone();
        }
        reset(document);

        Some(message)
    }
}

/// Clear the value of every field owned by the form.
fn reset(document: &mut Document) {
    let ids: Vec<String> = document
        .elements()
        .iter()
        .filter(|e| e.attribute("form") == Some(FORM_ID))
        .filter_map(|e| e.id.clone())
        .collect();

    for id in ids {
        if let Some(field) = document.get_by_id_mut(&id) {
            field.set_attribute("value", "");
        }
    }
}
