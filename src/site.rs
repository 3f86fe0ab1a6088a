//! The Little Beans landing page.
//!
//! Mirrors the markup of the published page: navigation, hero, planner,
//! testimonials and the join form, with the same ids and translation keys.

use crate::dom::{Document, Element, I18N_KEY_ATTR, I18N_TARGET_ATTR, LANGUAGE_SWITCHER_ATTR};
use crate::i18n::Language;
use crate::widgets::{join_form, planner, quotes};

/// Id of the language `<select>` in the page header.
pub const LANGUAGE_SWITCHER_ID: &str = "language-switcher";

fn translated(tag: &str, key: &str) -> Element {
    Element::new(tag).with_attr(I18N_KEY_ATTR, key)
}

fn vibe_option(value: &str) -> Element {
    translated("option", &format!("planner.vibes.{}", value))
        .with_attr("data-for", planner::VIBE_SELECT_ID)
        .with_attr("value", value)
}

/// Build the landing page as shipped, before any translation is applied.
pub fn landing_page() -> Document {
    let mut elements = vec![
        translated("title", "meta.title").with_text("Little Beans"),
        translated("meta", "meta.description")
            .with_attr(I18N_TARGET_ATTR, "content")
            .with_attr("name", "description"),
        Element::new("select")
            .with_id(LANGUAGE_SWITCHER_ID)
            .with_attr(LANGUAGE_SWITCHER_ATTR, "")
            .with_attr("value", Language::initial().code()),
        translated("a", "nav.planner").with_attr("href", "#planner"),
        translated("a", "nav.stories").with_attr("href", "#stories"),
        translated("a", "nav.join").with_attr("href", "#join"),
        translated("h1", "hero.title").with_id("hero-title"),
        translated("p", "hero.subtitle").with_id("hero-subtitle"),
        translated("h2", "planner.title").with_id("planner-title"),
        translated("label", "planner.kidsLabel").with_attr("for", planner::KIDS_INPUT_ID),
        Element::new("input")
            .with_id(planner::KIDS_INPUT_ID)
            .with_attr("type", "number")
            .with_attr("value", "1"),
        translated("label", "planner.hoursLabel").with_attr("for", planner::HOURS_INPUT_ID),
        Element::new("input")
            .with_id(planner::HOURS_INPUT_ID)
            .with_attr("type", "range")
            .with_attr("value", "2"),
        translated("label", "planner.vibeLabel").with_attr("for", planner::VIBE_SELECT_ID),
        Element::new("select")
            .with_id(planner::VIBE_SELECT_ID)
            .with_attr("value", "play"),
    ];

    elements.extend(["play", "quiet", "crafts"].map(vibe_option));

    elements.extend([
        Element::new("output").with_id(planner::HOURS_OUTPUT_ID),
        Element::new("output").with_id(planner::PRICE_OUTPUT_ID),
        Element::new("output").with_id(planner::VIBE_OUTPUT_ID),
        translated("h2", "testimonials.title").with_id("stories-title"),
        Element::new("blockquote")
            .with_id(quotes::QUOTE_TEXT_ID)
            .with_attr(quotes::CURRENT_ATTR, "0"),
        Element::new("cite").with_id(quotes::QUOTE_AUTHOR_ID),
        translated("button", "testimonials.next").with_id("new-quote"),
        translated("h2", "form.title").with_id("join-title"),
        translated("input", "form.namePlaceholder")
            .with_id(join_form::NAME_INPUT_ID)
            .with_attr(I18N_TARGET_ATTR, "placeholder")
            .with_attr("form", join_form::FORM_ID),
        translated("input", "form.emailPlaceholder")
            .with_id("email")
            .with_attr(I18N_TARGET_ATTR, "placeholder")
            .with_attr("form", join_form::FORM_ID),
        translated("button", "form.submit").with_attr("form", join_form::FORM_ID),
        Element::new("p").with_id(join_form::MESSAGE_ID),
    ]);

    Document::new(elements)
}
