//! Visit planner: estimates the price of a playroom visit.

use crate::dom::Document;
use crate::i18n::Translator;
use crate::widgets::Widget;

pub const KIDS_INPUT_ID: &str = "plan-kids";
pub const HOURS_INPUT_ID: &str = "plan-hours";
pub const VIBE_SELECT_ID: &str = "plan-vibe";
pub const HOURS_OUTPUT_ID: &str = "hours-output";
pub const PRICE_OUTPUT_ID: &str = "price-output";
pub const VIBE_OUTPUT_ID: &str = "vibe-output";

/// Price per child per hour, in dollars.
pub const BASE_PRICE: f64 = 13.0;

/// Discount per additional sibling, in dollars.
pub const SIBLING_DISCOUNT: f64 = 2.0;

/// No visit costs less than this.
pub const MINIMUM_TOTAL: f64 = 18.0;

/// A priced visit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerQuote {
    pub kids: f64,
    pub hours: f64,
    pub total: f64,
}

impl PlannerQuote {
    /// Price a visit from the raw form values.
    ///
    /// A kids value that is empty, non-numeric or zero counts as one child.
    /// An hours value that is empty or non-numeric counts as zero hours,
    /// which leaves the minimum total.
    pub fn from_inputs(kids: &str, hours: &str) -> Self {
        let kids = match kids.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value != 0.0 => value,
            _ => 1.0,
        };
        let hours = hours
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0);

        Self::new(kids, hours)
    }

    pub fn new(kids: f64, hours: f64) -> Self {
        let discount = if kids > 1.0 {
            (kids - 1.0) * SIBLING_DISCOUNT
        } else {
            0.0
        };
        let total = (kids * hours * BASE_PRICE - discount).max(MINIMUM_TOTAL);

        Self { kids, hours, total }
    }

    /// Total formatted as dollars with cents, e.g. `$37.00`.
    ///
    /// Half-cent ties round up.
    pub fn price_text(&self) -> String {
        let cents = (self.total * 100.0).round() / 100.0;
        format!("${:.2}", cents)
    }
}

/// Display strings for the planner's outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerView {
    pub hours_text: String,
    pub price_text: String,
    pub vibe_text: String,
}

impl PlannerView {
    pub fn build(quote: &PlannerQuote, vibe_label: &str, translator: &Translator) -> Self {
        let hours = quote.hours.to_string();
        Self {
            hours_text: translator.t_with("planner.hoursValue", &[("hours", &hours)]),
            price_text: quote.price_text(),
            vibe_text: translator.t_with("planner.vibeValue", &[("vibe", vibe_label)]),
        }
    }
}

/// The planner widget.
#[derive(Debug, Default)]
pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self
    }

    /// Compute the view from the page's current input values.
    ///
    /// Returns `None` when any of the three inputs is missing from the page.
    pub fn view(&self, translator: &Translator, document: &Document) -> Option<PlannerView> {
        let kids = document.get_by_id(KIDS_INPUT_ID)?;
        let hours = document.get_by_id(HOURS_INPUT_ID)?;
        let vibe = document.get_by_id(VIBE_SELECT_ID)?;

        let quote = PlannerQuote::from_inputs(
            kids.value().unwrap_or_default(),
            hours.value().unwrap_or_default(),
        );
        let vibe_label = selected_option_label(document, VIBE_SELECT_ID, vibe.value());

        Some(PlannerView::build(&quote, &vibe_label, translator))
    }
}

impl Widget for Planner {
    fn name(&self) -> &'static str {
        "planner"
    }

    fn render(&self, translator: &Translator, document: &mut Document) {
        let Some(view) = self.view(translator, document) else {
            return;
        };

        if let Some(output) = document.get_by_id_mut(HOURS_OUTPUT_ID) {
            output.text = view.hours_text;
        }
        if let Some(output) = document.get_by_id_mut(PRICE_OUTPUT_ID) {
            output.text = view.price_text;
        }
        if let Some(output) = document.get_by_id_mut(VIBE_OUTPUT_ID) {
            output.text = view.vibe_text;
        }
    }
}

/// Text of the `<option>` belonging to `select_id` whose value is selected.
///
/// Options are linked to their select with a `data-for` attribute. With no
/// value selected the first option wins, as in a browser.
fn selected_option_label(document: &Document, select_id: &str, selected: Option<&str>) -> String {
    let mut options = document
        .elements()
        .iter()
        .filter(|e| e.tag == "option" && e.attribute("data-for") == Some(select_id));

    let chosen = match selected {
        Some(value) => options.find(|e| e.value() == Some(value)),
        None => options.next(),
    };

    chosen.map(|e| e.text.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, I18N_KEY_ATTR};
    use crate::i18n::{Dictionary, Language, TranslationMetrics};
    use serde_json::json;
    use std::sync::Arc;

    fn translator() -> Translator {
        let translator = Translator::new(Arc::new(TranslationMetrics::new()));
        translator.insert(
            Language::fallback(),
            Dictionary::try_from(json!({
                "planner": {
                    "hoursValue": "{hours} hours",
                    "vibeValue": "You'll probably enjoy: {vibe}"
                }
            }))
            .unwrap(),
        );
        translator.set_current(Language::fallback());
        translator
    }

    fn page(kids: &str, hours: &str, vibe: &str) -> Document {
        Document::new(vec![
            Element::new("input").with_id(KIDS_INPUT_ID).with_attr("value", kids),
            Element::new("input").with_id(HOURS_INPUT_ID).with_attr("value", hours),
            Element::new("select").with_id(VIBE_SELECT_ID).with_attr("value", vibe),
            Element::new("option")
                .with_attr("data-for", VIBE_SELECT_ID)
                .with_attr("value", "quiet")
                .with_attr(I18N_KEY_ATTR, "planner.vibes.quiet")
                .with_text("Quiet zone"),
            Element::new("option")
                .with_attr("data-for", VIBE_SELECT_ID)
                .with_attr("value", "play")
                .with_text("Play gym"),
            Element::new("output").with_id(HOURS_OUTPUT_ID),
            Element::new("output").with_id(PRICE_OUTPUT_ID),
            Element::new("output").with_id(VIBE_OUTPUT_ID),
        ])
    }

    // ==================== Pricing Tests ====================

    #[test]
    fn test_single_child_price() {
        let quote = PlannerQuote::new(1.0, 2.0);
        assert_eq!(quote.total, 26.0);
        assert_eq!(quote.price_text(), "$26.00");
    }

    #[test]
    fn test_sibling_discount() {
        // 3 kids * 2 hours * 13 = 78, minus (3 - 1) * 2 = 74
        let quote = PlannerQuote::new(3.0, 2.0);
        assert_eq!(quote.total, 74.0);
    }

    #[test]
    fn test_minimum_total() {
        let quote = PlannerQuote::new(1.0, 1.0);
        assert_eq!(quote.total, 18.0);
        assert_eq!(PlannerQuote::new(2.0, 0.0).price_text(), "$18.00");
    }

    #[test]
    fn test_fractional_hours() {
        let quote = PlannerQuote::new(1.0, 2.5);
        assert_eq!(quote.price_text(), "$32.50");
    }

    #[test]
    fn test_half_cent_rounds_up() {
        let quote = PlannerQuote::from_inputs("1", "1.625");
        assert_eq!(quote.total, 21.125);
        assert_eq!(quote.price_text(), "$21.13");
    }

    #[test]
    fn test_from_inputs_defaults() {
        assert_eq!(PlannerQuote::from_inputs("", "3").kids, 1.0);
        assert_eq!(PlannerQuote::from_inputs("abc", "3").kids, 1.0);
        assert_eq!(PlannerQuote::from_inputs("0", "3").kids, 1.0);
        assert_eq!(PlannerQuote::from_inputs(" 2 ", "3").kids, 2.0);
        assert_eq!(PlannerQuote::from_inputs("2", "").hours, 0.0);
        assert_eq!(PlannerQuote::from_inputs("2", "lots").hours, 0.0);
    }

    // ==================== View Tests ====================

    #[test]
    fn test_view_translates_outputs() {
        let document = page("2", "3", "play");
        let view = Planner::new()
            .view(&translator(), &document)
            .expect("All inputs present");

        assert_eq!(view.hours_text, "3 hours");
        // 2 * 3 * 13 - 2 = 76
        assert_eq!(view.price_text, "$76.00");
        assert_eq!(view.vibe_text, "You'll probably enjoy: Play gym");
    }

    #[test]
    fn test_view_without_selection_uses_first_option() {
        let mut document = page("1", "2", "");
        document
            .get_by_id_mut(VIBE_SELECT_ID)
            .unwrap()
            .attributes
            .remove("value");

        let view = Planner::new().view(&translator(), &document).unwrap();
        assert_eq!(view.vibe_text, "You'll probably enjoy: Quiet zone");
    }

    #[test]
    fn test_view_missing_inputs() {
        let document = Document::new(vec![Element::new("input").with_id(KIDS_INPUT_ID)]);
        assert_eq!(Planner::new().view(&translator(), &document), None);
    }

    #[test]
    fn test_render_writes_outputs() {
        let mut document = page("1", "2", "quiet");
        Planner::new().render(&translator(), &mut document);

        assert_eq!(document.get_by_id(HOURS_OUTPUT_ID).unwrap().text, "2 hours");
        assert_eq!(document.get_by_id(PRICE_OUTPUT_ID).unwrap().text, "$26.00");
        assert_eq!(
            document.get_by_id(VIBE_OUTPUT_ID).unwrap().text,
            "You'll probably enjoy: Quiet zone"
        );
    }
}
