//! Testimonial rotator.
//!
//! Testimonials live in the dictionary as `testimonials.items.<n>.quote` and
//! `testimonials.items.<n>.author`. The page remembers which one is showing
//! in the quote element's `data-testimonial` attribute.

use crate::dom::Document;
use crate::i18n::Translator;
use crate::widgets::Widget;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

pub const QUOTE_TEXT_ID: &str = "quote-text";
pub const QUOTE_AUTHOR_ID: &str = "quote-author";
pub const CURRENT_ATTR: &str = "data-testimonial";

/// Number of testimonials shipped in the dictionaries.
pub const DEFAULT_TESTIMONIAL_COUNT: usize = 3;

pub fn quote_key(index: usize) -> String {
    format!("testimonials.items.{}.quote", index)
}

pub fn author_key(index: usize) -> String {
    format!("testimonials.items.{}.author", index)
}

/// Picks a different testimonial on every click.
pub struct QuoteRotator<R = SmallRng> {
    count: usize,
    rng: Mutex<R>,
}

impl QuoteRotator<SmallRng> {
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, SmallRng::from_os_rng())
    }
}

impl<R: Rng> QuoteRotator<R> {
    pub fn with_rng(count: usize, rng: R) -> Self {
        Self {
            count,
            rng: Mutex::new(rng),
        }
    }

    /// Show a random testimonial other than the one currently displayed.
    ///
    /// Testimonials whose translated quote equals the displayed text are
    /// skipped; if that rules out all of them, any may be picked. Returns the
    /// chosen index, or `None` when the page has no quote element or there
    /// are no testimonials.
    pub fn next(&self, translator: &Translator, document: &mut Document) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let current = document.get_by_id(QUOTE_TEXT_ID)?.text.clone();

        let mut options: Vec<usize> = (0..self.count)
            .filter(|&index| translator.t(&quote_key(index)) != current)
            .collect();
        if options.is_empty() {
            options = (0..self.count).collect();
        }

        let pick = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            options[rng.random_range(0..options.len())]
        };

        show(translator, document, pick);
        Some(pick)
    }
}

impl<R: Rng + Send> Widget for QuoteRotator<R> {
    fn name(&self) -> &'static str {
        "quotes"
    }

    /// Re-translate whichever testimonial is showing.
    fn render(&self, translator: &Translator, document: &mut Document) {
        let Some(index) = document
            .get_by_id(QUOTE_TEXT_ID)
            .and_then(|e| e.attribute(CURRENT_ATTR))
            .and_then(|raw| raw.parse::<usize>().ok())
        else {
            return;
        };
        show(translator, document, index);
    }
}

fn show(translator: &Translator, document: &mut Document, index: usize) {
    if let Some(quote) = document.get_by_id_mut(QUOTE_TEXT_ID) {
        quote.text = translator.t(&quote_key(index));
        quote.set_attribute(CURRENT_ATTR, &index.to_string());
    }
    if let Some(author) = document.get_by_id_mut(QUOTE_AUTHOR_ID) {
        author.text = translator.t(&author_key(index));
    }
}
