//! Interactive page widgets.
//!
//! Widgets read their inputs from the page, compute display text through the
//! translator and write it back. They hold no translated text themselves, so
//! re-rendering after a language change is just calling `render` again.

pub mod join_form;
pub mod planner;
pub mod quotes;

use crate::dom::Document;
use crate::i18n::{I18n, Translator};
use std::sync::{Arc, Weak};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub use join_form::JoinForm;
pub use planner::{Planner, PlannerQuote, PlannerView};
pub use quotes::QuoteRotator;

/// Something on the page that renders translated output.
pub trait Widget: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Recompute and write this widget's output. Widgets whose elements are
    /// missing from the page do nothing.
    fn render(&self, translator: &Translator, document: &mut Document);
}

/// Render every widget once with the runtime's current language.
pub fn render_all(i18n: &I18n, widgets: &[Arc<dyn Widget>]) {
    i18n.with_document(|document| {
        for widget in widgets {
            widget.render(i18n.translator(), document);
        }
    });
}

/// Re-render `widgets` after every language change.
///
/// The task stops when the runtime is dropped.
pub fn spawn_rerender(i18n: &Arc<I18n>, widgets: Vec<Arc<dyn Widget>>) -> JoinHandle<()> {
    let mut events = i18n.subscribe();
    let runtime: Weak<I18n> = Arc::downgrade(i18n);

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let Some(i18n) = runtime.upgrade() else {
                        break;
                    };
                    debug!("Re-rendering {} widgets for {}", widgets.len(), event.language);
                    render_all(&i18n, &widgets);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Widget re-render lagged behind by {} language changes", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
