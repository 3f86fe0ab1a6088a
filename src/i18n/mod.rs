//! Internationalization (i18n) module for the site's runtime translations.
//!
//! Pages are written with translation keys; at runtime the visitor's
//! language is negotiated, its JSON dictionaries are loaded and merged, and
//! every marked element on the page is rewritten.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages
//! - `language`: `Language` type and negotiation (`Language::resolve`)
//! - `dictionary`: Nested dictionaries, dotted-key lookup and deep merge
//! - `interpolate`: `{placeholder}` substitution
//! - `loader`: Fetching and caching base + page overlay dictionaries
//! - `engine`: `Translator`, lookups with fallback-language substitution
//! - `runtime`: `I18n`, language switching, page application and startup
//! - `validator`: Dictionary coverage checks against the fallback language
//! - `metrics`: Translation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use little_beans_site::i18n::{I18n, TranslationSource};
//!
//! let i18n = Arc::new(I18n::new(source, store, document));
//! i18n.start(&["it-IT", "en-US"]).await;
//! let title = i18n.t("hero.title");
//! ```

mod dictionary;
mod engine;
pub mod interpolate;
mod language;
mod loader;
mod metrics;
mod registry;
mod runtime;
mod validator;

pub use dictionary::Dictionary;
pub use engine::Translator;
pub use language::Language;
pub use loader::{base_resource, overlay_resource, DictionaryLoader, LoadError, TranslationSource};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use runtime::{I18n, LanguageOutcome, SetLanguageOptions};
pub use validator::{DictionaryValidator, ValidationReport};
