//! The i18n runtime: language switching, page application and startup.
//!
//! `I18n` is an explicitly constructed context. It owns the translator, the
//! dictionary loader, the preference store and the page, and is shared
//! behind an `Arc` with anything that needs to translate or switch language.

use crate::dom::{self, Document, LanguageChanged};
use crate::i18n::{
    DictionaryLoader, Language, LoadError, TranslationMetrics, TranslationSource, Translator,
};
use crate::storage::{PreferenceStore, LANGUAGE_STORAGE_KEY};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Capacity of the language-changed broadcast channel.
const EVENT_CAPACITY: usize = 16;

/// Options for [`I18n::set_language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetLanguageOptions {
    /// Store the chosen language so the next visit starts in it
    pub persist: bool,
}

impl Default for SetLanguageOptions {
    fn default() -> Self {
        Self { persist: true }
    }
}

/// What a language switch actually did.
///
/// Every variant leaves the page rendered in [`LanguageOutcome::language`];
/// the degraded variants say why that is not what was asked for.
#[derive(Debug)]
pub enum LanguageOutcome {
    /// The requested language is now active
    Applied { language: Language },

    /// The requested code is not supported; the fallback language was applied
    Unsupported { requested: String, language: Language },

    /// A dictionary failed to load; the fallback language is active with
    /// whatever dictionaries were already present
    LoadFailed {
        requested: Language,
        language: Language,
        error: LoadError,
    },
}

impl LanguageOutcome {
    /// The language the page is now shown in.
    pub fn language(&self) -> Language {
        match self {
            LanguageOutcome::Applied { language }
            | LanguageOutcome::Unsupported { language, .. }
            | LanguageOutcome::LoadFailed { language, .. } => *language,
        }
    }

    /// Whether the page ended up in a different language than requested.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, LanguageOutcome::Applied { .. })
    }
}

/// Translation context for one page.
pub struct I18n {
    translator: Translator,
    loader: DictionaryLoader,
    store: Arc<dyn PreferenceStore>,
    document: Mutex<Document>,
    events: broadcast::Sender<LanguageChanged>,
    switch_lock: tokio::sync::Mutex<()>,
    metrics: Arc<TranslationMetrics>,
}

impl I18n {
    pub fn new(
        source: TranslationSource,
        store: Arc<dyn PreferenceStore>,
        document: Document,
    ) -> Self {
        let metrics = Arc::new(TranslationMetrics::new());
        let loader = DictionaryLoader::new(source, metrics.clone());
        Self::with_loader(loader, metrics, store, document)
    }

    /// Build a runtime around an existing loader.
    ///
    /// `metrics` should be the same instance the loader records into.
    pub fn with_loader(
        loader: DictionaryLoader,
        metrics: Arc<TranslationMetrics>,
        store: Arc<dyn PreferenceStore>,
        document: Document,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            translator: Translator::new(metrics.clone()),
            loader,
            store,
            document: Mutex::new(document),
            events,
            switch_lock: tokio::sync::Mutex::new(()),
            metrics,
        }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// The current language.
    pub fn language(&self) -> Language {
        self.translator.language()
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    pub fn t_with(&self, key: &str, values: &[(&str, &str)]) -> String {
        self.translator.t_with(key, values)
    }

    /// Receive a [`LanguageChanged`] after every application of translations.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    /// Run a closure against the page.
    pub fn with_document<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut document = self.document.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut document)
    }

    /// Re-render every translatable element in the current language.
    pub fn apply_translations(&self) {
        let mut document = self.document.lock().unwrap_or_else(|e| e.into_inner());
        dom::apply_translations(&mut document, &self.translator, &self.events);
    }

    /// Switch to `candidate`, loading its dictionary if needed.
    ///
    /// Switches are serialized: a call made while another is in flight waits
    /// for it, so the last call made is the last one applied. Unsupported
    /// codes and load failures both end in the fallback language; neither is
    /// an `Err`, but the returned outcome reports them.
    pub async fn set_language(&self, candidate: &str, options: SetLanguageOptions) -> LanguageOutcome {
        let _guard = self.switch_lock.lock().await;

        let resolved = Language::resolve(candidate);
        let target = resolved.unwrap_or(Language::fallback());
        if resolved.is_none() {
            debug!(
                "[i18n] Unsupported language \"{}\", using \"{}\"",
                candidate,
                Language::fallback()
            );
        }

        if let Err(error) = self.load_dictionaries(target).await {
            warn!("[i18n] {}", error);
            self.translator.set_current(Language::fallback());
            self.apply_translations();
            return LanguageOutcome::LoadFailed {
                requested: target,
                language: Language::fallback(),
                error,
            };
        }

        self.translator.set_current(target);
        if options.persist {
            if let Err(e) = self.store.set(LANGUAGE_STORAGE_KEY, target.code()) {
                warn!("[i18n] Could not store language preference: {:#}", e);
            }
        }

        self.apply_translations();
        info!("Language set to {}", target.name());

        match resolved {
            Some(language) => LanguageOutcome::Applied { language },
            None => LanguageOutcome::Unsupported {
                requested: candidate.to_string(),
                language: target,
            },
        }
    }

    /// Pick the starting language and apply it.
    ///
    /// Priority: stored preference, then the first supported entry of
    /// `preferred_languages`, then the fallback. The choice is persisted only
    /// when no preference was stored yet.
    pub async fn initialize<S: AsRef<str>>(&self, preferred_languages: &[S]) -> LanguageOutcome {
        let stored = self
            .store
            .get(LANGUAGE_STORAGE_KEY)
            .and_then(|value| Language::resolve(&value));
        let preferred = Language::resolve_first(preferred_languages);
        let initial = stored.or(preferred).unwrap_or(Language::fallback());

        info!(
            "Initial language {} (stored: {:?}, preferred: {:?})",
            initial,
            stored.map(|l| l.code()),
            preferred.map(|l| l.code())
        );

        self.set_language(
            initial.code(),
            SetLanguageOptions {
                persist: stored.is_none(),
            },
        )
        .await
    }

    /// Listen for switcher changes on the page and switch language for each.
    ///
    /// The listener holds only a weak reference and stops once the runtime
    /// is dropped.
    pub fn bind_language_switchers(self: &Arc<Self>) -> JoinHandle<()> {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        self.with_document(|document| document.bind_switcher_events(sender));

        let runtime: Weak<I18n> = Arc::downgrade(self);
        tokio::spawn(async move {
            while let Some(change) = receiver.recv().await {
                let Some(runtime) = runtime.upgrade() else {
                    break;
                };
                runtime
                    .set_language(&change.value, SetLanguageOptions { persist: true })
                    .await;
            }
            debug!("Language switcher listener stopped");
        })
    }

    /// Bind the switchers, then initialize. This is the page-ready sequence.
    pub async fn start<S: AsRef<str>>(self: &Arc<Self>, preferred_languages: &[S]) -> LanguageOutcome {
        let _listener = self.bind_language_switchers();
        self.initialize(preferred_languages).await
    }

    async fn load_dictionaries(&self, target: Language) -> Result<(), LoadError> {
        if !self.translator.has_dictionary(Language::fallback()) {
            let fallback = self.loader.load(Language::fallback()).await?;
            self.translator.insert(Language::fallback(), fallback);
        }

        let dictionary = self.loader.load(target).await?;
        self.translator.insert(target, dictionary);
        Ok(())
    }
}
