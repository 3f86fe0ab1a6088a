//! Dictionary loading: base dictionary plus optional page overlay.
//!
//! Each language has two JSON resources relative to the translation root:
//! `{code}.json` (required) and `pages/{code}.json` (optional). The overlay
//! is deep-merged on top of the base and the result is cached for the
//! lifetime of the loader.

use crate::i18n::{Dictionary, Language, TranslationMetrics};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};

/// Failure to load one dictionary resource.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{resource} is not valid JSON: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{resource} does not contain a JSON object")]
    NotAnObject { resource: String },
}

/// Where translation resources live.
#[derive(Debug, Clone)]
pub enum TranslationSource {
    /// Resources served over HTTP below this base URL
    Http { base_url: String },

    /// Resources on the local filesystem below this directory
    Directory(PathBuf),
}

impl TranslationSource {
    /// Human-readable location of a resource, used in logs and errors.
    pub fn locate(&self, resource: &str) -> String {
        match self {
            TranslationSource::Http { base_url } => {
                format!("{}/{}", base_url.trim_end_matches('/'), resource)
            }
            TranslationSource::Directory(root) => root.join(resource).display().to_string(),
        }
    }
}

/// Relative path of a language's base dictionary.
pub fn base_resource(language: Language) -> String {
    format!("{}.json", language.code())
}

/// Relative path of a language's page overlay.
pub fn overlay_resource(language: Language) -> String {
    format!("pages/{}.json", language.code())
}

/// Loads and caches merged dictionaries per language.
pub struct DictionaryLoader {
    source: TranslationSource,
    client: reqwest::Client,
    cache: Mutex<HashMap<Language, Dictionary>>,
    metrics: Arc<TranslationMetrics>,
}

impl DictionaryLoader {
    pub fn new(source: TranslationSource, metrics: Arc<TranslationMetrics>) -> Self {
        Self::with_client(source, reqwest::Client::new(), metrics)
    }

    /// Create a loader that reuses an existing HTTP client.
    pub fn with_client(
        source: TranslationSource,
        client: reqwest::Client,
        metrics: Arc<TranslationMetrics>,
    ) -> Self {
        Self {
            source,
            client,
            cache: Mutex::new(HashMap::new()),
            metrics,
        }
    }

    /// Load the merged dictionary for a language.
    ///
    /// Returns the cached copy when the language was loaded before. A failing
    /// base resource is an error; a failing overlay is logged and skipped.
    pub async fn load(&self, language: Language) -> Result<Dictionary, LoadError> {
        if let Some(cached) = self.cached(language) {
            debug!("Dictionary cache hit for {}", language);
            self.metrics.record_cache_hit();
            return Ok(cached);
        }

        let base_name = base_resource(language);
        let body = match self.fetch(&base_name).await {
            Ok(body) => body,
            Err(e) => {
                self.metrics.record_load_failure();
                return Err(e);
            }
        };
        let mut dictionary = match Dictionary::from_json(&base_name, &body) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                self.metrics.record_load_failure();
                return Err(e);
            }
        };

        let overlay_name = overlay_resource(language);
        match self.load_overlay(&overlay_name).await {
            Ok(overlay) => dictionary.merge(overlay),
            Err(e) => {
                self.metrics.record_overlay_failure();
                debug!("Skipping page overlay for {}: {}", language, e);
            }
        }

        self.metrics.record_dictionary_load();
        info!(
            "Loaded {} dictionary from {}",
            language.name(),
            self.source.locate(&base_name)
        );

        // A concurrent load may have filled the slot first; keep that copy.
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        Ok(cache.entry(language).or_insert(dictionary).clone())
    }

    /// Whether a language is already in the cache.
    pub fn is_cached(&self, language: Language) -> bool {
        self.cached(language).is_some()
    }

    fn cached(&self, language: Language) -> Option<Dictionary> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(&language).cloned()
    }

    async fn load_overlay(&self, resource: &str) -> Result<Dictionary, LoadError> {
        let body = self.fetch(resource).await?;
        Dictionary::from_json(resource, &body)
    }

    async fn fetch(&self, resource: &str) -> Result<String, LoadError> {
        match &self.source {
            TranslationSource::Http { .. } => {
                let url = self.source.locate(resource);
                let response = self
                    .client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|source| LoadError::Request {
                        url: url.clone(),
                        source,
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status { url, status });
                }

                response
                    .text()
                    .await
                    .map_err(|source| LoadError::Request { url, source })
            }
            TranslationSource::Directory(root) => {
                let path = root.join(resource);
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| LoadError::Io { path, source })
            }
        }
    }
}
