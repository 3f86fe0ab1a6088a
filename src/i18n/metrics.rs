//! Translation metrics and observability module.
//!
//! Counters for lookups, fallbacks, missing keys and dictionary loads. Each
//! `I18n` runtime owns its own `TranslationMetrics`, so two runtimes in one
//! process (or two tests) never share counts.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Translation counters for one runtime.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of `t` calls
    lookups: AtomicUsize,

    /// Number of lookups answered by the fallback dictionary
    fallback_hits: AtomicUsize,

    /// Number of lookups that found no translation at all
    missing_keys: AtomicUsize,

    /// Number of dictionaries fetched from the source
    dictionary_loads: AtomicUsize,

    /// Number of dictionary requests answered from the in-memory cache
    cache_hits: AtomicUsize,

    /// Number of base dictionary loads that failed
    load_failures: AtomicUsize,

    /// Number of page overlays that could not be loaded
    overlay_failures: AtomicUsize,
}

impl TranslationMetrics {
    /// Create a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback_hit(&self) {
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_key(&self) {
        self.missing_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionary_load(&self) {
        self.dictionary_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_overlay_failure(&self) {
        self.overlay_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    pub fn dictionary_loads(&self) -> usize {
        self.dictionary_loads.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    pub fn overlay_failures(&self) -> usize {
        self.overlay_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let fallback_hits = self.fallback_hits();
        let missing_keys = self.missing_keys();
        let fallback_rate = if lookups > 0 {
            ((fallback_hits + missing_keys) as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            fallback_hits,
            missing_keys,
            fallback_rate,
            dictionary_loads: self.dictionary_loads(),
            cache_hits: self.cache_hits(),
            load_failures: self.load_failures(),
            overlay_failures: self.overlay_failures(),
        }
    }
}

/// Metrics report containing current translation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,
    pub fallback_hits: usize,
    pub missing_keys: usize,

    /// Share of lookups not answered by the current language, as a percentage (0-100)
    pub fallback_rate: f64,

    pub dictionary_loads: usize,
    pub cache_hits: usize,
    pub load_failures: usize,
    pub overlay_failures: usize,
}
