//! Loader metrics.
//!
//! Tracks how datasets were obtained and how often languages were applied.
//! Each manager owns its own counters and updates them through `&mut self`.

use serde::Serialize;

/// Counters for one language manager.
#[derive(Debug, Default)]
pub struct LoaderMetrics {
    /// Number of loads served from the cache
    cache_hits: usize,

    /// Number of cache lookups that found nothing
    cache_misses: usize,

    /// Number of network fetches started
    fetches: usize,

    /// Number of network fetches that failed
    fetch_failures: usize,

    /// Number of language entries applied to the document
    languages_applied: usize,
}

impl LoaderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a load served from the cache.
    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    /// Record a cache lookup that found nothing.
    pub fn record_cache_miss(&mut self) {
        self.cache_misses += 1;
    }

    /// Record a network fetch.
    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    /// Record a failed network fetch.
    pub fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }

    /// Record a language being applied.
    pub fn record_language_applied(&mut self) {
        self.languages_applied += 1;
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses
    }

    pub fn fetches(&self) -> usize {
        self.fetches
    }

    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures
    }

    pub fn languages_applied(&self) -> usize {
        self.languages_applied
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        let fetches = self.fetches();
        let failures = self.fetch_failures();
        let fetch_success_rate = if fetches > 0 {
            (fetches.saturating_sub(failures) as f64 / fetches as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            fetches,
            fetch_failures: failures,
            fetch_success_rate,
            languages_applied: self.languages_applied(),
        }
    }
}

/// Snapshot of loader statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub fetches: usize,
    pub fetch_failures: usize,

    /// Fetch success rate as a percentage (0-100)
    pub fetch_success_rate: f64,

    pub languages_applied: usize,
}
