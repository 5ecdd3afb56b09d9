//! The language manager: loads a dataset, applies languages, announces both.
//!
//! A manager owns the document it localizes, the cache store, and the
//! fetcher. All operations take `&mut self`, so one manager runs at most one
//! load at a time; hosts that share a manager between tasks serialize access
//! themselves and the last load to finish wins.

use crate::cache::{CacheStore, CACHE_KEY};
use crate::document::Document;
use crate::error::{CacheError, LanguageError};
use crate::events::{EventBus, LanguageEvent};
use crate::i18n::{apply, DatasetValidator, LanguageSet, LoaderMetrics};
use crate::loader::DatasetFetcher;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Where [`LanguageManager::init`] got its dataset from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Fetched over the network
    Network,
    /// Read from the cache store; no request was made
    Cache,
    /// The fetch or cache read failed; the previous dataset is untouched
    Unavailable,
}

pub struct LanguageManager<D, S> {
    document: D,
    store: S,
    fetcher: DatasetFetcher,
    dataset: Arc<LanguageSet>,
    events: EventBus,
    metrics: LoaderMetrics,
}

impl<D: Document, S: CacheStore> LanguageManager<D, S> {
    pub fn new(document: D, store: S, fetcher: DatasetFetcher) -> Self {
        Self {
            document,
            store,
            fetcher,
            dataset: Arc::new(LanguageSet::default()),
            events: EventBus::default(),
            metrics: LoaderMetrics::new(),
        }
    }

    /// Publish on a shared bus instead of a private one.
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Load the dataset from `location` (or the cache) and apply the default language.
    ///
    /// With `use_cache`, a cached dataset is used as-is and no request is made;
    /// otherwise a successful fetch is written to the cache. Fetch and cache
    /// failures are logged and reported as [`InitOutcome::Unavailable`].
    ///
    /// # Errors
    /// `LanguageError::DefaultNotFound` if the loaded dataset has no default
    /// entry. The dataset is still replaced.
    pub async fn init(
        &mut self,
        location: &str,
        use_cache: bool,
    ) -> Result<InitOutcome, LanguageError> {
        info!(
            "Initializing languages from {} (cache {})",
            location,
            if use_cache { "enabled" } else { "disabled" }
        );

        let outcome = if use_cache {
            self.load_with_cache(location).await
        } else {
            self.load_from_network(location).await
        };

        if outcome != InitOutcome::Unavailable {
            self.apply_default()?;
        }
        Ok(outcome)
    }

    async fn load_from_network(&mut self, location: &str) -> InitOutcome {
        self.metrics.record_fetch();
        match self.fetcher.fetch(location).await {
            Ok(dataset) => {
                self.replace_dataset(dataset);
                self.events.publish(LanguageEvent::DatasetLoaded {
                    dataset: Arc::clone(&self.dataset),
                });
                InitOutcome::Network
            }
            Err(e) => {
                self.metrics.record_fetch_failure();
                error!("Error loading language dataset from {}: {}", location, e);
                InitOutcome::Unavailable
            }
        }
    }

    async fn load_with_cache(&mut self, location: &str) -> InitOutcome {
        match self.store.get(CACHE_KEY) {
            Ok(Some(cached)) => {
                return match LanguageSet::from_json(&cached) {
                    Ok(dataset) => {
                        self.metrics.record_cache_hit();
                        info!("Using cached language dataset");
                        self.replace_dataset(dataset);
                        InitOutcome::Cache
                    }
                    Err(e) => {
                        error!("{}", CacheError::Corrupt(e));
                        InitOutcome::Unavailable
                    }
                };
            }
            Ok(None) => {
                self.metrics.record_cache_miss();
                debug!("No cached language dataset");
            }
            Err(e) => {
                error!("Error reading language dataset cache: {}", e);
                return InitOutcome::Unavailable;
            }
        }

        let outcome = self.load_from_network(location).await;
        if outcome == InitOutcome::Network {
            if let Err(e) = self.write_cache() {
                warn!("Failed to cache language dataset: {}", e);
            }
        }
        outcome
    }

    fn write_cache(&mut self) -> Result<(), CacheError> {
        let json = self.dataset.to_json().map_err(CacheError::Serialize)?;
        self.store.set(CACHE_KEY, &json)
    }

    fn replace_dataset(&mut self, dataset: LanguageSet) {
        let report = DatasetValidator::validate(&dataset);
        for finding in &report.errors {
            warn!("Language dataset: {}", finding);
        }
        for finding in &report.warnings {
            debug!("Language dataset: {}", finding);
        }

        info!("Loaded {} language(s): {:?}", dataset.len(), dataset.codes());
        self.dataset = Arc::new(dataset);
    }

    /// Apply the default-flagged language and announce it with `LanguageLoaded`.
    ///
    /// Returns the applied code.
    pub fn apply_default(&mut self) -> Result<String, LanguageError> {
        let dataset = Arc::clone(&self.dataset);
        let entry = dataset.resolve_default()?;

        let report = apply(&mut self.document, &entry.data);
        self.metrics.record_language_applied();
        debug!("Applied default language '{}': {:?}", entry.code, report);

        self.events.publish(LanguageEvent::LanguageLoaded {
            code: entry.code.clone(),
        });
        Ok(entry.code.clone())
    }

    /// Apply the language with `code` and announce it with `LanguageChanged`.
    ///
    /// The default flag is not touched, so [`current_language_code`](Self::current_language_code)
    /// keeps reporting the default entry.
    pub fn set_language(&mut self, code: &str) -> Result<(), LanguageError> {
        let dataset = Arc::clone(&self.dataset);
        let entry = dataset.resolve_by_code(code)?;

        let report = apply(&mut self.document, &entry.data);
        self.metrics.record_language_applied();
        info!("Switched language to '{}'", code);
        debug!("Applied language '{}': {:?}", code, report);

        self.events.publish(LanguageEvent::LanguageChanged {
            code: code.to_string(),
        });
        Ok(())
    }

    /// Code of the default-flagged entry.
    pub fn current_language_code(&self) -> Result<&str, LanguageError> {
        self.dataset
            .resolve_default()
            .map(|entry| entry.code.as_str())
    }

    pub fn language_codes(&self) -> Vec<String> {
        self.dataset.codes()
    }

    /// Display names, parallel to [`language_codes`](Self::language_codes).
    pub fn language_names(&self) -> Vec<String> {
        self.dataset.names()
    }

    pub fn language_display_name(&self, code: &str) -> Result<&str, LanguageError> {
        self.dataset
            .resolve_by_code(code)
            .map(|entry| entry.lang.as_str())
    }

    pub fn dataset_version(&self) -> &'static str {
        crate::VERSION
    }

    /// The dataset currently held (empty until a load succeeds).
    pub fn raw_dataset(&self) -> &LanguageSet {
        &self.dataset
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LanguageEvent> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn metrics(&self) -> &LoaderMetrics {
        &self.metrics
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
