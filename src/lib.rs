//! Load a JSON language dataset and apply localized content to a document.
//!
//! A dataset is an ordered list of languages, each mapping field keys to
//! descriptors (`selector`, `type`, `content`). [`LanguageManager`] fetches the
//! dataset (optionally through a persistent cache), applies the default
//! language, switches languages on request, and broadcasts lifecycle events.
//!
//! ```rust,ignore
//! use langswap::{DatasetFetcher, FetchOptions, FileStore, LanguageManager, MemoryDocument};
//!
//! let fetcher = DatasetFetcher::from_options(&FetchOptions::default())?;
//! let mut manager = LanguageManager::new(page, FileStore::new(".cache"), fetcher);
//! manager.init("https://example.com/lang.json", true).await?;
//! manager.set_language("fr")?;
//! ```

pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod i18n;
pub mod loader;
pub mod manager;
pub mod retry;
pub mod selector;

/// Dataset format version reported by [`LanguageManager::dataset_version`].
pub const VERSION: &str = "1.1";

pub use cache::{CacheStore, FileStore, MemoryStore, CACHE_KEY};
pub use document::{Document, Element, MemoryDocument, NodeId, Property};
pub use error::{CacheError, FetchError, LanguageError, SelectorError};
pub use events::{EventBus, LanguageEvent};
pub use i18n::{LanguageEntry, LanguageSet};
pub use loader::{DatasetFetcher, FetchOptions};
pub use manager::{InitOutcome, LanguageManager};
