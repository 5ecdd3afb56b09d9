//! Error types for loading datasets and resolving languages.

use thiserror::Error;

/// Failure while retrieving a dataset over the network.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be built, e.g. the location is not a valid URL.
    #[error("Invalid dataset request: {0}")]
    Request(#[source] reqwest::Error),

    /// The request never produced a response (connection, DNS, timeout).
    #[error("Failed to fetch dataset: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Error loading dataset: HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// The body was not a valid dataset document.
    #[error("Failed to parse dataset: {0}")]
    Parse(#[source] serde_json::Error),
}

impl FetchError {
    /// Transport errors, 5xx and 429 are worth another attempt; everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status { status } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            FetchError::Client(_) | FetchError::Request(_) | FetchError::Parse(_) => false,
        }
    }
}

/// Failure while reading or writing the dataset cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cached dataset is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Failed to serialize dataset for caching: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to persist cache entry: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// A requested language entry does not exist in the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("Default language not found")]
    DefaultNotFound,

    /// The code is kept for diagnostics; the message stays fixed.
    #[error("Language not found")]
    NotFound { code: String },
}

/// A selector the document cannot evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unsupported selector: '{0}'")]
    Unsupported(String),
}
