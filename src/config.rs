use crate::loader::FetchOptions;
use crate::retry::RetryConfig;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Dataset
    pub dataset_url: String,
    pub fetch_attempts: u32,
    pub request_timeout: Option<Duration>,

    // Cache
    pub use_cache: bool,
    pub cache_dir: PathBuf,

    // Binary
    pub page_file: Option<PathBuf>,
    pub language: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Dataset
            dataset_url: std::env::var("LANGSWAP_DATASET_URL")
                .context("LANGSWAP_DATASET_URL not set")?,
            fetch_attempts: std::env::var("LANGSWAP_FETCH_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|attempts| *attempts > 0)
                .unwrap_or(1),
            request_timeout: std::env::var("LANGSWAP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),

            // Cache
            use_cache: match std::env::var("LANGSWAP_USE_CACHE") {
                Ok(v) => parse_bool(&v).context("LANGSWAP_USE_CACHE must be true or false")?,
                Err(_) => false,
            },
            cache_dir: std::env::var("LANGSWAP_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".langswap-cache")),

            // Binary
            page_file: std::env::var("LANGSWAP_PAGE_FILE").ok().map(PathBuf::from),
            language: std::env::var("LANGSWAP_LANGUAGE")
                .ok()
                .filter(|code| !code.trim().is_empty()),
        })
    }

    /// HTTP settings for the dataset fetcher.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.request_timeout,
            retry: if self.fetch_attempts > 1 {
                RetryConfig::dataset_fetch(self.fetch_attempts)
            } else {
                RetryConfig::single_attempt()
            },
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("invalid boolean '{}'", other),
    }
}
