//! Network retrieval of language datasets.

use crate::error::FetchError;
use crate::i18n::LanguageSet;
use crate::retry::{with_retry_if, RetryConfig};
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client settings for dataset fetches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOptions {
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub retry: RetryConfig,
}

/// Fetches and parses dataset documents over HTTP.
#[derive(Debug, Clone)]
pub struct DatasetFetcher {
    client: reqwest::Client,
    retry: RetryConfig,
}

impl DatasetFetcher {
    /// Wrap an existing client.
    pub fn new(client: reqwest::Client, retry: RetryConfig) -> Self {
        Self { client, retry }
    }

    /// Build a client from `options`.
    pub fn from_options(options: &FetchOptions) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("langswap/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self::new(client, options.retry.clone()))
    }

    /// GET `location` and parse the body as a dataset document.
    ///
    /// Transport errors, 5xx and 429 responses are retried per the configured
    /// policy; any other non-success status or an unparsable body fails at once.
    pub async fn fetch(&self, location: &str) -> Result<LanguageSet, FetchError> {
        info!("Fetching language dataset from {}", location);

        let dataset = with_retry_if(
            &self.retry,
            &format!("Dataset fetch {}", location),
            || self.fetch_once(location),
            FetchError::is_retryable,
        )
        .await?;

        info!(
            "✓ Fetched {} language(s) from {}",
            dataset.len(),
            location
        );
        Ok(dataset)
    }

    async fn fetch_once(&self, location: &str) -> Result<LanguageSet, FetchError> {
        let response = self
            .client
            .get(location)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    FetchError::Request(e)
                } else {
                    FetchError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        debug!("Received {} bytes from {}", body.len(), location);

        serde_json::from_slice(&body).map_err(FetchError::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const DATASET: &str = r##"[
        {"code": "en", "lang": "English", "default": true,
         "data": {"title": {"selector": "#t", "type": "text", "content": "Hello"}}}
    ]"##;

    fn fetcher(max_attempts: u32) -> DatasetFetcher {
        DatasetFetcher::new(
            reqwest::Client::new(),
            RetryConfig::new(max_attempts, Duration::from_millis(10)),
        )
    }

    #[tokio::test]
    async fn test_fetch_parses_dataset() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lang.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DATASET))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dataset = fetcher(1)
            .fetch(&format!("{}/lang.json", mock_server.uri()))
            .await
            .expect("fetch should succeed");

        assert_eq!(dataset.codes(), vec!["en"]);
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lang.json"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = fetcher(3)
            .fetch(&format!("{}/lang.json", mock_server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status } if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_fetch_retries_server_errors() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lang.json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/lang.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DATASET))
            .mount(&mock_server)
            .await;

        let dataset = fetcher(3)
            .fetch(&format!("{}/lang.json", mock_server.uri()))
            .await
            .expect("should succeed after retries");

        assert_eq!(dataset.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_single_attempt_gives_up_on_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lang.json"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = fetcher(1)
            .fetch(&format!("{}/lang.json", mock_server.uri()))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_unparsable_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lang.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = fetcher(3)
            .fetch(&format!("{}/lang.json", mock_server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_invalid_location_is_not_retried() {
        let fetcher = DatasetFetcher::new(
            reqwest::Client::new(),
            RetryConfig::new(3, Duration::from_secs(30)),
        );

        let err = tokio::time::timeout(Duration::from_secs(5), fetcher.fetch("lang.json"))
            .await
            .expect("an invalid location should fail without backoff")
            .unwrap_err();

        assert!(matches!(err, FetchError::Request(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_options_with_timeout() {
        let options = FetchOptions {
            timeout: Some(Duration::from_secs(5)),
            retry: RetryConfig::dataset_fetch(2),
        };
        let fetcher = DatasetFetcher::from_options(&options).expect("client should build");
        assert_eq!(fetcher.retry.max_attempts, 2);
    }
}
