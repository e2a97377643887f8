//! Collector - joins endpoint paths onto the API base URL, fetches them
//! through the request fetcher and stores the raw payloads.

use anyhow::{Context, Result};
use rinkstat_core::Payload;
use rinkstat_fetch::RequestFetcher;
use rinkstat_store::{CollectorConfig, RawStore};
use std::path::PathBuf;
use tracing::{error, info};
use url::Url;

/// Fetches API endpoints and persists what they return.
#[derive(Debug)]
pub struct Collector {
    base_url: Url,
    fetcher: RequestFetcher,
    store: RawStore,
}

impl Collector {
    /// Creates a collector.
    ///
    /// A base URL without a trailing slash gets one, so that its last path
    /// segment survives joining.
    pub fn new(base_url: &str, fetcher: RequestFetcher, store: RawStore) -> Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).with_context(|| format!("Invalid base URL: {base_url}"))?;

        Ok(Self {
            base_url,
            fetcher,
            store,
        })
    }

    /// Creates a collector with the production fetcher.
    pub fn from_config(config: &CollectorConfig) -> Result<Self> {
        let fetcher = RequestFetcher::new(config.to_fetch_settings())
            .context("Failed to build request fetcher")?;
        Self::new(&config.base_url, fetcher, RawStore::new(&config.data_dir))
    }

    /// The base URL endpoint paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The store payloads are saved to.
    pub fn store(&self) -> &RawStore {
        &self.store
    }

    /// Resolves an endpoint path against the base URL.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid endpoint: {path}"))
    }

    /// Fetches an endpoint.
    ///
    /// A fetch failure comes back as the error, with the
    /// [`FetchFailure`](rinkstat_core::FetchFailure) available through
    /// `downcast_ref`.
    pub async fn fetch(&mut self, path: &str) -> Result<Payload> {
        let url = self.endpoint_url(path)?;
        let outcome = self.fetcher.fetch(url.as_str()).await;
        let attempts = outcome.attempts_count();

        match outcome.into_result() {
            Ok(payload) => {
                info!(endpoint = %path, attempts, "Fetched endpoint");
                Ok(payload)
            }
            Err(failure) => {
                error!(endpoint = %path, attempts, error = %failure, "Fetch failed");
                Err(anyhow::Error::new(failure).context(format!("Failed to fetch {url}")))
            }
        }
    }

    /// Fetches an endpoint and saves the payload under `name`, or under the
    /// endpoint path when no name is given. Returns the saved file path.
    pub async fn collect(&mut self, path: &str, name: Option<&str>) -> Result<PathBuf> {
        let payload = self.fetch(path).await?;
        let name = name.unwrap_or(path);
        let saved = self
            .store
            .save(name, &payload)
            .await
            .with_context(|| format!("Failed to save {path}"))?;
        Ok(saved)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rinkstat_core::FetchFailure;
    use rinkstat_fetch::{MemorySink, Transport, TransportError, TransportResponse};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Answers every request with the same status and body, recording URLs.
    struct FixedTransport {
        status: u16,
        body: &'static str,
        urls: Mutex<Vec<String>>,
    }

    impl FixedTransport {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                urls: Mutex::new(Vec::new()),
            })
        }

        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn get(
            &self,
            url: &str,
            _timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(TransportResponse::new(self.status, self.body))
        }
    }

    fn collector(transport: Arc<FixedTransport>, root: &std::path::Path) -> Collector {
        let fetcher = RequestFetcher::builder()
            .rate_limit(10.0)
            .transport(transport)
            .sink(Arc::new(MemorySink::new()))
            .build()
            .unwrap();
        Collector::new("https://api-web.nhle.com/v1", fetcher, RawStore::new(root)).unwrap()
    }

    #[test]
    fn test_endpoint_url_joins_onto_base() {
        let temp_dir = TempDir::new().unwrap();
        let collector = collector(FixedTransport::new(200, "{}"), temp_dir.path());

        assert_eq!(collector.base_url().as_str(), "https://api-web.nhle.com/v1/");
        assert_eq!(
            collector.endpoint_url("standings/now").unwrap().as_str(),
            "https://api-web.nhle.com/v1/standings/now"
        );
        assert_eq!(
            collector.endpoint_url("/roster/TOR/20232024").unwrap().as_str(),
            "https://api-web.nhle.com/v1/roster/TOR/20232024"
        );
        assert_eq!(
            collector.endpoint_url("schedule?date=2024-01-01").unwrap().as_str(),
            "https://api-web.nhle.com/v1/schedule?date=2024-01-01"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let fetcher = RequestFetcher::builder()
            .transport(FixedTransport::new(200, "{}"))
            .build()
            .unwrap();
        assert!(Collector::new("not a url", fetcher, RawStore::new("unused")).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_saves_payload() {
        let temp_dir = TempDir::new().unwrap();
        let transport = FixedTransport::new(200, r#"{"standings": [{"points": 102}]}"#);
        let mut collector = collector(transport.clone(), temp_dir.path());

        let path = collector.collect("standings/now", None).await.unwrap();

        assert_eq!(path, temp_dir.path().join("standings_now.json"));
        assert_eq!(
            transport.urls(),
            vec!["https://api-web.nhle.com/v1/standings/now".to_string()]
        );
        assert_eq!(
            collector.store().load("standings/now").await.unwrap(),
            json!({"standings": [{"points": 102}]})
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_uses_explicit_name() {
        let temp_dir = TempDir::new().unwrap();
        let mut collector = collector(FixedTransport::new(200, "[]"), temp_dir.path());

        let path = collector.collect("club-stats/TOR/now", Some("leafs")).await.unwrap();
        assert_eq!(path, temp_dir.path().join("leafs.json"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_is_downcastable() {
        let temp_dir = TempDir::new().unwrap();
        let mut collector = collector(FixedTransport::new(404, "not found"), temp_dir.path());

        let err = collector.fetch("player/0/landing").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<FetchFailure>(),
            Some(&FetchFailure::HttpClientError { status: 404 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_collect_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("raw");
        let mut collector = collector(FixedTransport::new(200, "<html>"), &root);

        let err = collector.collect("teams", None).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FetchFailure>(),
            Some(FetchFailure::MalformedResponse { .. })
        ));
        assert!(!root.exists());
    }
}
