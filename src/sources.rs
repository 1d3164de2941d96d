// Data acquisition for the dashboard: a caching upstream client plus an
// ordered list of data-source strategies. The chain is tried strictly in
// order, one attempt per source, and ends at the bundled demo fixture, so
// acquisition as a whole cannot fail.

use bytes::Bytes;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::mock;
use crate::models::TransportationData;

pub const UPSTREAM_URL: &str =
    "https://amanabootcamp.org/api/fs-classwork-data/amana-transportation";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CACHE_TTL: Duration = Duration::from_secs(30);

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum FetchError {
    Network(String),
    Status(u16),
    Parse(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(e) => write!(f, "Network error: {}", e),
            FetchError::Status(code) => write!(f, "HTTP error! status: {}", code),
            FetchError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

pub type Result<T> = std::result::Result<T, FetchError>;

// ============================================================================
// Upstream client with short-lived response cache
// ============================================================================

struct CachedBody {
    fetched_at: Instant,
    body: Bytes,
}

/// HTTP client for the upstream transportation API. `fetch_cached` is the
/// proxy path: fixed request headers plus a ~30 second body cache holding the
/// verbatim upstream bytes. `fetch_direct` is the bare secondary request with
/// no custom headers and no caching.
pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
    cache: Mutex<Option<CachedBody>>,
}

impl UpstreamClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(UpstreamClient {
            client,
            url: url.into(),
            cache: Mutex::new(None),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn cached_body(&self) -> Option<Bytes> {
        let guard = self.cache.lock().ok()?;
        guard
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < CACHE_TTL)
            .map(|cached| cached.body.clone())
    }

    fn store_body(&self, body: Bytes) {
        if let Ok(mut guard) = self.cache.lock() {
            *guard = Some(CachedBody {
                fetched_at: Instant::now(),
                body,
            });
        }
    }

    pub async fn fetch_cached(&self) -> Result<Bytes> {
        if let Some(body) = self.cached_body() {
            return Ok(body);
        }

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("User-Agent", "Mozilla/5.0 (compatible; TransportationApp/1.0)")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        self.store_body(body.clone());
        Ok(body)
    }

    pub async fn fetch_direct(&self) -> Result<Bytes> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

// ============================================================================
// Fallback chain
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    Api,
    Mock,
}

#[derive(Debug, Clone, Copy)]
pub enum DataSource {
    Proxy,
    Upstream,
    Mock,
}

/// The ordered fallback policy: cached proxy path first, bare upstream
/// request second, bundled fixture last.
pub const SOURCE_ORDER: [DataSource; 3] = [DataSource::Proxy, DataSource::Upstream, DataSource::Mock];

impl DataSource {
    pub fn name(&self) -> &'static str {
        match self {
            DataSource::Proxy => "proxy",
            DataSource::Upstream => "upstream",
            DataSource::Mock => "mock",
        }
    }

    pub fn origin(&self) -> DataOrigin {
        match self {
            DataSource::Mock => DataOrigin::Mock,
            _ => DataOrigin::Api,
        }
    }

    pub async fn fetch(&self, upstream: &UpstreamClient) -> Result<TransportationData> {
        match self {
            DataSource::Proxy => parse_body(&upstream.fetch_cached().await?),
            DataSource::Upstream => parse_body(&upstream.fetch_direct().await?),
            DataSource::Mock => Ok(mock::mock_data()),
        }
    }
}

fn parse_body(body: &[u8]) -> Result<TransportationData> {
    serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Run the fallback chain and return the first dataset obtained, together
/// with where it came from. Each source is attempted exactly once, in order,
/// with no retries; the mock tail makes the whole sequence total.
pub async fn acquire(upstream: &UpstreamClient) -> (TransportationData, DataOrigin) {
    for source in SOURCE_ORDER {
        match source.fetch(upstream).await {
            Ok(data) => {
                if source.origin() == DataOrigin::Mock {
                    eprintln!("⚠️  API unavailable, using mock data");
                } else {
                    println!("✓ Transportation data loaded via {} source", source.name());
                }
                return (data, source.origin());
            }
            Err(e) => {
                eprintln!("⚠️  {} source failed: {}", source.name(), e);
            }
        }
    }

    // Unreachable in practice: the mock source is infallible.
    (mock::mock_data(), DataOrigin::Mock)
}

// ============================================================================
// Tests
// ============================================================================
