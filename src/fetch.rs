//! HTTP fetch client.
//!
//! Performs upstream GET requests with a fixed timeout, an identifying user
//! agent and redirect following. Successful responses are written through
//! to the shared [`TtlCache`]; freshness decisions belong to the cache.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::config::FetchConfig;
use crate::error::{DailyLogError, Result};
use crate::feed::{self, FeedItem};

/// Kind of payload requested from an upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    /// JSON document.
    Json,
    /// Plain text.
    Text,
    /// XML document (feeds).
    Xml,
}

impl FetchKind {
    /// Prefix used in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchKind::Json => "json",
            FetchKind::Text => "text",
            FetchKind::Xml => "xml",
        }
    }
}

/// A fetched upstream payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Text or XML body.
    Text(String),
    /// Parsed JSON body.
    Json(Value),
}

impl Payload {
    /// Check if the payload carries no content.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Text(text) => text.trim().is_empty(),
            Payload::Json(value) => value.is_null(),
        }
    }

    /// Consume the payload as text.
    pub fn into_text(self) -> String {
        match self {
            Payload::Text(text) => text,
            Payload::Json(value) => value.to_string(),
        }
    }

    /// Consume the payload as JSON.
    pub fn into_json(self) -> Result<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Text(text) => serde_json::from_str(&text)
                .map_err(|e| DailyLogError::Upstream(format!("invalid JSON: {}", e))),
        }
    }
}

/// Build the cache key for a fetch.
pub fn cache_key(kind: FetchKind, url: &str) -> String {
    format!("{}:{}", kind.as_str(), url)
}

/// Options for a single fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Timeout override; the client default is used when `None`.
    pub timeout: Option<Duration>,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
}

impl FetchOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Upstream fetch client with write-through caching.
pub struct FetchClient {
    client: Client,
    cache: Arc<TtlCache<Payload>>,
    timeout: Duration,
    short_timeout: Duration,
    max_body_bytes: u64,
}

impl FetchClient {
    /// Create a new fetch client writing through to `cache`.
    pub fn new(config: &FetchConfig, cache: Arc<TtlCache<Payload>>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DailyLogError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            cache,
            timeout: Duration::from_secs(config.timeout_secs),
            short_timeout: Duration::from_secs(config.short_timeout_secs),
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// The shared cache this client writes to.
    pub fn cache(&self) -> &Arc<TtlCache<Payload>> {
        &self.cache
    }

    /// Default request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Timeout for latency-sensitive callers.
    pub fn short_timeout(&self) -> Duration {
        self.short_timeout
    }

    /// Fetch `url` from the network and write the result through to the cache.
    ///
    /// No retries; any failure is reported as [`DailyLogError::Upstream`].
    pub async fn fetch(&self, url: &str, kind: FetchKind, options: &FetchOptions) -> Result<Payload> {
        let payload = self.download(url, kind, options).await?;
        self.cache.put_default(cache_key(kind, url), payload.clone());
        debug!(url = %url, kind = kind.as_str(), "fetched upstream payload");
        Ok(payload)
    }

    async fn download(&self, url: &str, kind: FetchKind, options: &FetchOptions) -> Result<Payload> {
        let parsed =
            url::Url::parse(url).map_err(|e| DailyLogError::Upstream(format!("invalid URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DailyLogError::Upstream(format!(
                "unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let response = self
            .client
            .get(parsed)
            .headers(build_headers(&options.headers)?)
            .timeout(options.timeout.unwrap_or(self.timeout))
            .send()
            .await
            .map_err(|e| DailyLogError::Upstream(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DailyLogError::Upstream(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_body_bytes {
                return Err(DailyLogError::Upstream(format!(
                    "response too large: {} bytes (max {} bytes)",
                    content_length, self.max_body_bytes
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DailyLogError::Upstream(format!("failed to read response: {}", e)))?;

        if bytes.len() as u64 > self.max_body_bytes {
            return Err(DailyLogError::Upstream(format!(
                "response too large: {} bytes (max {} bytes)",
                bytes.len(),
                self.max_body_bytes
            )));
        }

        let payload = decode_body(&bytes, kind)?;
        if payload.is_empty() {
            return Err(DailyLogError::Upstream("empty response body".to_string()));
        }
        Ok(payload)
    }

    /// Fetch with the cache in front of the network.
    ///
    /// Returns a fresh cached payload when present, otherwise fetches. When
    /// the fetch fails, an expired cached payload is served instead; the
    /// error is returned only when nothing was ever cached for the key.
    pub async fn fetch_cached(
        &self,
        url: &str,
        kind: FetchKind,
        options: &FetchOptions,
    ) -> Result<Payload> {
        self.fetch_decoded(url, kind, options, |payload| Ok(payload.clone()))
            .await
    }

    /// Like [`FetchClient::fetch_cached`], decoding the payload with `decode`.
    ///
    /// A fetched payload is written to the cache only once `decode` accepts
    /// it, so a well-formed error page never replaces the last good entry.
    /// A decode failure falls back to the stale entry like a network error.
    pub async fn fetch_decoded<T, F>(
        &self,
        url: &str,
        kind: FetchKind,
        options: &FetchOptions,
        decode: F,
    ) -> Result<T>
    where
        F: Fn(&Payload) -> Result<T>,
    {
        let key = cache_key(kind, url);
        if let Some(payload) = self.cache.get(&key) {
            match decode(&payload) {
                Ok(value) => {
                    debug!(key = %key, "cache hit");
                    return Ok(value);
                }
                Err(e) => warn!(key = %key, error = %e, "cached payload rejected, refetching"),
            }
        }

        let fetched = match self.download(url, kind, options).await {
            Ok(payload) => decode(&payload).map(|value| (payload, value)),
            Err(e) => Err(e),
        };

        match fetched {
            Ok((payload, value)) => {
                self.cache.put_default(key, payload);
                debug!(url = %url, kind = kind.as_str(), "fetched upstream payload");
                Ok(value)
            }
            Err(e) => match self.cache.get_stale_or_fresh(&key).map(|stale| decode(&stale)) {
                Some(Ok(value)) => {
                    warn!(key = %key, error = %e, "upstream failed, serving stale cache entry");
                    Ok(value)
                }
                _ => Err(e),
            },
        }
    }

    /// Fetch JSON through the cache.
    pub async fn json(&self, url: &str, options: &FetchOptions) -> Result<Value> {
        self.fetch_cached(url, FetchKind::Json, options)
            .await?
            .into_json()
    }

    /// Fetch text through the cache.
    pub async fn text(&self, url: &str, options: &FetchOptions) -> Result<String> {
        Ok(self
            .fetch_cached(url, FetchKind::Text, options)
            .await?
            .into_text())
    }

    /// Fetch and parse a feed through the cache.
    ///
    /// Only documents that parse as a feed are cached.
    pub async fn feed(&self, url: &str) -> Result<Vec<FeedItem>> {
        self.fetch_decoded(url, FetchKind::Xml, &FetchOptions::default(), |payload| {
            match payload {
                Payload::Text(xml) => feed::parse(xml),
                Payload::Json(_) => Err(DailyLogError::Parse("expected an XML document".to_string())),
            }
        })
        .await
    }
}

fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| DailyLogError::Validation(format!("invalid header name: {}", e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| DailyLogError::Validation(format!("invalid header value: {}", e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

fn decode_body(bytes: &[u8], kind: FetchKind) -> Result<Payload> {
    match kind {
        FetchKind::Json => serde_json::from_slice(bytes)
            .map(Payload::Json)
            .map_err(|e| DailyLogError::Upstream(format!("invalid JSON: {}", e))),
        FetchKind::Text | FetchKind::Xml => {
            Ok(Payload::Text(String::from_utf8_lossy(bytes).into_owned()))
        }
    }
}
