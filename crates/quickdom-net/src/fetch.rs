//! Blocking HTTP fetch for documents and media.
//!
//! Wraps a single [`reqwest::blocking::Client`] configured once per
//! [`Fetcher`]: browser-like User-Agent, a request timeout, redirects
//! followed, and (matching the reference deployment's deliberately
//! permissive default) optional acceptance of invalid TLS certificates.
//!
//! TODO: Implement proper Fetch Standard (<https://fetch.spec.whatwg.org/>)

use crate::cache::ResourceCache;
use quickdom_common::url::resolve_url;
use quickdom_common::warning::warn_once;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// A failed fetch. Callers treat every variant as "no content"; nothing
/// here aborts a page load.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// DNS, connect, TLS, or timeout failure.
    #[error("request for '{url}' failed: {source}")]
    Transport {
        /// The URL that was being fetched.
        url: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP error {status} for '{url}'")]
    Status {
        /// The URL that was being fetched.
        url: String,
        /// The response status code.
        status: reqwest::StatusCode,
    },

    /// The response body could not be read or decoded.
    #[error("failed to read response body from '{url}': {source}")]
    Body {
        /// The URL whose body failed to read.
        url: String,
        /// The underlying error.
        source: reqwest::Error,
    },
}

/// Configuration threaded into [`Fetcher::new`].
///
/// The cache directory is an explicit value here rather than ambient
/// process state, scoped to the fetcher's lifetime.
pub struct FetcherConfig {
    /// Directory the media cache writes into.
    pub cache_dir: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Accept invalid TLS certificates. Defaults to `true` to match the
    /// reference deployment; embedders with real trust requirements turn
    /// this off.
    pub accept_invalid_certs: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig {
            cache_dir: PathBuf::from("cache"),
            timeout: TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            accept_invalid_certs: true,
        }
    }
}

/// Fetches text documents and binary media over HTTP(S), routing media
/// through the [`ResourceCache`].
pub struct Fetcher {
    client: reqwest::blocking::Client,
    user_agent: String,
    cache: ResourceCache,
}

impl Fetcher {
    /// Build a fetcher from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Fetcher {
            client,
            user_agent: config.user_agent,
            cache: ResourceCache::new(config.cache_dir),
        })
    }

    /// The media cache this fetcher writes through.
    #[must_use]
    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    /// Fetch a URL and return its body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response has a
    /// non-success status, or the body cannot be decoded. Callers degrade
    /// to an empty document; this is never fatal to a page load.
    pub fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.send(url)?;
        response.text().map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch a URL and return its body as raw bytes.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Fetcher::fetch_text`].
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.send(url)?;
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|source| FetchError::Body {
                url: url.to_string(),
                source,
            })
    }

    /// Resolve `reference` against `base_url` and return a local path for
    /// the media: the cached entry if one exists, otherwise the result of
    /// fetching and caching it.
    ///
    /// Best-effort by design. An empty resolution short-circuits without
    /// touching network or cache; transport failures, non-success
    /// statuses, empty bodies, and cache-write failures all produce `None`
    /// (with a deduplicated warning) and leave no stale or corrupt cache
    /// entry behind.
    #[must_use]
    pub fn fetch_media(&self, reference: &str, base_url: &str) -> Option<PathBuf> {
        let resolved = resolve_url(reference, base_url);
        if resolved.is_empty() {
            return None;
        }

        if let Some(hit) = self.cache.lookup(&resolved) {
            return Some(hit);
        }

        let bytes = match self.fetch_bytes(&resolved) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn_once("net", &format!("media fetch failed: {error}"));
                return None;
            }
        };

        match self.cache.store(&resolved, &bytes) {
            Ok(path) => Some(path),
            Err(error) => {
                warn_once("cache", &error.to_string());
                None
            }
        }
    }

    /// Issue a GET and check the status.
    fn send(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response)
    }
}
