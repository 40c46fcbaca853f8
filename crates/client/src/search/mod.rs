//! The search pipeline.
//!
//! One client per query: construction normalizes the query, derives the
//! cache key, and bootstraps cache storage. `exec` serves from cache when a
//! well-formed entry exists, otherwise fetches, extracts, and caches a
//! non-empty result set. An empty extraction is returned as-is and never
//! cached, so a transient parse failure or endpoint change cannot stick as
//! a permanent empty answer.

use soq_core::{AppConfig, Error, SearchCache, SearchResult, derive_key};

use crate::extract::extract_results;
use crate::fetch::{FetchClient, FetchConfig, Transport};

/// Results page requested when the caller never set one.
const DEFAULT_PAGE: u32 = 1;

/// Cached search over the fixed endpoint.
pub struct SearchClient {
    query: String,
    key: String,
    page: Option<u32>,
    cache: SearchCache,
    transport: Box<dyn Transport>,
}

impl SearchClient {
    /// Create a client for one query, bootstrapping cache storage.
    ///
    /// # Errors
    ///
    /// Returns `Error::StorageInit` if the storage directories cannot be
    /// created, or `Error::Transport` if the HTTP client cannot be built.
    pub fn new(query: &str, config: &AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(config))?;
        Self::with_transport(query, config, Box::new(fetcher))
    }

    /// Same as [`SearchClient::new`], with a caller-supplied transport.
    pub fn with_transport(
        query: &str, config: &AppConfig, transport: Box<dyn Transport>,
    ) -> Result<Self, Error> {
        let (query, key) = derive_key(query);
        let cache = SearchCache::open(&config.data_root)?;

        Ok(Self { query, key, page: None, cache, transport })
    }

    /// The normalized query this client searches for.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The cache key derived from the normalized query.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Select the results page for the upcoming fetch (1-based).
    pub fn set_page(&mut self, page: u32) {
        self.page = Some(page);
    }

    /// Run the search and return the result set.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the fetch fails; transport failures
    /// are not retried. Cache-write failures are logged and absorbed.
    pub async fn exec(&self) -> Result<Vec<SearchResult>, Error> {
        if let Some(cached) = self.cache.get(&self.key) {
            tracing::debug!("cache hit for query: {}", self.query);
            return Ok(cached);
        }

        tracing::debug!("cache miss for query: {}", self.query);
        let body = self
            .transport
            .fetch(&self.query, self.page.unwrap_or(DEFAULT_PAGE))
            .await?;

        let results = extract_results(&body);
        if results.is_empty() {
            return Ok(results);
        }

        if let Err(e) = self.cache.write(&self.key, &results) {
            tracing::warn!("failed to cache results for {}: {e}", self.query);
        }

        Ok(results)
    }
}
