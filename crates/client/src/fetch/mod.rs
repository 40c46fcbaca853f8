//! HTTP fetch against the search endpoint.
//!
//! ### Header Profile
//! The target serves different markup to unrecognized clients, so every
//! request carries a fixed desktop-browser header set (Accept,
//! Accept-Language, Accept-Encoding, Connection, Upgrade-Insecure-Requests,
//! Cache-Control, User-Agent). Downstream extraction depends on this
//! profile staying intact.
//!
//! ### Transport Behavior
//! - Redirects are not followed.
//! - HTTP/2 is preferred via ALPN; `prefer_http2 = false` forces HTTP/1.1.
//! - The status line is not inspected: only connection-level failures are
//!   surfaced, and an error page simply yields no result blocks downstream.
//! - Setting `Accept-Encoding` explicitly opts out of reqwest's automatic
//!   decompression; the body is decoded here per `Content-Encoding`.

use std::io::Read;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use flate2::read::{GzDecoder, ZlibDecoder};
use reqwest::{Client, header};
use url::Url;

use soq_core::{AppConfig, Error};

/// Transport error codes, following curl's errno numbering.
pub const CODE_FAILED_INIT: u16 = 2;
pub const CODE_URL_MALFORMAT: u16 = 3;
pub const CODE_COULDNT_CONNECT: u16 = 7;
pub const CODE_TIMEOUT: u16 = 28;
pub const CODE_SEND_ERROR: u16 = 55;
pub const CODE_RECV_ERROR: u16 = 56;
pub const CODE_BAD_CONTENT_ENCODING: u16 = 61;

const DEFAULT_BASE_URL: &str = "https://stackoverflow.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:58.0) Gecko/20100101 Firefox/58.0";

/// Configuration for the search fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the search site (default: `https://stackoverflow.com`)
    pub base_url: String,

    /// User agent string (default: a desktop Firefox string)
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Skip TLS certificate verification (default: false)
    pub insecure_tls: bool,

    /// Prefer HTTP/2 via ALPN (default: true)
    pub prefer_http2: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_millis(20000),
            insecure_tls: false,
            prefer_http2: true,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            insecure_tls: config.insecure_tls,
            prefer_http2: config.prefer_http2,
        }
    }
}

/// Transport abstraction over the search endpoint.
///
/// Lets the pipeline swap the HTTP layer for a stub in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch one page of search results, returning the decoded body text.
    async fn fetch(&self, query: &str, page: u32) -> Result<String, Error>;
}

/// HTTP client for the search endpoint.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .use_rustls_tls();

        if config.insecure_tls {
            tracing::warn!("TLS certificate verification disabled for search fetches");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if !config.prefer_http2 {
            builder = builder.http1_only();
        }

        let http = builder
            .build()
            .map_err(|e| Error::transport(CODE_FAILED_INIT, format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Build the search URL for `query` and `page`.
    fn search_url(&self, query: &str, page: u32) -> Result<Url, Error> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            Error::transport(CODE_URL_MALFORMAT, format!("bad base url {}: {e}", self.config.base_url))
        })?;

        url.set_path("/search");
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("tab", "Relevance")
            .append_pair("q", query);

        Ok(url)
    }

    /// Fetch one page of search results, returning the decompressed body.
    pub async fn fetch(&self, query: &str, page: u32) -> Result<String, Error> {
        let start = Instant::now();
        let url = self.search_url(query, page)?;

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
            .header(header::ACCEPT_ENCODING, "gzip, deflate")
            .header(header::CONNECTION, "keep-alive")
            .header("Upgrade-Insecure-Requests", "1")
            .header(header::CACHE_CONTROL, "max-age=0")
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let encoding = response
            .headers()
            .get(header::CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(CODE_RECV_ERROR, format!("failed to read response: {e}")))?;

        let body = decode_body(encoding.as_deref(), &bytes)?;

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} wire bytes, {} decoded)",
            url,
            status,
            start.elapsed().as_millis(),
            bytes.len(),
            body.len()
        );

        Ok(body)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for FetchClient {
    async fn fetch(&self, query: &str, page: u32) -> Result<String, Error> {
        FetchClient::fetch(self, query, page).await
    }
}

/// Map a reqwest error onto a transport code.
fn classify(err: reqwest::Error) -> Error {
    let code = if err.is_timeout() {
        CODE_TIMEOUT
    } else if err.is_connect() {
        CODE_COULDNT_CONNECT
    } else if err.is_body() || err.is_decode() {
        CODE_RECV_ERROR
    } else {
        CODE_SEND_ERROR
    };

    Error::transport(code, err.to_string())
}

/// Decompress a response body according to its `Content-Encoding`.
fn decode_body(encoding: Option<&str>, raw: &[u8]) -> Result<String, Error> {
    let decoded = match encoding {
        Some(enc) if enc.eq_ignore_ascii_case("gzip") => {
            let mut out = Vec::new();
            GzDecoder::new(raw)
                .read_to_end(&mut out)
                .map_err(|e| Error::transport(CODE_BAD_CONTENT_ENCODING, format!("gzip decode failed: {e}")))?;
            out
        }
        Some(enc) if enc.eq_ignore_ascii_case("deflate") => {
            let mut out = Vec::new();
            ZlibDecoder::new(raw)
                .read_to_end(&mut out)
                .map_err(|e| Error::transport(CODE_BAD_CONTENT_ENCODING, format!("deflate decode failed: {e}")))?;
            out
        }
        Some(enc) if enc.eq_ignore_ascii_case("identity") => raw.to_vec(),
        None => raw.to_vec(),
        Some(other) => {
            return Err(Error::transport(
                CODE_BAD_CONTENT_ENCODING,
                format!("unsupported content encoding: {other}"),
            ));
        }
    };

    Ok(String::from_utf8_lossy(&decoded).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::{GzEncoder, ZlibEncoder};
    use std::io::Write;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url, "https://stackoverflow.com");
        assert!(config.user_agent.contains("Firefox"));
        assert_eq!(config.timeout, Duration::from_millis(20000));
        assert!(!config.insecure_tls);
        assert!(config.prefer_http2);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { timeout_ms: 5000, insecure_tls: true, ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.timeout, Duration::from_millis(5000));
        assert!(config.insecure_tls);
        assert_eq!(config.base_url, app.base_url);
    }

    #[tokio::test]
    async fn test_search_url_shape() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let url = client.search_url("borrow checker", 2).unwrap();
        assert_eq!(url.as_str(), "https://stackoverflow.com/search?page=2&tab=Relevance&q=borrow+checker");
    }

    #[tokio::test]
    async fn test_search_url_encodes_query() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let url = client.search_url("c++ & rust?", 1).unwrap();
        assert_eq!(url.as_str(), "https://stackoverflow.com/search?page=1&tab=Relevance&q=c%2B%2B+%26+rust%3F");
    }

    #[tokio::test]
    async fn test_bad_base_url() {
        let config = FetchConfig { base_url: "not a url".to_string(), ..Default::default() };
        let client = FetchClient::new(config).unwrap();
        let result = client.search_url("q", 1);
        assert!(matches!(result, Err(Error::Transport { code: CODE_URL_MALFORMAT, .. })));
    }

    #[test]
    fn test_decode_body_identity() {
        assert_eq!(decode_body(None, b"plain text").unwrap(), "plain text");
        assert_eq!(decode_body(Some("identity"), b"plain text").unwrap(), "plain text");
    }

    #[test]
    fn test_decode_body_gzip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"<html>compressed</html>").unwrap();
        let compressed = encoder.finish().unwrap();

        let body = decode_body(Some("gzip"), &compressed).unwrap();
        assert_eq!(body, "<html>compressed</html>");
    }

    #[test]
    fn test_decode_body_deflate() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"<html>deflated</html>").unwrap();
        let compressed = encoder.finish().unwrap();

        let body = decode_body(Some("deflate"), &compressed).unwrap();
        assert_eq!(body, "<html>deflated</html>");
    }

    #[test]
    fn test_decode_body_gzip_case_insensitive() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"x").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(decode_body(Some("GZIP"), &compressed).unwrap(), "x");
    }

    #[test]
    fn test_decode_body_truncated_gzip_fails() {
        let result = decode_body(Some("gzip"), b"\x1f\x8b\x08 not really gzip");
        assert!(matches!(result, Err(Error::Transport { code: CODE_BAD_CONTENT_ENCODING, .. })));
    }

    #[test]
    fn test_decode_body_unsupported_encoding() {
        let result = decode_body(Some("br"), b"whatever");
        assert!(matches!(result, Err(Error::Transport { code: CODE_BAD_CONTENT_ENCODING, .. })));
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        assert!(FetchClient::new(FetchConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_client_new_insecure() {
        let config = FetchConfig { insecure_tls: true, ..Default::default() };
        assert!(FetchClient::new(config).is_ok());
    }
}
