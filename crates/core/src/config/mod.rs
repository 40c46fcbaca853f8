//! Application configuration with layered loading.
//!
//! Configuration is assembled with figment from three sources:
//!
//! 1. Environment variables (SOQ_*)
//! 2. TOML config file (if SOQ_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SOQ_*)
/// 2. TOML config file (if SOQ_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root directory for persistent state.
    ///
    /// The cache lives at `<data_root>/stackoverflow/cache`. Set via
    /// SOQ_DATA_ROOT; defaults to the system temp directory.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    /// Base URL of the search site.
    ///
    /// Set via SOQ_BASE_URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent sent with search requests.
    ///
    /// The target serves different markup to non-browser clients, so the
    /// default is a desktop browser string. Set via SOQ_USER_AGENT.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via SOQ_TIMEOUT_MS.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Disable TLS certificate verification for the fetch.
    ///
    /// Off by default. Enabling this reproduces the legacy scraper's
    /// unverified-TLS behavior and logs a warning at load time. Set via
    /// SOQ_INSECURE_TLS.
    #[serde(default)]
    pub insecure_tls: bool,

    /// Prefer HTTP/2 (negotiated via ALPN). When false, force HTTP/1.1.
    ///
    /// Set via SOQ_PREFER_HTTP2.
    #[serde(default = "default_true")]
    pub prefer_http2: bool,
}

fn default_data_root() -> PathBuf {
    std::env::temp_dir()
}

fn default_base_url() -> String {
    "https://stackoverflow.com".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64; rv:58.0) Gecko/20100101 Firefox/58.0".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            insecure_tls: false,
            prefer_http2: true,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or validation
    /// fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SOQ_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SOQ_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
