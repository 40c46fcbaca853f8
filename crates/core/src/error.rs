//! Unified error types for soq.

use std::path::PathBuf;

/// Unified error type for the search pipeline.
///
/// Absent cache entries and empty extractions are normal outcomes, not
/// errors; only storage bootstrap and transport failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Storage or cache directory cannot be created at construction.
    #[error("STORAGE_INIT: cannot create {}: {reason}", .path.display())]
    StorageInit { path: PathBuf, reason: String },

    /// Transport-level fetch failure (DNS, connect, TLS, timeout, body).
    ///
    /// `code` follows curl's errno numbering.
    #[error("TRANSPORT ({code}): {message}")]
    Transport { code: u16, message: String },

    /// A cache entry could not be written.
    #[error("CACHE_WRITE: {key}: {reason}")]
    CacheWrite { key: String, reason: String },
}

impl Error {
    /// Construct a transport error from a code and message.
    pub fn transport(code: u16, message: impl Into<String>) -> Self {
        Error::Transport { code, message: message.into() }
    }
}
