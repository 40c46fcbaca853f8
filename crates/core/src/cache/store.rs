//! File-backed result cache.
//!
//! One JSON file per cache key, stored flat under
//! `<data_root>/stackoverflow/cache/`. An entry that exists but does not
//! decode into a result array counts as a miss, never as an error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::result::SearchResult;

/// Flat, content-addressed store for search result sets.
#[derive(Debug, Clone)]
pub struct SearchCache {
    cache_dir: PathBuf,
}

impl SearchCache {
    /// Open the cache under `data_root`, creating the storage and cache
    /// directories if absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::StorageInit` if either directory cannot be created.
    pub fn open(data_root: &Path) -> Result<Self, Error> {
        let cache_dir = data_root.join("stackoverflow").join("cache");

        fs::create_dir_all(&cache_dir).map_err(|e| Error::StorageInit {
            path: cache_dir.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { cache_dir })
    }

    /// Path of the entry file for `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(key)
    }

    /// Read and decode the entry for `key`.
    ///
    /// Returns `None` when the file is absent, unreadable, or does not
    /// decode into a result array.
    pub fn get(&self, key: &str) -> Option<Vec<SearchResult>> {
        let raw = fs::read(self.entry_path(key)).ok()?;
        serde_json::from_slice(&raw).ok()
    }

    /// Whether a readable, well-formed entry exists for `key`.
    pub fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Serialize `results` and persist them under `key`, replacing any
    /// prior entry.
    pub fn write(&self, key: &str, results: &[SearchResult]) -> Result<(), Error> {
        let json = serde_json::to_vec(results).map_err(|e| Error::CacheWrite {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        fs::write(self.entry_path(key), json).map_err(|e| Error::CacheWrite {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}
