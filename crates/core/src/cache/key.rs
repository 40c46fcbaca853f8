//! Query normalization and cache key derivation.

use sha2::{Digest, Sha256};

/// Normalize a raw query and derive its cache key.
///
/// Normalization trims surrounding whitespace and ASCII-lowercases the
/// query, so `" Foo "` and `"foo"` address the same cache entry. The key is
/// the lowercase hex SHA-256 digest of the normalized bytes.
pub fn derive_key(raw: &str) -> (String, String) {
    let normalized = raw.trim().to_ascii_lowercase();

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let key = hex::encode(hasher.finalize());

    (normalized, key)
}
