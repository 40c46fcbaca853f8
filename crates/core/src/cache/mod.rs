//! Content-addressed result cache.
//!
//! Queries are normalized and hashed into a fixed-length key; result sets
//! are persisted one JSON file per key under a flat cache directory. There
//! is no expiry and no eviction: an entry, once written, is served until
//! someone deletes the file.

pub mod key;
pub mod store;

pub use key::derive_key;
pub use store::SearchCache;
