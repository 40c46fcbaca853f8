//! Client code for soq.
//!
//! This crate provides the HTTP fetch against the search endpoint, result
//! extraction from the returned markup, and the pipeline that ties both to
//! the on-disk result cache.

pub mod extract;
pub mod fetch;
pub mod search;

pub use extract::extract_results;
pub use fetch::{FetchClient, FetchConfig, Transport};
pub use search::SearchClient;
