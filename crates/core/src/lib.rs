//! Core types and shared functionality for soq.
//!
//! This crate provides:
//! - The search result record type
//! - Query normalization and cache key derivation
//! - File-backed result cache
//! - Layered configuration
//! - Unified error types

pub mod cache;
pub mod config;
pub mod error;
pub mod result;

pub use cache::{SearchCache, derive_key};
pub use config::AppConfig;
pub use error::Error;
pub use result::SearchResult;
