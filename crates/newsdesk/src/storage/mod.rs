//! Storage backend implementations.
//!
//! This module provides concrete implementations of `ArticleStore` defined in
//! `newsdesk_core::storage`, plus the cache-aside decorator that turns any
//! store into an `ArticleRepository`.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! The in-memory backend is always available.

use chrono::{DateTime, SubsecRound, Utc};

pub mod cached;
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cached::CachedArticleRepository;
pub use inmemory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Current time at the precision every backend can persist.
pub(crate) fn store_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
