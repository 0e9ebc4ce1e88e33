//! newsdesk: a cache-aside article repository with SQLite and Redis backends.
//!
//! The library exposes the storage and cache backends plus the
//! [`storage::CachedArticleRepository`] that combines them. The `newsdesk`
//! binary is a thin operator CLI over the same types.

pub mod cache;
pub mod cli;
pub mod config;
pub mod output;
pub mod storage;
