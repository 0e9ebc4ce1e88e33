//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of `ArticleStore` that
//! keeps all data in HashMaps wrapped in `Arc<RwLock<_>>`. It backs the CLI
//! when the `sqlite` feature is off and serves as a test double.
//!
//! # Example
//!
//! ```rust,ignore
//! use newsdesk::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! store.insert_author(&Author::new("Ada", "Lovelace")).await?;
//! ```

mod repository;

pub use repository::InMemoryStore;
