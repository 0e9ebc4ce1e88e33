//! Cached repository decorator.
//!
//! Wraps an `ArticleStore` with caching behavior using the cache-aside pattern:
//!
//! - **Reads by id**: Check cache first, on miss fetch from the store and populate cache
//! - **Writes**: Persist to the store, then invalidate the cached article
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(SqliteStore::new("newsdesk.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000)?);
//!
//! let repo = CachedArticleRepository::new(store, cache, Duration::from_secs(50));
//! let article = repo.get_by_id(&CancellationToken::new(), id).await?;
//! ```

mod article;

pub use article::CachedArticleRepository;
