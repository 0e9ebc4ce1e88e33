use std::{env, time::Duration};

use newsdesk_core::cache::DEFAULT_ARTICLE_KEY_PREFIX;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL for single articles in seconds (default: 50)
    pub cache_ttl_seconds: u64,
    /// Prefix for article cache keys (default: "article:")
    pub cache_key_prefix: String,
    /// Maximum number of in-process cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "newsdesk.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Article cache TTL in seconds (default: 50)
    /// - `CACHE_KEY_PREFIX` - Article cache key prefix (default: "article:")
    /// - `CACHE_MAX_ENTRIES` - Maximum in-process cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "newsdesk.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            cache_key_prefix: lookup("CACHE_KEY_PREFIX")
                .unwrap_or_else(|| DEFAULT_ARTICLE_KEY_PREFIX.to_string()),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "newsdesk.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
