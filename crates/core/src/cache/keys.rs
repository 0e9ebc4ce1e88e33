use uuid::Uuid;

/// Default prefix for single-article cache keys.
pub const DEFAULT_ARTICLE_KEY_PREFIX: &str = "article:";

/// Returns the cache key for a single article.
///
/// The key is the configured prefix followed by the hyphenated UUID. No other
/// article field participates, so every write path can derive the key from
/// the id alone.
///
/// # Examples
///
/// ```
/// use newsdesk_core::cache::article_key;
/// use uuid::Uuid;
///
/// assert_eq!(
///     article_key("news:", Uuid::nil()),
///     "news:00000000-0000-0000-0000-000000000000"
/// );
/// ```
pub fn article_key(prefix: &str, article_id: Uuid) -> String {
    format!("{}{}", prefix, article_id)
}
