//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use uuid::Uuid;

use newsdesk_core::article::{Article, ArticleWithAuthor};

// ============================================================================
// Article conversions
// ============================================================================

/// Convert a SQLite row to an Article.
///
/// Expected columns: id, author_id, title, content, image_url, category, created_at, updated_at
pub fn row_to_article(row: &Row) -> rusqlite::Result<Article> {
    let id: String = row.get(0)?;
    let author_id: String = row.get(1)?;
    let title: String = row.get(2)?;
    let content: String = row.get(3)?;
    let image_url: Option<String> = row.get(4)?;
    let category: String = row.get(5)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Article {
        id: parse_uuid(&id)?,
        author_id: parse_uuid(&author_id)?,
        title,
        content,
        image_url,
        category,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a row from the article/author JOIN.
///
/// Expected columns: the eight article columns, then first_name, last_name
pub fn row_to_article_with_author(row: &Row) -> rusqlite::Result<ArticleWithAuthor> {
    let article = row_to_article(row)?;
    let first_name: String = row.get(8)?;
    let last_name: String = row.get(9)?;

    Ok(ArticleWithAuthor::from_parts(
        article,
        format!("{first_name} {last_name}"),
    ))
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Always emits microseconds and a `Z` suffix so every value has the same width.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Builds a case-insensitive substring pattern for `LIKE ... ESCAPE '\'`.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
