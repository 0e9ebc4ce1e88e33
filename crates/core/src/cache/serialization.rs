//! Pure functions for serializing/deserializing articles to/from cache bytes.
//!
//! Values are stored as JSON so cached entries stay readable from
//! `redis-cli` when debugging.

use crate::article::ArticleWithAuthor;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes an article with its author to JSON bytes.
pub fn serialize_article(article: &ArticleWithAuthor) -> Result<Vec<u8>> {
    serde_json::to_vec(article).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an article with its author.
pub fn deserialize_article(bytes: &[u8]) -> Result<ArticleWithAuthor> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
