mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{article_key, DEFAULT_ARTICLE_KEY_PREFIX};
pub use serialization::{deserialize_article, serialize_article, SerializationError};
pub use traits::Cache;
