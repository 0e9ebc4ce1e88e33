use thiserror::Error;

/// Errors that can occur when constructing pagination parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid page: pages are numbered from 1")]
    InvalidPage,
    #[error("Invalid page size: size must be at least 1")]
    InvalidSize,
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Operation cancelled")]
    Cancelled,
}

impl RepositoryError {
    /// Shorthand for a missing article.
    pub fn article_not_found(id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type: "Article",
            id: id.to_string(),
        }
    }

    /// Returns true if the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    /// Returns true if the caller cancelled the operation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RepositoryError::Cancelled)
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
