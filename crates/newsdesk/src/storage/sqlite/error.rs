//! SQLite error mapping.
//!
//! The schema can fail in a handful of known ways: a primary key collision
//! on `authors` or `articles`, an article naming an unknown author, a row
//! that no longer decodes, or a connection that cannot be opened or has
//! gone away. Everything else is reported as a failed query.

use newsdesk_core::storage::RepositoryError;
use rusqlite::ffi;

/// Maps a `tokio_rusqlite` error raised while touching `entity_type`.
///
/// `id` is reported on primary key collisions when the caller knows it.
pub fn map_sqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: Option<&str>,
) -> RepositoryError {
    match err {
        tokio_rusqlite::Error::Rusqlite(err) => map_rusqlite(&err, entity_type, id),
        tokio_rusqlite::Error::ConnectionClosed => {
            RepositoryError::ConnectionFailed("Connection closed".to_string())
        }
        tokio_rusqlite::Error::Close((_, err)) => {
            RepositoryError::ConnectionFailed(format!("Failed to close connection: {err}"))
        }
        other => RepositoryError::QueryFailed(other.to_string()),
    }
}

fn map_rusqlite(
    err: &rusqlite::Error,
    entity_type: &'static str,
    id: Option<&str>,
) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepositoryError::AlreadyExists {
                entity_type,
                id: id.unwrap_or("unknown").to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            RepositoryError::InvalidData(format!("{entity_type} references an unknown author"))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
            RepositoryError::InvalidData(format!("Malformed {entity_type} row: {err}"))
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
