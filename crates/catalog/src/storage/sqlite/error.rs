//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`.
//! Key constraint violations become `Conflict`; everything else is a
//! storage-kind transport error.

use catalog_core::storage::{RepositoryError, TransportError};

/// Maps a rusqlite error with a known ID to a RepositoryError.
fn map_rusqlite_error(err: &rusqlite::Error, id: &str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::product_conflict(id)
        }

        rusqlite::Error::QueryReturnedNoRows => RepositoryError::product_not_found(id),

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            TransportError::storage(format!("Cannot open database: {err}")).into()
        }

        _ => TransportError::storage(err.to_string()).into(),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// `id` names the product the statement was about, or is empty for
/// statements over the whole table.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error, id: &str) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, id),
        tokio_rusqlite::Error::Close(_) => {
            TransportError::storage("Connection closed unexpectedly").into()
        }
        _ => TransportError::storage(err.to_string()).into(),
    }
}
