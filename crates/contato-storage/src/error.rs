//! Error types for contato-storage

use thiserror::Error;

/// Result type alias for contato-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while opening a storage backend.
///
/// Per-request failures are reported as [`contato_core::StoreError`]; this
/// type only covers startup.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The connection string could not be parsed.
    #[error("Invalid database URL '{url}': {source}")]
    InvalidUrl {
        /// The offending connection string
        url: String,
        /// Parser error
        #[source]
        source: sqlx::Error,
    },

    /// Connecting to or initializing the database failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub(crate) fn to_store_error(operation: &str, err: sqlx::Error) -> contato_core::StoreError {
    contato_core::StoreError::backend_with_source(format!("{operation} failed: {err}"), err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_display() {
        let err: Error = sqlx::Error::PoolClosed.into();
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_to_store_error_keeps_source() {
        let err = to_store_error("insert", sqlx::Error::RowNotFound);
        let std_err: &dyn std::error::Error = &err;
        assert!(std_err.source().is_some());
        assert!(err.to_string().contains("insert failed"));
    }
}
