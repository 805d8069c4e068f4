//! Error types for contato-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for contato-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while preparing the process
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O failed
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The SQLite store could not be opened
    #[error(transparent)]
    Storage(#[from] contato_storage::Error),

    /// The spreadsheet store could not be prepared
    #[error(transparent)]
    Sheets(#[from] contato_sheets::Error),

    /// The logging subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Create an I/O error tagged with the file it concerns
    pub fn io_with_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
