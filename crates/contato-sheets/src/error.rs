//! Startup errors for the spreadsheet backend.
//!
//! Request-time failures use [`contato_core::StoreError`] instead.

use std::path::PathBuf;

/// Result type alias for contato-sheets setup.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the spreadsheet backend.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The credential file exists but could not be read.
    #[error("failed to read credential file {path}: {source}")]
    CredentialsRead {
        /// Path of the credential file
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },

    /// The credential file is not a usable service-account key.
    #[error("invalid credential file {path}: {message}")]
    CredentialsInvalid {
        /// Path of the credential file
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// The service-account private key is not a usable RSA key.
    #[error("invalid service account key: {0}")]
    InvalidKey(String),

    /// The sheet reference could not be interpreted.
    #[error("invalid sheet reference '{reference}': {message}")]
    InvalidReference {
        /// The reference as configured
        reference: String,
        /// What is wrong with it
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn invalid_credentials(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::CredentialsInvalid {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_reference(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidReference {
            reference: reference.into(),
            message: message.into(),
        }
    }
}
