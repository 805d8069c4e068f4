//! Error types for contato-core.
//!
//! Two families: [`ValidationError`] for submissions rejected before any
//! store is touched, and [`StoreError`] for everything a backend can fail
//! with. The HTTP layer maps both onto status codes.

use std::fmt;

use serde::Serialize;

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A submission that could not be turned into a [`ContactRequest`](crate::ContactRequest).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The body is not a JSON document.
    #[error("Request body is not valid JSON: {0}")]
    MalformedJson(String),

    /// The body is JSON but not an object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// One or more fields are missing or have the wrong shape.
    #[error("Invalid fields: {}", join_fields(.0))]
    Fields(Vec<FieldError>),
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Per-field details, empty for whole-body failures.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidationError::Fields(fields) => fields,
            ValidationError::MalformedJson(_) | ValidationError::NotAnObject => &[],
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a [`ContactStore`](crate::ContactStore) backend.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The backend needs service credentials that were not present at startup.
    #[error("Google credentials not found. Check the service credential file configuration.")]
    CredentialsMissing,

    /// The configured target (spreadsheet, table) does not resolve.
    #[error("Spreadsheet '{reference}' not found. Check the name and sharing settings.")]
    NotFound {
        /// The reference that failed to resolve.
        reference: String,
    },

    /// Any other persistence fault.
    #[error("An unexpected error occurred: {message}")]
    Backend {
        /// Human-readable description.
        message: String,
        /// Underlying cause, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend does not offer this operation.
    #[error("Operation '{operation}' is not supported by this store")]
    Unsupported {
        /// The operation that was requested.
        operation: &'static str,
    },
}

impl StoreError {
    /// Creates a backend error with a message.
    pub fn backend<S: Into<String>>(message: S) -> Self {
        StoreError::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a backend error with a message and source error.
    pub fn backend_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a not-found error.
    pub fn not_found<S: Into<String>>(reference: S) -> Self {
        StoreError::NotFound {
            reference: reference.into(),
        }
    }
}
