#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Contato Core
//!
//! Shared types for the Contato contact-intake service. It has no internal
//! Contato dependencies and is the contract every storage backend and the
//! HTTP layer agree on.
//!
//! # Modules
//!
//! - [`model`]: the [`ContactRequest`] record
//! - [`validate`]: turns untyped submissions into records
//! - [`store`]: the [`ContactStore`] trait implemented by each backend
//! - [`error`]: validation and storage error taxonomy

pub mod error;
pub mod model;
pub mod store;
pub mod validate;

mod proptests;

// Re-exports for convenience
pub use error::{FieldError, StoreError, StoreResult, ValidationError};
pub use model::ContactRequest;
pub use store::{ContactStore, ListOrder, SharedStore};
pub use validate::{parse_submission, validate};
