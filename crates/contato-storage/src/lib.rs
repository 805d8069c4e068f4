//! # contato-storage
//!
//! Local storage backends for the Contato intake service:
//! - [`SqliteStore`]: single-file relational table, created on first open
//! - [`MemoryStore`]: in-process store with the same contract, for tests
//!   and throwaway local runs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod memory;
pub mod sqlite;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
