//! Google Sheets storage backend for Contato.
//!
//! Provides:
//! - [`ServiceAccountKey`] / [`load_credentials`]: the service credential
//!   file, read once at startup; a missing file is not fatal
//! - [`TokenProvider`]: JWT-bearer OAuth2 exchange with access-token caching
//! - [`SheetReference`]: a spreadsheet addressed by name or by URL/key
//! - [`SheetsClient`]: the three remote calls (resolve, first sheet, append row)
//! - [`SpreadsheetStore`]: the [`contato_core::ContactStore`] implementation

mod auth;
mod client;
mod credentials;
mod error;
mod reference;
mod store;

pub use auth::{SCOPES, TokenProvider};
pub use client::{GoogleEndpoints, SheetsClient};
pub use credentials::{DEFAULT_TOKEN_URI, ServiceAccountKey, load_credentials};
pub use error::{Error, Result};
pub use reference::SheetReference;
pub use store::SpreadsheetStore;
