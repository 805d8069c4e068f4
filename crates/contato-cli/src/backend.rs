//! Builds the configured [`ContactStore`](contato_core::ContactStore).

use std::sync::Arc;

use contato_core::SharedStore;
use contato_sheets::{SheetReference, SpreadsheetStore, load_credentials};
use contato_storage::{MemoryStore, SqliteStore};

use crate::config::{Backend, StoreConfig};
use crate::error::Result;

/// The store chosen at startup, plus what is needed to release it.
pub struct OpenedStore {
    store: SharedStore,
    sqlite: Option<SqliteStore>,
}

impl OpenedStore {
    /// Handle to give to the router.
    pub fn shared(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    /// Releases backend resources once the server has stopped.
    pub async fn close(self) {
        if let Some(sqlite) = self.sqlite {
            sqlite.close().await;
            tracing::debug!("SQLite pool closed");
        }
    }
}

/// Opens the backend selected in `config`.
///
/// A missing credential file does not fail here; the spreadsheet store then
/// rejects each write instead. A present but invalid file does fail.
pub async fn open_store(config: &StoreConfig) -> Result<OpenedStore> {
    let opened = match config.backend {
        Backend::Sheets => {
            let reference = SheetReference::parse(&config.sheet_reference)?;
            let credentials = load_credentials(&config.credential_path)?;
            let store = SpreadsheetStore::new(credentials, reference)?;
            OpenedStore {
                store: Arc::new(store),
                sqlite: None,
            }
        }
        Backend::Sqlite => {
            let store = SqliteStore::connect(&config.database_url).await?;
            OpenedStore {
                store: Arc::new(store.clone()),
                sqlite: Some(store),
            }
        }
        Backend::Memory => {
            tracing::warn!("Memory store selected; submissions are lost on restart");
            OpenedStore {
                store: Arc::new(MemoryStore::new()),
                sqlite: None,
            }
        }
    };
    tracing::info!(
        backend = opened.store.backend(),
        listing = opened.store.supports_listing(),
        "Contact store opened"
    );
    Ok(opened)
}
