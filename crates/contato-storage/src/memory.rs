//! In-process contact store.

use async_trait::async_trait;
use contato_core::{ContactRequest, ContactStore, ListOrder, StoreResult};
use tokio::sync::RwLock;

/// Keeps records in a vector, assigning ids from 1 like the SQLite table.
///
/// Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ContactRequest>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether nothing has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn supports_listing(&self) -> bool {
        true
    }

    async fn append(&self, contact: ContactRequest) -> StoreResult<ContactRequest> {
        let mut records = self.records.write().await;
        let id = records.last().and_then(|r| r.id).unwrap_or(0) + 1;
        let stored = contact.with_id(id);
        records.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self, order: ListOrder) -> StoreResult<Vec<ContactRequest>> {
        let mut all = self.records.read().await.clone();
        if order == ListOrder::Descending {
            all.reverse();
        }
        Ok(all)
    }
}
