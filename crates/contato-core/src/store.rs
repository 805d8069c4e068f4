//! The storage abstraction every backend implements.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::model::ContactRequest;

/// Ordering for [`ContactStore::list_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Insertion order (id ascending).
    #[default]
    Ascending,
    /// Newest first (id descending).
    Descending,
}

/// Durably records contact submissions.
///
/// Implementations are created once by the hosting process and shared
/// across requests, so they must be `Send + Sync`. Records are append-only:
/// there is no update or delete.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Short backend name used in logs and health output.
    fn backend(&self) -> &'static str;

    /// Whether [`list_all`](Self::list_all) is available.
    fn supports_listing(&self) -> bool {
        false
    }

    /// Persists one record and returns it as stored.
    ///
    /// Id-assigning backends return the record with `id` set. Calling this
    /// twice with the same record stores it twice.
    async fn append(&self, contact: ContactRequest) -> StoreResult<ContactRequest>;

    /// Returns every stored record in the requested order.
    async fn list_all(&self, order: ListOrder) -> StoreResult<Vec<ContactRequest>> {
        let _ = order;
        Err(StoreError::Unsupported {
            operation: "list_all",
        })
    }
}

/// A store handle shared between request handlers.
pub type SharedStore = Arc<dyn ContactStore>;
