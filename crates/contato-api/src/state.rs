//! Shared handler state.

use contato_core::SharedStore;

/// State handed to every request handler.
///
/// Holds the store created by the hosting process; cloning only bumps the
/// reference count.
#[derive(Clone)]
pub struct AppState {
    /// The configured store backend.
    pub store: SharedStore,
}

impl AppState {
    /// Wraps a store handle.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.store.backend())
            .finish()
    }
}
