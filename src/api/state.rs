//! Application state for the youth labor engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::StatutoryConfig;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains the storage boundary and the statutory configuration shared
/// across all request handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<MemoryStore>,
    statutory: Arc<StatutoryConfig>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: MemoryStore, statutory: StatutoryConfig) -> Self {
        Self {
            store: Arc::new(store),
            statutory: Arc::new(statutory),
        }
    }

    /// Creates a state sharing an existing store.
    pub fn with_store(store: Arc<MemoryStore>, statutory: StatutoryConfig) -> Self {
        Self {
            store,
            statutory: Arc::new(statutory),
        }
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns the statutory configuration.
    pub fn statutory(&self) -> &StatutoryConfig {
        &self.statutory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_with_store_shares_the_store() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_store(store.clone(), StatutoryConfig::default());
        assert!(Arc::ptr_eq(&store, &state.store));
    }
}
