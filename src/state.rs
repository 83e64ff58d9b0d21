//! Shared application state for all routes. Stores are injected, never global.

use crate::store::{AccountStore, CustomerStore, MemoryStore, PgStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerStore>,
    pub accounts: Arc<dyn AccountStore>,
}

impl AppState {
    pub fn new(customers: Arc<dyn CustomerStore>, accounts: Arc<dyn AccountStore>) -> Self {
        AppState { customers, accounts }
    }

    /// Both resources served from one in-process store.
    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        AppState::new(store.clone(), store)
    }

    /// Both resources served from PostgreSQL.
    pub fn postgres(store: PgStore) -> Self {
        let store = Arc::new(store);
        AppState::new(store.clone(), store)
    }
}
