//! Application state shared across handlers.

use std::sync::Arc;

use map_store::MapStore;

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Map persistence backend.
    pub store: Arc<dyn MapStore>,
    /// Server configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn MapStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
