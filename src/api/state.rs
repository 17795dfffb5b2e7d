//! Application state for the roster API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::RosterService;
use crate::store::{InMemoryShiftStore, ShiftStore};

/// Shared application state.
///
/// Holds the roster service and the loaded configuration. Cloned per request;
/// the shift store behind the service is the only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    service: RosterService,
}

impl AppState {
    /// Creates application state with an empty in-memory shift store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, Arc::new(InMemoryShiftStore::new()))
    }

    /// Creates application state over the given shift store.
    pub fn with_store(config: ConfigLoader, store: Arc<dyn ShiftStore>) -> Self {
        let directory = Arc::new(config.directory());
        let service = RosterService::new(
            store,
            directory.clone(),
            directory,
            config.settings().clone(),
        );
        Self {
            config: Arc::new(config),
            service,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the roster service.
    pub fn service(&self) -> &RosterService {
        &self.service
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
    fn test_app_state_exposes_config_settings() {
        let config = ConfigLoader::load("./config/default").unwrap();
        let state = AppState::new(config);
        assert_eq!(
            state.service().settings(),
            state.config().settings()
        );
    }
}
