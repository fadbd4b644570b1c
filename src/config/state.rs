// Application state module
// Shared state injected into every request handler

use std::sync::Arc;
use tokio::sync::RwLock;

use super::types::Config;
use crate::auth::{Authorizer, StaticTokenAuthorizer};
use crate::employees::EmployeeStore;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Single lock guarding every read and mutation of the employee collection
    pub store: RwLock<EmployeeStore>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    /// Create state with the seeded store and the configured static-token authorizer
    pub fn new(config: &Config) -> Self {
        let authorizer = Arc::new(StaticTokenAuthorizer::from_config(&config.auth));
        Self::with_parts(config, EmployeeStore::seeded(), authorizer)
    }

    pub fn with_parts(
        config: &Config,
        store: EmployeeStore,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            config: config.clone(),
            store: RwLock::new(store),
            authorizer,
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
