//! Shared handler state.

use std::sync::Arc;

use rlmk_services::ServiceRegistry;

/// State cloned into every handler: the initialized service registry.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceRegistry>,
}

impl AppState {
    pub fn new(services: ServiceRegistry) -> Self {
        Self {
            services: Arc::new(services),
        }
    }
}
