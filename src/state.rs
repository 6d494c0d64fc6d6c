//! Shared application state for all routes.

use crate::store::RotationStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Persistence capability; handlers never reach a global connection.
    pub store: Arc<dyn RotationStore>,
}

impl AppState {
    pub fn new(store: impl RotationStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
