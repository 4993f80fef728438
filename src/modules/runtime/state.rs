//! Shared application state (HTTP handlers)

use std::sync::Arc;
use todos_core::AppConfig;

use crate::store::TodoStore;

/// Application state shared across handlers.
///
/// Both fields are read-only after startup; the store handle is safe for
/// concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }
}
