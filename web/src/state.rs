//! Application state for Axum handlers.

use std::sync::Arc;
use tasklist_core::TodoService;

/// Application state shared across all HTTP handlers.
///
/// Handlers share one [`TodoService`]. The service reloads storage on every
/// call and holds no lock, so concurrent requests may overwrite each other's
/// saves.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Todo operations over the configured storage
    pub service: Arc<TodoService>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(service: TodoService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
