// Application state shared with request handlers
// Constructed once at startup and cloned into the router

use std::sync::Arc;

use crate::chat::CompletionProvider;
use crate::store::StoreHandle;

/// Main application state
///
/// Cheap to clone: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Write-once handle to the submission store
    pub store: StoreHandle,
    /// Completion provider used by the chat relay
    pub chat: Arc<dyn CompletionProvider>,
}

impl AppState {
    /// Create application state from its dependencies
    pub fn new(store: StoreHandle, chat: Arc<dyn CompletionProvider>) -> Self {
        Self { store, chat }
    }
}
