//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use pollmark_renderer::{Pipeline, RenderOptions};
use pollmark_store::{DocumentStore, ResponseStore};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Document persistence.
    pub(crate) documents: Arc<dyn DocumentStore>,
    /// Response persistence.
    pub(crate) responses: Arc<dyn ResponseStore>,
    /// Renderer configured from server options.
    pub(crate) pipeline: Pipeline,
}

impl AppState {
    /// Create state backed by a store implementing both store traits.
    pub(crate) fn new<S>(store: Arc<S>, options: RenderOptions) -> Self
    where
        S: DocumentStore + ResponseStore + 'static,
    {
        Self {
            documents: Arc::clone(&store) as Arc<dyn DocumentStore>,
            responses: store,
            pipeline: Pipeline::new(options),
        }
    }
}
