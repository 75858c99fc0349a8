//! Shortcode outline and library endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use pollmark_renderer::shortcode::{
    OutlineEntry, ShortcodeCounts, ShortcodeKind, count_shortcodes, outline,
};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::documents::require_document;
use crate::state::AppState;

/// Response for GET /api/documents/{id}/shortcodes.
#[derive(Debug, Serialize)]
pub(crate) struct OutlineResponse {
    /// Number of shortcodes per kind.
    counts: ShortcodeCounts,
    /// Shortcodes in source order.
    entries: Vec<OutlineEntry>,
}

/// One entry of the shortcode library.
#[derive(Debug, Serialize)]
pub(crate) struct LibraryEntry {
    /// Shortcode name as written in documents.
    key: &'static str,
    /// Display name.
    name: &'static str,
    description: &'static str,
    /// Snippet to insert.
    template: &'static str,
}

impl From<ShortcodeKind> for LibraryEntry {
    fn from(kind: ShortcodeKind) -> Self {
        Self {
            key: kind.name(),
            name: kind.display_name(),
            description: kind.description(),
            template: kind.template(),
        }
    }
}

/// Handle GET /api/documents/{id}/shortcodes.
pub(crate) async fn get_outline(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<OutlineResponse>, ServerError> {
    let document = require_document(&state, id)?;
    Ok(Json(OutlineResponse {
        counts: count_shortcodes(&document.content),
        entries: outline(&document.content),
    }))
}

/// Handle GET /api/shortcodes.
pub(crate) async fn get_library() -> Json<Vec<LibraryEntry>> {
    Json(ShortcodeKind::ALL.into_iter().map(LibraryEntry::from).collect())
}
