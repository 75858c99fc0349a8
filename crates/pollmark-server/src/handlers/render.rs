//! Render endpoints.
//!
//! Stored documents render through the server's pipeline; unsaved text from
//! the editor goes through POST /api/render for live preview.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use pollmark_renderer::shortcode::{OutlineEntry, outline};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::handlers::documents::require_document;
use crate::state::AppState;

/// Response for render endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenderResponse {
    /// Rendered HTML.
    html: String,
    /// The page needs the widget activation script.
    needs_activation_script: bool,
    /// Recognized shortcodes in source order.
    shortcodes: Vec<OutlineEntry>,
}

/// Request body for POST /api/render.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewRequest {
    content: String,
    document_id: String,
}

fn render_content(
    state: &AppState,
    content: &str,
    document_id: &str,
) -> Result<RenderResponse, ServerError> {
    let output = state.pipeline.render(content, document_id)?;
    Ok(RenderResponse {
        html: output.html,
        needs_activation_script: output.needs_activation_script,
        shortcodes: outline(content),
    })
}

/// Handle GET /api/documents/{id}/render.
pub(crate) async fn render_document(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RenderResponse>, ServerError> {
    let document = require_document(&state, id)?;
    Ok(Json(render_content(&state, &document.content, &document.id)?))
}

/// Handle POST /api/render.
pub(crate) async fn render_preview(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, ServerError> {
    let Json(request) = payload.map_err(|e| ServerError::invalid_body("render", &e))?;
    Ok(Json(render_content(
        &state,
        &request.content,
        &request.document_id,
    )?))
}
