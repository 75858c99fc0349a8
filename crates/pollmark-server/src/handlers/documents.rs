//! Document CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use pollmark_store::{Document, DocumentPatch, NewDocument};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/documents.
pub(crate) async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, ServerError> {
    Ok(Json(state.documents.list()?))
}

/// Handle GET /api/documents/{id}.
pub(crate) async fn get_document(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Document>, ServerError> {
    state
        .documents
        .get(&id)?
        .map(Json)
        .ok_or(ServerError::DocumentNotFound(id))
}

/// Handle POST /api/documents.
pub(crate) async fn create_document(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewDocument>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), ServerError> {
    let Json(document) = payload.map_err(|e| ServerError::invalid_body("document", &e))?;
    let created = state.documents.create(document)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handle PUT /api/documents/{id}.
///
/// Fields missing from the body are left unchanged.
pub(crate) async fn update_document(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DocumentPatch>, JsonRejection>,
) -> Result<Json<Document>, ServerError> {
    let Json(patch) = payload.map_err(|e| ServerError::invalid_body("document", &e))?;
    state
        .documents
        .update(&id, patch)?
        .map(Json)
        .ok_or(ServerError::DocumentNotFound(id))
}

/// Handle DELETE /api/documents/{id}.
pub(crate) async fn delete_document(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ServerError> {
    if state.documents.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::DocumentNotFound(id))
    }
}

/// Fetch a document or fail with 404.
pub(crate) fn require_document(state: &AppState, id: String) -> Result<Document, ServerError> {
    state
        .documents
        .get(&id)?
        .ok_or(ServerError::DocumentNotFound(id))
}
