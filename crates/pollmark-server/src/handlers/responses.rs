//! Question response endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use pollmark_store::{NewResponse, QuestionResponse, ResponseTally};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle POST /api/responses.
///
/// Every submission is recorded, including repeats from the same session.
pub(crate) async fn create_response(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewResponse>, JsonRejection>,
) -> Result<(StatusCode, Json<QuestionResponse>), ServerError> {
    let Json(response) = payload.map_err(|e| ServerError::invalid_body("response", &e))?;
    let recorded = state.responses.record_response(response)?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

/// Handle GET /api/responses/{document_id}/{question_id}/counts.
pub(crate) async fn get_counts(
    Path((document_id, question_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResponseTally>, ServerError> {
    Ok(Json(
        state.responses.count_responses(&document_id, &question_id)?,
    ))
}
