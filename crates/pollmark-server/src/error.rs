//! Error types for the HTTP server.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pollmark_renderer::RenderError;
use pollmark_store::StoreError;
use serde_json::json;

/// Server error type.
///
/// Every variant renders as a JSON body `{"message": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Document not found.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Request body could not be parsed or failed validation.
    #[error("{message}")]
    InvalidRequest {
        /// Client-facing message.
        message: String,
    },

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Render error.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl ServerError {
    /// Wrap a JSON body rejection with a resource-specific message.
    pub(crate) fn invalid_body(what: &str, rejection: &JsonRejection) -> Self {
        Self::InvalidRequest {
            message: format!("Invalid {what} data: {}", rejection.body_text()),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::DocumentNotFound(_) | Self::Store(StoreError::DocumentNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidRequest { .. }
            | Self::Store(StoreError::InvalidInput { .. })
            | Self::Render(RenderError::InvalidDocumentId { .. }) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let message = match &self {
            Self::DocumentNotFound(_) | Self::Store(StoreError::DocumentNotFound(_)) => {
                "Document not found".to_owned()
            }
            _ => self.to_string(),
        };

        (status, axum::Json(json!({ "message": message }))).into_response()
    }
}
