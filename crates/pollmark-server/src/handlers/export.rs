//! Document export endpoints.
//!
//! Both endpoints respond with attachments named after the document title.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use pollmark_renderer::Pipeline;
use pollmark_renderer::export::{export_file_name, standalone_document};

use crate::error::ServerError;
use crate::handlers::documents::require_document;
use crate::state::AppState;

/// Build an attachment `Content-Disposition` header.
///
/// Non-ASCII characters are replaced so the value is a valid header.
fn attachment(file_name: &str) -> HeaderValue {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '_' })
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{ascii}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Handle GET /api/documents/{id}/export.html.
///
/// The page always embeds the activation script so widgets work once served.
pub(crate) async fn export_html(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    let document = require_document(&state, id)?;
    let options = state.pipeline.options().clone().with_activation_script(true);
    let output = Pipeline::new(options).render(&document.content, &document.id)?;
    let page = standalone_document(&document.title, &output.html);

    tracing::info!(id = %document.id, "Exported document as HTML");
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
            (
                header::CONTENT_DISPOSITION,
                attachment(&export_file_name(&document.title, "html")),
            ),
        ],
        page,
    )
        .into_response())
}

/// Handle GET /api/documents/{id}/export.mdx.
pub(crate) async fn export_mdx(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    let document = require_document(&state, id)?;

    tracing::info!(id = %document.id, "Exported document as MDX");
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/markdown; charset=utf-8"),
            ),
            (
                header::CONTENT_DISPOSITION,
                attachment(&export_file_name(&document.title, "mdx")),
            ),
        ],
        document.content,
    )
        .into_response())
}
