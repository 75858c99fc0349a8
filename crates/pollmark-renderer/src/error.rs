//! Error types for rendering.

/// Error returned by [`render`](crate::render).
///
/// Malformed shortcodes are never errors; they render as literal text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The document id cannot be embedded in widget attributes and API URLs.
    #[error("invalid document id {id:?}: {reason}")]
    InvalidDocumentId {
        /// The rejected id.
        id: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
