//! Store traits and error type.

use crate::model::{
    Document, DocumentPatch, NewDocument, NewResponse, QuestionResponse, ResponseTally,
};

/// Error from store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The referenced document does not exist.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// An input field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Persistence for documents.
///
/// Implementations must be thread-safe (`Send + Sync`) so a single store can
/// back all request handlers.
pub trait DocumentStore: Send + Sync {
    /// List all documents in creation order.
    fn list(&self) -> Result<Vec<Document>, StoreError>;

    /// Fetch a document by id.
    fn get(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create a document with a fresh id.
    fn create(&self, document: NewDocument) -> Result<Document, StoreError>;

    /// Apply a partial update and bump `updated_at`.
    ///
    /// Returns `None` if the document does not exist.
    fn update(&self, id: &str, patch: DocumentPatch) -> Result<Option<Document>, StoreError>;

    /// Delete a document and its responses.
    ///
    /// Returns `false` if the document did not exist.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Persistence for question responses.
///
/// Every submission is stored; there is no one-answer-per-session rule.
pub trait ResponseStore: Send + Sync {
    /// Record one answer.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DocumentNotFound`] if the document does not
    /// exist, or [`StoreError::InvalidInput`] for an empty question id.
    fn record_response(&self, response: NewResponse) -> Result<QuestionResponse, StoreError>;

    /// All answers for one question, in submission order.
    fn responses(
        &self,
        document_id: &str,
        question_id: &str,
    ) -> Result<Vec<QuestionResponse>, StoreError>;

    /// Answer counts for one question. Unknown questions count zero.
    fn count_responses(
        &self,
        document_id: &str,
        question_id: &str,
    ) -> Result<ResponseTally, StoreError> {
        Ok(self
            .responses(document_id, question_id)?
            .iter()
            .collect::<ResponseTally>())
    }
}
