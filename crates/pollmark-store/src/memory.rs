//! In-memory store.
//!
//! Provides [`MemoryStore`], which implements both [`DocumentStore`] and
//! [`ResponseStore`]. Contents are lost when the process exits.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::model::{
    Document, DocumentPatch, NewDocument, NewResponse, QuestionResponse, ResponseTally,
};
use crate::seed::{DEFAULT_DOCUMENT_CONTENT, DEFAULT_DOCUMENT_ID, DEFAULT_DOCUMENT_TITLE};
use crate::store::{DocumentStore, ResponseStore, StoreError};

/// Thread-safe in-memory document and response store.
///
/// # Example
///
/// ```
/// use pollmark_store::{Answer, DocumentStore, MemoryStore, NewResponse, ResponseStore};
///
/// let store = MemoryStore::seeded();
/// assert!(store.get("default").unwrap().is_some());
///
/// store
///     .record_response(NewResponse {
///         document_id: "default".to_owned(),
///         question_id: "q1".to_owned(),
///         response: Answer::Yes,
///         session_id: None,
///     })
///     .unwrap();
///
/// assert_eq!(store.count_responses("default", "q1").unwrap().yes, 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
    responses: RwLock<Vec<QuestionResponse>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the showcase document under id `default`.
    #[must_use]
    pub fn seeded() -> Self {
        let now = Utc::now();
        let store = Self::new();
        store.write_documents().push(Document {
            id: DEFAULT_DOCUMENT_ID.to_owned(),
            title: DEFAULT_DOCUMENT_TITLE.to_owned(),
            content: DEFAULT_DOCUMENT_CONTENT.to_owned(),
            created_at: now,
            updated_at: now,
        });
        store
    }

    /// Create a store, seeded or empty.
    #[must_use]
    pub fn with_seed(seed: bool) -> Self {
        if seed { Self::seeded() } else { Self::new() }
    }

    /// Number of stored documents.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.read_documents().len()
    }

    // A panic while holding a lock cannot leave a half-applied update behind:
    // every mutation is a single push, retain or field assignment. When both
    // locks are taken, documents is always locked before responses.
    fn read_documents(&self) -> RwLockReadGuard<'_, Vec<Document>> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_documents(&self) -> RwLockWriteGuard<'_, Vec<Document>> {
        self.documents.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_responses(&self) -> RwLockReadGuard<'_, Vec<QuestionResponse>> {
        self.responses.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_responses(&self) -> RwLockWriteGuard<'_, Vec<QuestionResponse>> {
        self.responses.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryStore {
    fn list(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.read_documents().clone())
    }

    fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.read_documents().iter().find(|d| d.id == id).cloned())
    }

    fn create(&self, document: NewDocument) -> Result<Document, StoreError> {
        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4().to_string(),
            title: document.title,
            content: document.content,
            created_at: now,
            updated_at: now,
        };

        self.write_documents().push(document.clone());
        tracing::info!(id = %document.id, title = %document.title, "Created document");
        Ok(document)
    }

    fn update(&self, id: &str, patch: DocumentPatch) -> Result<Option<Document>, StoreError> {
        let mut documents = self.write_documents();
        let Some(document) = documents.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            document.title = title;
        }
        if let Some(content) = patch.content {
            document.content = content;
        }
        document.updated_at = Utc::now();

        tracing::info!(id, "Updated document");
        Ok(Some(document.clone()))
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        // Responses are purged while documents is still locked.
        let mut documents = self.write_documents();
        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Ok(false);
        }

        let mut responses = self.write_responses();
        let before = responses.len();
        responses.retain(|r| r.document_id != id);
        tracing::info!(id, responses = before - responses.len(), "Deleted document");
        Ok(true)
    }
}

impl ResponseStore for MemoryStore {
    fn record_response(&self, response: NewResponse) -> Result<QuestionResponse, StoreError> {
        if response.question_id.trim().is_empty() {
            return Err(StoreError::InvalidInput {
                field: "questionId",
                reason: "must not be empty",
            });
        }
        // Held until the push so the document cannot be deleted in between.
        let documents = self.read_documents();
        if !documents.iter().any(|d| d.id == response.document_id) {
            return Err(StoreError::DocumentNotFound(response.document_id));
        }

        let record = QuestionResponse {
            id: Uuid::new_v4().to_string(),
            document_id: response.document_id,
            question_id: response.question_id,
            response: response.response,
            session_id: response.session_id.filter(|s| !s.is_empty()),
            created_at: Utc::now(),
        };

        self.write_responses().push(record.clone());
        drop(documents);
        tracing::info!(
            document_id = %record.document_id,
            question_id = %record.question_id,
            response = %record.response,
            "Recorded response"
        );
        Ok(record)
    }

    fn responses(
        &self,
        document_id: &str,
        question_id: &str,
    ) -> Result<Vec<QuestionResponse>, StoreError> {
        Ok(self
            .read_responses()
            .iter()
            .filter(|r| r.document_id == document_id && r.question_id == question_id)
            .cloned()
            .collect())
    }

    fn count_responses(
        &self,
        document_id: &str,
        question_id: &str,
    ) -> Result<ResponseTally, StoreError> {
        Ok(self
            .read_responses()
            .iter()
            .filter(|r| r.document_id == document_id && r.question_id == question_id)
            .collect())
    }
}
