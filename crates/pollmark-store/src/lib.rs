//! Document and response storage for Pollmark.
//!
//! The [`DocumentStore`] and [`ResponseStore`] traits abstract persistence
//! away from the HTTP layer. [`MemoryStore`] implements both and is what the
//! server runs with.
//!
//! Responses are tallied per `(document id, question id)` pair. Question ids
//! come from rendering (`q1`, `q2`, ...) and are positional, so editing a
//! document can shift which question a stored tally belongs to.

mod memory;
mod model;
mod seed;
mod store;

pub use memory::MemoryStore;
pub use model::{
    Answer, Document, DocumentPatch, NewDocument, NewResponse, QuestionResponse, ResponseTally,
};
pub use seed::{DEFAULT_DOCUMENT_CONTENT, DEFAULT_DOCUMENT_ID, DEFAULT_DOCUMENT_TITLE};
pub use store::{DocumentStore, ResponseStore, StoreError};
