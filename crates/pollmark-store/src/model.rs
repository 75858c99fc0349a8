//! Stored records and their inputs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document id.
    pub id: String,
    pub title: String,
    /// Raw document text with shortcodes.
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Bumped on every update.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
}

/// Partial update of a document. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl DocumentPatch {
    /// Check whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Wire name of the answer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for recording an answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResponse {
    pub document_id: String,
    /// Question id within the rendered document (`q1`, `q2`, ...).
    pub question_id: String,
    pub response: Answer,
    /// Browser session that submitted the answer, if known.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// A recorded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    pub document_id: String,
    pub question_id: String,
    pub response: Answer,
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-question answer counts.
///
/// Serializes as `{"yes": n, "no": n}`, the shape the widget script reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResponseTally {
    pub yes: usize,
    pub no: usize,
}

impl ResponseTally {
    /// Count one answer.
    pub fn add(&mut self, answer: Answer) {
        match answer {
            Answer::Yes => self.yes += 1,
            Answer::No => self.no += 1,
        }
    }

    /// Total number of answers.
    #[must_use]
    pub fn total(&self) -> usize {
        self.yes + self.no
    }
}

impl<'a> FromIterator<&'a QuestionResponse> for ResponseTally {
    fn from_iter<I: IntoIterator<Item = &'a QuestionResponse>>(iter: I) -> Self {
        let mut tally = Self::default();
        for response in iter {
            tally.add(response.response);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_serializes_camel_case() {
        let timestamp = DateTime::from_timestamp(0, 0).unwrap();
        let document = Document {
            id: "default".to_owned(),
            title: "Title".to_owned(),
            content: "Body".to_owned(),
            created_at: timestamp,
            updated_at: timestamp,
        };

        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["id"], "default");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert_eq!(json["updatedAt"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_new_response_deserialization() {
        let json = r#"{"documentId":"default","questionId":"q1","response":"yes","sessionId":"s-1"}"#;
        let response: NewResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            response,
            NewResponse {
                document_id: "default".to_owned(),
                question_id: "q1".to_owned(),
                response: Answer::Yes,
                session_id: Some("s-1".to_owned()),
            }
        );
    }

    #[test]
    fn test_new_response_session_optional() {
        let json = r#"{"documentId":"d","questionId":"q2","response":"no"}"#;
        let response: NewResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.session_id, None);
        assert_eq!(response.response, Answer::No);
    }

    #[test]
    fn test_invalid_answer_rejected() {
        let json = r#"{"documentId":"d","questionId":"q1","response":"maybe"}"#;
        assert!(serde_json::from_str::<NewResponse>(json).is_err());
    }

    #[test]
    fn test_patch_is_empty() {
        let patch: DocumentPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let patch: DocumentPatch = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert!(!patch.is_empty());
        assert_eq!(patch.content, None);
    }

    #[test]
    fn test_tally_serialization() {
        let tally = ResponseTally { yes: 3, no: 1 };
        assert_eq!(serde_json::to_string(&tally).unwrap(), r#"{"yes":3,"no":1}"#);
        assert_eq!(tally.total(), 4);
    }
}
