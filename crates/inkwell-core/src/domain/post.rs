use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Message returned to clients when a submission is missing a field.
pub const TITLE_AND_CONTENT_REQUIRED: &str = "Title and content are required";

/// Post entity - a published blog entry.
///
/// `id` and both timestamps are assigned by the persistence layer. Posts are
/// never modified after insertion, so `updated_at` always equals the insert
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated submission, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
}

impl NewPost {
    /// Validate and normalize an author submission.
    ///
    /// Surrounding whitespace is trimmed from both fields before checking
    /// them, so whitespace-only values are rejected. Inner whitespace, such
    /// as the newlines separating paragraphs, is kept as is.
    pub fn new(title: Option<&str>, content: Option<&str>) -> Result<Self, DomainError> {
        let title = title.map(str::trim).unwrap_or_default();
        let content = content.map(str::trim).unwrap_or_default();

        if title.is_empty() || content.is_empty() {
            return Err(DomainError::Validation(
                TITLE_AND_CONTENT_REQUIRED.to_string(),
            ));
        }

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Split into owned `(title, content)`.
    pub fn into_parts(self) -> (String, String) {
        (self.title, self.content)
    }
}
