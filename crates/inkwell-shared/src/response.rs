//! Error body returned by every failing API call.

use serde::{Deserialize, Serialize};

/// `{ "error": "<message>" }`
///
/// The message is always one of a small set of fixed strings. Internal error
/// detail never ends up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn fetch_posts_failed() -> Self {
        Self::new("Failed to fetch posts")
    }

    pub fn create_post_failed() -> Self {
        Self::new("Failed to create post")
    }

    pub fn not_found() -> Self {
        Self::new("Not found")
    }
}
