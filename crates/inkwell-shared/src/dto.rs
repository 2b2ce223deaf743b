//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/posts`.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a validation failure rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
