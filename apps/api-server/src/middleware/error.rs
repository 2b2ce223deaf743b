//! Error handling - maps failures to `{ "error": ... }` responses.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use inkwell_core::{DomainError, RepoError};
use inkwell_shared::ErrorResponse;

/// The post operation a persistence failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOperation {
    List,
    Create,
}

impl PostOperation {
    /// The only detail a client gets about a failed operation.
    fn error_body(self) -> ErrorResponse {
        match self {
            PostOperation::List => ErrorResponse::fetch_posts_failed(),
            PostOperation::Create => ErrorResponse::create_post_failed(),
        }
    }
}

impl fmt::Display for PostOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostOperation::List => write!(f, "list posts"),
            PostOperation::Create => write!(f, "create post"),
        }
    }
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Failed to {operation}: {source}")]
    Persistence {
        operation: PostOperation,
        #[source]
        source: RepoError,
    },
}

impl AppError {
    pub fn persistence(operation: PostOperation) -> impl FnOnce(RepoError) -> Self {
        move |source| AppError::Persistence { operation, source }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(detail) => {
                tracing::debug!("Rejected request: {}", detail);
                ErrorResponse::new(detail.as_str())
            }
            AppError::NotFound => ErrorResponse::not_found(),
            AppError::Persistence { operation, source } => {
                tracing::error!(
                    operation = %operation,
                    error = %source,
                    "Database error"
                );
                operation.error_body()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
