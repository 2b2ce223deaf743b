//! Post handlers.

use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, web};

use inkwell_core::domain::{NewPost, TITLE_AND_CONTENT_REQUIRED};
use inkwell_shared::CreatePostRequest;

use crate::middleware::error::{AppError, AppResult, PostOperation};
use crate::state::AppState;

/// GET /api/posts - all posts, newest first.
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .bounded(state.posts.list())
        .await
        .map_err(AppError::persistence(PostOperation::List))?;

    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts - publish a new post.
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate before touching the database
    let new_post = NewPost::new(req.title.as_deref(), req.content.as_deref())?;

    let post = state
        .bounded(state.posts.create(new_post))
        .await
        .map_err(AppError::persistence(PostOperation::Create))?;

    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(post))
}

/// A body that is not a JSON object with string fields is treated like one
/// with the fields missing.
pub fn reject_body(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Unreadable post body");
    AppError::BadRequest(TITLE_AND_CONTENT_REQUIRED.to_string()).into()
}
