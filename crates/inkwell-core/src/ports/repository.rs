use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Post repository - the only access path to stored posts.
///
/// Posts are append-only: there is no update or delete operation.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest `created_at` first. Posts sharing a timestamp are
    /// ordered by descending id.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert a post and return the stored record, including the id and
    /// timestamps assigned by the store. Every call creates a new row.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;
}
