//! In-memory post repository - used by tests and for running without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use inkwell_core::domain::{NewPost, Post};
use inkwell_core::error::RepoError;
use inkwell_core::ports::PostRepository;

#[derive(Default)]
struct Store {
    posts: Vec<Post>,
    last_id: i64,
    last_created_at: Option<DateTime<Utc>>,
}

/// In-memory post repository backed by a `Vec` behind an async RwLock.
///
/// Ids increase by one per insert and timestamps never go backwards, which
/// mirrors a `BIGSERIAL` / `DEFAULT now()` table.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.store.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts = store.posts.clone();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(posts)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let now = match store.last_created_at {
            Some(last) => Utc::now().max(last),
            None => Utc::now(),
        };
        store.last_id += 1;
        store.last_created_at = Some(now);

        let (title, content) = new_post.into_parts();
        let post = Post {
            id: store.last_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        };
        store.posts.push(post.clone());

        Ok(post)
    }
}
