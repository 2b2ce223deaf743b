//! PostgreSQL repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DbErr, EntityTrait, QueryOrder};

use inkwell_core::domain::{NewPost, Post};
use inkwell_core::error::RepoError;
use inkwell_core::ports::PostRepository;

use super::connections::PersistenceClient;
use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    client: Arc<PersistenceClient>,
}

impl PostgresPostRepository {
    pub fn new(client: Arc<PersistenceClient>) -> Self {
        Self { client }
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("violates") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let db = self.client.connection().await?;

        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = result.len(), "Listed posts");

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let db = self.client.connection().await?;

        let active_model: post::ActiveModel = new_post.into();
        let model = PostEntity::insert(active_model)
            .exec_with_returning(db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Inserted post");

        Ok(model.into())
    }
}
