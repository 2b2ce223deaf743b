//! Application state - shared across all handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use inkwell_core::RepoError;
use inkwell_core::ports::PostRepository;
use inkwell_infra::{PersistenceClient, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    /// `None` when the repository is not database backed.
    pub database: Option<Arc<PersistenceClient>>,
    pub request_timeout: Duration,
}

impl AppState {
    /// Build the application state. The database pool is opened lazily by
    /// the first request that needs it.
    pub fn new(config: &AppConfig) -> Self {
        let client = Arc::new(PersistenceClient::new(config.database.clone()));
        let posts = Arc::new(PostgresPostRepository::new(client.clone()));

        tracing::info!("Application state initialized");

        Self {
            posts,
            database: Some(client),
            request_timeout: config.request_timeout,
        }
    }

    /// State over an arbitrary repository, with no database client.
    #[cfg(test)]
    pub fn with_repository(posts: Arc<dyn PostRepository>, request_timeout: Duration) -> Self {
        Self {
            posts,
            database: None,
            request_timeout,
        }
    }

    /// Run a repository call, failing with [`RepoError::Timeout`] once the
    /// request timeout elapses.
    pub async fn bounded<T, F>(&self, call: F) -> Result<T, RepoError>
    where
        F: Future<Output = Result<T, RepoError>>,
    {
        tokio::time::timeout(self.request_timeout, call)
            .await
            .map_err(|_| RepoError::Timeout(self.request_timeout))?
    }
}
