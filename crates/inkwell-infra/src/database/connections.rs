use std::env;
use std::time::Duration;

use inkwell_core::ConfigError;

#[cfg(feature = "postgres")]
use inkwell_core::RepoError;
#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn};
#[cfg(feature = "postgres")]
use tokio::sync::OnceCell;

/// Configuration for the posts database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub const URL_VAR: &'static str = "DATABASE_URL";

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// A missing or blank `DATABASE_URL` is an error. Pool settings fall back
    /// to defaults when unset but must parse when present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(Self::URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(Self::URL_VAR))?;

        Ok(Self {
            url,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?,
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_CONNECT_TIMEOUT_SECS",
                10,
            )?),
        })
    }
}

/// Parse an optional variable, using `default` when it is unset.
pub fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// Shared query-execution handle for the posts database.
///
/// The connection pool is opened on first use and at most once for the
/// lifetime of the client; concurrent first callers wait on the same
/// initialization. Share one client behind an `Arc` for the whole process.
///
/// # Example
/// ```ignore
/// let client = Arc::new(PersistenceClient::from_env()?);
/// let repo = PostgresPostRepository::new(client.clone());
/// let posts = repo.list().await?;
/// ```
#[cfg(feature = "postgres")]
pub struct PersistenceClient {
    config: DatabaseConfig,
    conn: OnceCell<DbConn>,
}

#[cfg(feature = "postgres")]
impl PersistenceClient {
    /// Build a client without connecting.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            conn: OnceCell::new(),
        }
    }

    /// Build a client from the environment. Fails with
    /// [`ConfigError::Missing`] when `DATABASE_URL` is absent, before any
    /// network attempt.
    pub fn from_env() -> Result<Self, ConfigError> {
        DatabaseConfig::from_env().map(Self::new)
    }

    /// Wrap an already open connection.
    pub fn with_connection(config: DatabaseConfig, conn: DbConn) -> Self {
        Self {
            config,
            conn: OnceCell::new_with(Some(conn)),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Whether the pool has been opened.
    pub fn is_connected(&self) -> bool {
        self.conn.initialized()
    }

    /// The shared connection, opened on first call.
    ///
    /// A failed attempt leaves the client unconnected, so the next call tries
    /// again.
    pub async fn connection(&self) -> Result<&DbConn, RepoError> {
        self.connection_with(|| self.connect()).await
    }

    async fn connection_with<F, Fut>(&self, connect: F) -> Result<&DbConn, RepoError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<DbConn, RepoError>>,
    {
        self.conn.get_or_try_init(connect).await
    }

    async fn connect(&self) -> Result<DbConn, RepoError> {
        tracing::info!("Opening posts database pool...");

        let opts = ConnectOptions::new(&self.config.url)
            .max_connections(self.config.max_connections)
            .min_connections(self.config.min_connections)
            .connect_timeout(self.config.connect_timeout)
            .acquire_timeout(self.config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to open posts database pool");
            RepoError::Connection(e.to_string())
        })?;

        tracing::info!(
            "Posts database connected (pool: {}..{})",
            self.config.min_connections,
            self.config.max_connections
        );

        Ok(conn)
    }
}
