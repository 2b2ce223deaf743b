//! Post persistence: connection management and repository adapters.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

pub use connections::{DatabaseConfig, parse_or};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use connections::PersistenceClient;
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;
