//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM
//!
//! Build with `--no-default-features` for the in-memory repository only.

pub mod database;

pub use database::{DatabaseConfig, InMemoryPostRepository, parse_or};

#[cfg(feature = "postgres")]
pub use database::{PersistenceClient, PostgresPostRepository};
