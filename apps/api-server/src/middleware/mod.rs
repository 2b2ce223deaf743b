//! Middleware modules.

pub mod error;
pub mod no_store;

pub use no_store::no_store;
