//! Response headers that keep every cache layer from storing a response.

use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

pub const CACHE_CONTROL_NO_STORE: &str = "no-cache, no-store, must-revalidate";

/// Marks every response, success or error, as non-cacheable so clients
/// always see the current database state.
pub fn no_store() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::CACHE_CONTROL, CACHE_CONTROL_NO_STORE))
        .add((header::PRAGMA, "no-cache"))
        .add((header::EXPIRES, "0"))
}
