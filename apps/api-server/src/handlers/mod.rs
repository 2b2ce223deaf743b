//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpResponse, ResponseError, web};

use crate::middleware::error::AppError;
use crate::middleware::no_store;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(posts::reject_body))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::resource("/posts")
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post))
                        .wrap(no_store()),
                ),
        );
}

/// Fallback for unmatched routes.
pub async fn not_found() -> HttpResponse {
    AppError::NotFound.error_response()
}

#[cfg(test)]
mod tests;
