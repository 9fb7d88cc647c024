// storefront/src/web/routes.rs

use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, category_handlers, checkout_handlers, product_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Extractor failures become `AppError::Validation` so every 4xx shares the
// `{"error": ...}` body shape.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
  AppError::Validation(format!("Invalid JSON body: {}", err)).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> error::Error {
  AppError::Validation(format!("Invalid query string: {}", err)).into()
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> error::Error {
  AppError::Validation(format!("Invalid path parameter: {}", err)).into()
}

/// Registers every `/api` route plus the extractor configs they rely on.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .service(
      web::scope("/api")
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/categories")
            .route("", web::get().to(category_handlers::list_categories_handler))
            .route("/{slug}", web::get().to(category_handlers::get_category_handler)),
        )
        .service(
          web::scope("/products")
            .route("", web::get().to(product_handlers::list_products_handler))
            // Must precede "/{product_id}".
            .route("/featured", web::get().to(product_handlers::list_featured_products_handler))
            .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
        )
        .service(
          web::scope("/cart")
            .route("", web::get().to(cart_handlers::get_cart_handler))
            .route("", web::post().to(cart_handlers::add_to_cart_handler))
            .route("", web::delete().to(cart_handlers::clear_cart_handler))
            .route("/summary", web::get().to(cart_handlers::get_cart_summary_handler))
            .route("/{product_id}", web::put().to(cart_handlers::update_quantity_handler))
            .route("/{product_id}", web::delete().to(cart_handlers::remove_from_cart_handler)),
        )
        .route("/checkout", web::post().to(checkout_handlers::place_order_handler)),
    );
}
