// storefront/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::ProductFilter;
use crate::services::catalog::{self, ProductSort};
use crate::state::AppState;

#[derive(Deserialize, Debug, Default)]
pub struct ListProductsQuery {
  pub category: Option<String>, // Category slug
  pub search: Option<String>,
  #[serde(default)]
  pub sort: ProductSort,
}

#[instrument(name = "handler::list_products", skip(app_state, query_params), fields(category = ?query_params.category, search = ?query_params.search))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let ListProductsQuery { category, search, sort } = query_params.into_inner();
  let filter = ProductFilter {
    category_slug: category,
    search,
  };

  let products = catalog::list_products(app_state.storage.as_ref(), filter, sort).await?;
  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::list_featured_products", skip(app_state))]
pub async fn list_featured_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = catalog::list_featured(app_state.storage.as_ref()).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = *path))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let product = catalog::get_product(app_state.storage.as_ref(), product_id).await?;
  info!("Product {} fetched successfully.", product_id);
  Ok(HttpResponse::Ok().json(product))
}
