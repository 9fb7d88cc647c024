// storefront/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::services::catalog;
use crate::state::AppState;

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = catalog::list_categories(app_state.storage.as_ref()).await?;
  Ok(HttpResponse::Ok().json(categories))
}

#[instrument(name = "handler::get_category", skip(app_state, path), fields(slug = %path.as_str()))]
pub async fn get_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let category = catalog::get_category(app_state.storage.as_ref(), &path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(category))
}
