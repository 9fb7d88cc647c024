// storefront/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::cart;
use crate::state::AppState;
use crate::web::SessionId;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: i32,
  pub quantity: Option<i32>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityRequestPayload {
  pub quantity: i32,
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_cart", skip(app_state, session), fields(session_id = %session))]
pub async fn get_cart_handler(app_state: web::Data<AppState>, session: SessionId) -> Result<HttpResponse, AppError> {
  let lines = cart::lines(app_state.storage.as_ref(), session.as_str()).await?;
  Ok(HttpResponse::Ok().json(lines))
}

#[instrument(name = "handler::get_cart_summary", skip(app_state, session), fields(session_id = %session))]
pub async fn get_cart_summary_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let summary = cart::summary(
    app_state.storage.as_ref(),
    session.as_str(),
    app_state.config.delivery_fee_cents,
  )
  .await?;
  Ok(HttpResponse::Ok().json(summary))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, session),
    fields(session_id = %session, product_id = %req_payload.product_id, quantity = ?req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let AddToCartRequestPayload { product_id, quantity } = req_payload.into_inner();
  let item = cart::add_item(app_state.storage.as_ref(), session.as_str(), product_id, quantity).await?;

  info!(
    "Add to cart successful for session: {}. Item ID: {}, Product ID: {}, New Quantity: {}",
    session, item.id, item.product_id, item.quantity
  );
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(
    name = "handler::update_cart_quantity",
    skip(app_state, path, req_payload, session),
    fields(session_id = %session, product_id = *path, quantity = %req_payload.quantity)
)]
pub async fn update_quantity_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
  req_payload: web::Json<UpdateQuantityRequestPayload>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  cart::update_quantity(
    app_state.storage.as_ref(),
    session.as_str(),
    product_id,
    req_payload.quantity,
  )
  .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Cart updated successfully." })))
}

#[instrument(name = "handler::remove_from_cart", skip(app_state, path, session), fields(session_id = %session, product_id = *path))]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  cart::remove_item(app_state.storage.as_ref(), session.as_str(), path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Item removed from cart." })))
}

#[instrument(name = "handler::clear_cart", skip(app_state, session), fields(session_id = %session))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>, session: SessionId) -> Result<HttpResponse, AppError> {
  cart::clear(app_state.storage.as_ref(), session.as_str()).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Cart cleared." })))
}
