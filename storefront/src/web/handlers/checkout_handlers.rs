// storefront/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::services::checkout::{self, CheckoutRequest};
use crate::state::AppState;
use crate::web::SessionId;

/// An empty body checks out with the defaults (cash on delivery, no
/// customer details); anything else must be a valid `CheckoutRequest`.
fn parse_checkout_body(body: &[u8]) -> Result<CheckoutRequest, AppError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(CheckoutRequest::default());
  }
  serde_json::from_slice(body).map_err(|e| {
    warn!("Rejected checkout payload: {}", e);
    AppError::Validation(format!("Invalid checkout request: {}", e))
  })
}

#[instrument(name = "handler::place_order", skip(app_state, body, session), fields(session_id = %session))]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  body: web::Bytes,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let request = parse_checkout_body(&body)?;
  info!("Checkout initiation attempt by session: {}", session);

  let confirmation = checkout::place_order(
    app_state.storage.as_ref(),
    session.as_str(),
    request,
    app_state.checkout_settings(),
  )
  .await?;

  Ok(HttpResponse::Ok().json(confirmation))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::PaymentMethod;

  #[test]
  fn empty_body_uses_defaults() {
    let request = parse_checkout_body(b"  ").unwrap();
    assert_eq!(request.payment_method, PaymentMethod::Cod);
    assert!(request.customer.is_none());
  }

  #[test]
  fn body_fields_are_read() {
    let request = parse_checkout_body(br#"{"paymentMethod":"card","customer":{"city":"Pune"}}"#).unwrap();
    assert_eq!(request.payment_method, PaymentMethod::Card);
    assert_eq!(request.customer.unwrap().city.as_deref(), Some("Pune"));
  }

  #[test]
  fn unknown_payment_method_is_a_validation_error() {
    let err = parse_checkout_body(br#"{"paymentMethod":"barter"}"#).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
  }
}
