// storefront/src/services/checkout.rs

//! Simulated checkout. Nothing is charged and no order is stored: the
//! cart is priced, a fixed processing delay elapses, and the cart is
//! emptied.

use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::cart::CartTotals;
use crate::errors::{AppError, Result};
use crate::models::price::format_cents;
use crate::models::{OrderConfirmation, PaymentMethod};
use crate::storage::Storage;

pub const ESTIMATED_DELIVERY: &str = "30-45 minutes";

/// Delivery details from the checkout form. Only logged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub phone: Option<String>,
  pub address: Option<String>,
  pub city: Option<String>,
  pub pincode: Option<String>,
}

impl CustomerDetails {
  /// A field may be omitted, but a supplied field may not be blank.
  pub fn validate(&self) -> Result<()> {
    let fields = [
      ("firstName", &self.first_name),
      ("lastName", &self.last_name),
      ("phone", &self.phone),
      ("address", &self.address),
      ("city", &self.city),
      ("pincode", &self.pincode),
    ];
    for (name, value) in fields {
      if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        return Err(AppError::Validation(format!("Customer field '{}' must not be blank.", name)));
      }
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
  #[serde(default)]
  pub payment_method: PaymentMethod,
  #[serde(default)]
  pub customer: Option<CustomerDetails>,
}

/// Knobs for the simulated order processing.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutSettings {
  pub delivery_fee_cents: i64,
  pub processing_delay: Duration,
}

const ORDER_ID_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ORDER_ID_SUFFIX_LEN: usize = 9;

/// Nine base-36 digits of `bits`, least significant first.
fn order_id_suffix(mut bits: u128) -> String {
  let mut suffix = String::with_capacity(ORDER_ID_SUFFIX_LEN);
  for _ in 0..ORDER_ID_SUFFIX_LEN {
    suffix.push(char::from(ORDER_ID_ALPHABET[(bits % 36) as usize]));
    bits /= 36;
  }
  suffix
}

/// `SHF` followed by nine uppercase alphanumerics.
pub fn generate_order_id() -> String {
  format!("SHF{}", order_id_suffix(Uuid::new_v4().as_u128()))
}

#[instrument(name = "checkout::simulate_processing")]
async fn simulate_processing(delay: Duration) {
  info!("Simulating order processing.");
  tokio::time::sleep(delay).await;
}

#[instrument(
  name = "checkout::place_order",
  skip(storage, request, settings),
  fields(payment_method = ?request.payment_method)
)]
pub async fn place_order(
  storage: &dyn Storage,
  session_id: &str,
  request: CheckoutRequest,
  settings: CheckoutSettings,
) -> Result<OrderConfirmation> {
  if let Some(customer) = &request.customer {
    customer.validate()?;
    info!(city = ?customer.city, pincode = ?customer.pincode, "Delivery details received.");
  }

  let lines = storage.get_cart_items(session_id).await?;
  if lines.is_empty() {
    warn!("Checkout attempted with an empty cart.");
    return Err(AppError::Validation("Cannot check out an empty cart.".to_string()));
  }
  let totals = CartTotals::compute(&lines, settings.delivery_fee_cents)?;

  simulate_processing(settings.processing_delay).await;
  storage.clear_cart(session_id).await?;

  let confirmation = OrderConfirmation {
    order_id: generate_order_id(),
    session_id: session_id.to_string(),
    item_count: totals.item_count,
    subtotal: format_cents(totals.subtotal_cents),
    delivery_fee: format_cents(totals.delivery_fee_cents),
    total: format_cents(totals.total_cents),
    payment_method: request.payment_method,
    estimated_delivery: ESTIMATED_DELIVERY.to_string(),
    placed_at: Utc::now(),
  };
  info!(
    "Order {} placed: {} items, total {}.",
    confirmation.order_id, confirmation.item_count, confirmation.total
  );
  Ok(confirmation)
}
