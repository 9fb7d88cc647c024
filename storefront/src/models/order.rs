// storefront/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CartLine;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  #[default]
  Cod,
  Upi,
  Card,
}

/// Priced view of a session's cart. Amounts are two-decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
  pub items: Vec<CartLine>,
  pub item_count: i64,
  pub subtotal: String,
  pub delivery_fee: String,
  pub total: String,
}

/// Returned by a simulated checkout. Orders are not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
  pub order_id: String,
  pub session_id: String,
  pub item_count: i64,
  pub subtotal: String,
  pub delivery_fee: String,
  pub total: String,
  pub payment_method: PaymentMethod,
  pub estimated_delivery: String,
  pub placed_at: DateTime<Utc>,
}
