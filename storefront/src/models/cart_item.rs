// storefront/src/models/cart_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Product;

/// Most units of one product a single cart line may hold.
pub const MAX_ITEM_QUANTITY: i32 = 999;

/// Quantity of a line after adding `added` units, or `None` once the
/// result would pass `MAX_ITEM_QUANTITY`.
pub fn merged_quantity(current: i32, added: i32) -> Option<i32> {
  current.checked_add(added).filter(|q| *q <= MAX_ITEM_QUANTITY)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub id: i32,
  pub session_id: String, // Opaque, client generated; not tied to any account
  pub product_id: i32,
  pub quantity: i32,
  pub created_at: DateTime<Utc>,
}

/// Insert payload for `Storage::add_to_cart`; `quantity` is the delta to add.
#[derive(Debug, Clone)]
pub struct NewCartItem {
  pub session_id: String,
  pub product_id: i32,
  pub quantity: i32,
}

/// A cart item joined with the product it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
  #[serde(flatten)]
  pub item: CartItem,
  pub product: Product,
}
