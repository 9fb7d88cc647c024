// storefront/src/services/cart.rs

use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::price::format_cents;
use crate::models::{CartItem, CartLine, CartSummary, NewCartItem, MAX_ITEM_QUANTITY};
use crate::storage::{quantity_limit_exceeded, Storage};

/// Quantity used when an add-to-cart request does not name one.
pub const DEFAULT_ADD_QUANTITY: i32 = 1;

/// Adds `quantity` units of a product to the session's cart, merging with
/// an existing line for the same product.
///
/// Fails with `Validation` for a non-positive quantity, a line that would
/// pass `MAX_ITEM_QUANTITY` or an unavailable product, and with `NotFound`
/// for an unknown product.
#[instrument(name = "cart::add_item", skip(storage))]
pub async fn add_item(storage: &dyn Storage, session_id: &str, product_id: i32, quantity: Option<i32>) -> Result<CartItem> {
  let quantity = quantity.unwrap_or(DEFAULT_ADD_QUANTITY);
  if quantity <= 0 {
    warn!("Invalid quantity ({}) provided. Must be positive.", quantity);
    return Err(AppError::Validation("Quantity must be a positive number.".to_string()));
  }
  if quantity > MAX_ITEM_QUANTITY {
    warn!("Quantity {} is over the per-line limit.", quantity);
    return Err(quantity_limit_exceeded());
  }

  let product = storage.get_product(product_id).await?.ok_or_else(|| {
    warn!("Product {} not found for cart.", product_id);
    AppError::NotFound(format!("Product with ID {} not found.", product_id))
  })?;
  if !product.is_available {
    warn!("Product {} ('{}') is not available.", product.id, product.name);
    return Err(AppError::Validation(format!("{} is currently unavailable.", product.name)));
  }

  let item = storage
    .add_to_cart(NewCartItem {
      session_id: session_id.to_string(),
      product_id,
      quantity,
    })
    .await?;
  info!(
    "Cart item {} for product {} now has quantity {}.",
    item.id, item.product_id, item.quantity
  );
  Ok(item)
}

/// Sets a line's quantity; zero or less removes the line.
#[instrument(name = "cart::update_quantity", skip(storage))]
pub async fn update_quantity(storage: &dyn Storage, session_id: &str, product_id: i32, quantity: i32) -> Result<()> {
  if quantity > MAX_ITEM_QUANTITY {
    warn!("Quantity {} is over the per-line limit.", quantity);
    return Err(quantity_limit_exceeded());
  }
  storage.update_cart_item_quantity(session_id, product_id, quantity).await?;
  if quantity <= 0 {
    info!("Quantity {} removed product {} from cart.", quantity, product_id);
  }
  Ok(())
}

#[instrument(name = "cart::remove_item", skip(storage))]
pub async fn remove_item(storage: &dyn Storage, session_id: &str, product_id: i32) -> Result<()> {
  storage.remove_from_cart(session_id, product_id).await
}

#[instrument(name = "cart::clear", skip(storage))]
pub async fn clear(storage: &dyn Storage, session_id: &str) -> Result<()> {
  storage.clear_cart(session_id).await?;
  info!("Cart cleared.");
  Ok(())
}

pub async fn lines(storage: &dyn Storage, session_id: &str) -> Result<Vec<CartLine>> {
  storage.get_cart_items(session_id).await
}

/// Money totals for a set of cart lines, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
  pub item_count: i64,
  pub subtotal_cents: i64,
  pub delivery_fee_cents: i64,
  pub total_cents: i64,
}

impl CartTotals {
  /// The delivery fee only applies to a non-empty cart.
  pub fn compute(lines: &[CartLine], delivery_fee_cents: i64) -> Result<Self> {
    let mut item_count = 0i64;
    let mut subtotal_cents = 0i64;
    for line in lines {
      let unit_cents = line
        .product
        .price_cents()
        .map_err(|e| AppError::Internal(format!("Product {}: {}", line.product.id, e)))?;
      let quantity = i64::from(line.item.quantity);
      item_count += quantity;
      subtotal_cents += unit_cents * quantity;
    }
    let delivery_fee_cents = if lines.is_empty() { 0 } else { delivery_fee_cents };
    Ok(Self {
      item_count,
      subtotal_cents,
      delivery_fee_cents,
      total_cents: subtotal_cents + delivery_fee_cents,
    })
  }
}

pub fn summarize(lines: Vec<CartLine>, delivery_fee_cents: i64) -> Result<CartSummary> {
  let totals = CartTotals::compute(&lines, delivery_fee_cents)?;
  Ok(CartSummary {
    items: lines,
    item_count: totals.item_count,
    subtotal: format_cents(totals.subtotal_cents),
    delivery_fee: format_cents(totals.delivery_fee_cents),
    total: format_cents(totals.total_cents),
  })
}

pub async fn summary(storage: &dyn Storage, session_id: &str, delivery_fee_cents: i64) -> Result<CartSummary> {
  let lines = storage.get_cart_items(session_id).await?;
  summarize(lines, delivery_fee_cents)
}
