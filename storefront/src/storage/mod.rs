// storefront/src/storage/mod.rs

//! Data access for categories, products and cart items.
//!
//! Handlers and services only ever see `Arc<dyn Storage>`; the concrete
//! backend is picked at startup from configuration.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::{
  CartItem, CartLine, Category, NewCartItem, NewCategory, NewProduct, Product, ProductFilter, MAX_ITEM_QUANTITY,
};

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemStorage;
pub use postgres::PgStorage;

/// Error for a cart line that would hold more than `MAX_ITEM_QUANTITY` units.
pub fn quantity_limit_exceeded() -> AppError {
  AppError::Validation(format!("A cart line may hold at most {} units.", MAX_ITEM_QUANTITY))
}

#[async_trait]
pub trait Storage: Send + Sync {
  // --- Categories ---
  async fn get_categories(&self) -> Result<Vec<Category>>;
  async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;
  async fn create_category(&self, category: NewCategory) -> Result<Category>;

  // --- Products ---

  /// Featured products first, id order otherwise. An unknown category slug
  /// leaves the category criterion unapplied.
  async fn get_products(&self, filter: &ProductFilter) -> Result<Vec<Product>>;
  async fn get_product(&self, id: i32) -> Result<Option<Product>>;
  async fn get_featured_products(&self) -> Result<Vec<Product>>;
  async fn create_product(&self, product: NewProduct) -> Result<Product>;

  // --- Cart ---
  async fn get_cart_items(&self, session_id: &str) -> Result<Vec<CartLine>>;

  /// Adds `item.quantity` to the existing (session, product) row, or inserts
  /// a new row when there is none. Never creates a second row for the pair.
  async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem>;

  /// Sets the quantity, deleting the row when `quantity <= 0`. A missing row
  /// is left alone.
  async fn update_cart_item_quantity(&self, session_id: &str, product_id: i32, quantity: i32) -> Result<()>;
  async fn remove_from_cart(&self, session_id: &str, product_id: i32) -> Result<()>;
  async fn clear_cart(&self, session_id: &str) -> Result<()>;
}

/// Opens the backend named by `config`: PostgreSQL when a database URL is
/// set, the in-memory store otherwise.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn Storage>> {
  match config.database_url.as_deref() {
    Some(url) => {
      let storage = PgStorage::connect(url, config.database_max_connections).await?;
      storage.migrate().await?;
      tracing::info!("Using PostgreSQL storage.");
      Ok(Arc::new(storage))
    }
    None => {
      tracing::warn!("DATABASE_URL not set; falling back to in-memory storage. Data is lost on restart.");
      Ok(Arc::new(MemStorage::new()))
    }
  }
}
