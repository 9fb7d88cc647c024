// storefront/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::price::{self, InvalidPrice};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: i32,
  pub name: String,
  pub description: Option<String>,
  pub price: String, // Decimal kept as text, e.g. "45.00"
  pub category_id: Option<i32>,
  pub image_url: Option<String>,
  pub unit: String,
  pub stock: i32,
  pub is_available: bool,
  pub is_featured: bool,
  pub tags: Vec<String>,
  pub created_at: DateTime<Utc>,
}

impl Product {
  pub fn price_cents(&self) -> Result<i64, InvalidPrice> {
    price::parse_cents(&self.price)
  }

  /// Case-insensitive substring match against name, description or any tag.
  /// `needle` must already be lowercased.
  pub fn matches_search(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle)
      || self
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(needle))
      || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
  }
}

/// Insert payload for a product; only seeding creates products.
#[derive(Debug, Clone)]
pub struct NewProduct {
  pub name: String,
  pub description: Option<String>,
  pub price: String,
  pub category_id: Option<i32>,
  pub image_url: Option<String>,
  pub unit: String,
  pub stock: i32,
  pub is_available: bool,
  pub is_featured: bool,
  pub tags: Vec<String>,
}

/// Listing criteria understood by every storage backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
  pub category_slug: Option<String>,
  pub search: Option<String>,
}

impl ProductFilter {
  /// Drops blank criteria so `?search=` behaves like no search at all.
  pub fn normalized(self) -> Self {
    let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    Self {
      category_slug: clean(self.category_slug),
      search: clean(self.search),
    }
  }
}

/// Orders `products` featured-first while preserving the incoming order
/// among equals.
pub fn sort_featured_first(products: &mut [Product]) {
  products.sort_by_key(|p| !p.is_featured);
}
