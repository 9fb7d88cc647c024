// storefront/src/models/category.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  pub id: i32,
  pub name: String,
  pub slug: String, // Unique; doubles as the URL and filter key
  pub description: Option<String>,
  pub image_url: Option<String>,
}

/// Insert payload for a category; only seeding creates categories.
#[derive(Debug, Clone)]
pub struct NewCategory {
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub image_url: Option<String>,
}
