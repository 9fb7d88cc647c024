// storefront/src/services/catalog.rs

//! Read-only catalog queries: categories, product listing and lookups.

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::{Category, Product, ProductFilter};
use crate::storage::Storage;

/// Listing orders offered by the product grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSort {
  /// Featured first, storage order otherwise.
  #[default]
  Featured,
  PriceLow,
  PriceHigh,
  Newest,
}

pub async fn list_categories(storage: &dyn Storage) -> Result<Vec<Category>> {
  storage.get_categories().await
}

#[instrument(name = "catalog::get_category", skip(storage))]
pub async fn get_category(storage: &dyn Storage, slug: &str) -> Result<Category> {
  storage.get_category_by_slug(slug).await?.ok_or_else(|| {
    warn!("Category '{}' not found.", slug);
    AppError::NotFound(format!("Category '{}' not found.", slug))
  })
}

/// Lists products matching `filter`, then reorders them by `sort`.
///
/// Storage already returns featured-first order, so `ProductSort::Featured`
/// is a pass-through. Every other sort is stable with respect to that order.
#[instrument(name = "catalog::list_products", skip(storage))]
pub async fn list_products(storage: &dyn Storage, filter: ProductFilter, sort: ProductSort) -> Result<Vec<Product>> {
  let filter = filter.normalized();
  let products = storage.get_products(&filter).await?;
  let products = apply_sort(products, sort)?;
  info!("Listed {} products.", products.len());
  Ok(products)
}

pub async fn list_featured(storage: &dyn Storage) -> Result<Vec<Product>> {
  storage.get_featured_products().await
}

#[instrument(name = "catalog::get_product", skip(storage))]
pub async fn get_product(storage: &dyn Storage, id: i32) -> Result<Product> {
  storage.get_product(id).await?.ok_or_else(|| {
    warn!("Product with ID {} not found.", id);
    AppError::NotFound(format!("Product with ID {} not found.", id))
  })
}

fn apply_sort(mut products: Vec<Product>, sort: ProductSort) -> Result<Vec<Product>> {
  match sort {
    ProductSort::Featured => Ok(products),
    ProductSort::Newest => {
      products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
      Ok(products)
    }
    ProductSort::PriceLow | ProductSort::PriceHigh => {
      let mut priced = products
        .into_iter()
        .map(|p| match p.price_cents() {
          Ok(cents) => Ok((cents, p)),
          Err(e) => Err(AppError::Internal(format!("Product {}: {}", p.id, e))),
        })
        .collect::<Result<Vec<_>>>()?;
      if sort == ProductSort::PriceLow {
        priced.sort_by_key(|(cents, _)| *cents);
      } else {
        priced.sort_by_key(|(cents, _)| std::cmp::Reverse(*cents));
      }
      Ok(priced.into_iter().map(|(_, p)| p).collect())
    }
  }
}
