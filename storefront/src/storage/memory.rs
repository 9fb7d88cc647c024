// storefront/src/storage/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::{quantity_limit_exceeded, Storage};
use crate::errors::Result;
use crate::models::cart_item::merged_quantity;
use crate::models::product::sort_featured_first;
use crate::models::{CartItem, CartLine, Category, NewCartItem, NewCategory, NewProduct, Product, ProductFilter};

#[derive(Default)]
struct Tables {
  categories: BTreeMap<i32, Category>,
  products: BTreeMap<i32, Product>,
  cart_items: BTreeMap<i32, CartItem>,
  next_category_id: i32,
  next_product_id: i32,
  next_cart_item_id: i32,
}

impl Tables {
  fn category_by_slug(&self, slug: &str) -> Option<&Category> {
    self.categories.values().find(|c| c.slug == slug)
  }

  fn cart_item_id(&self, session_id: &str, product_id: i32) -> Option<i32> {
    self
      .cart_items
      .values()
      .find(|ci| ci.session_id == session_id && ci.product_id == product_id)
      .map(|ci| ci.id)
  }
}

fn next_id(counter: &mut i32) -> i32 {
  *counter += 1;
  *counter
}

/// Process-local storage for development and tests. Starts empty; run
/// `seed::seed_catalog` to load the default catalog.
#[derive(Default)]
pub struct MemStorage {
  tables: RwLock<Tables>,
}

impl MemStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl Storage for MemStorage {
  async fn get_categories(&self) -> Result<Vec<Category>> {
    Ok(self.tables.read().categories.values().cloned().collect())
  }

  async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
    Ok(self.tables.read().category_by_slug(slug).cloned())
  }

  async fn create_category(&self, category: NewCategory) -> Result<Category> {
    let mut tables = self.tables.write();
    let id = next_id(&mut tables.next_category_id);
    let row = Category {
      id,
      name: category.name,
      slug: category.slug,
      description: category.description,
      image_url: category.image_url,
    };
    tables.categories.insert(id, row.clone());
    Ok(row)
  }

  async fn get_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
    let tables = self.tables.read();
    let category_id = filter
      .category_slug
      .as_deref()
      .and_then(|slug| tables.category_by_slug(slug))
      .map(|c| c.id);
    let needle = filter.search.as_deref().map(str::to_lowercase);

    let mut products: Vec<Product> = tables
      .products
      .values()
      .filter(|p| category_id.map_or(true, |id| p.category_id == Some(id)))
      .filter(|p| needle.as_deref().map_or(true, |n| p.matches_search(n)))
      .cloned()
      .collect();
    sort_featured_first(&mut products);
    Ok(products)
  }

  async fn get_product(&self, id: i32) -> Result<Option<Product>> {
    Ok(self.tables.read().products.get(&id).cloned())
  }

  async fn get_featured_products(&self) -> Result<Vec<Product>> {
    Ok(
      self
        .tables
        .read()
        .products
        .values()
        .filter(|p| p.is_featured)
        .cloned()
        .collect(),
    )
  }

  async fn create_product(&self, product: NewProduct) -> Result<Product> {
    let mut tables = self.tables.write();
    let id = next_id(&mut tables.next_product_id);
    let row = Product {
      id,
      name: product.name,
      description: product.description,
      price: product.price,
      category_id: product.category_id,
      image_url: product.image_url,
      unit: product.unit,
      stock: product.stock,
      is_available: product.is_available,
      is_featured: product.is_featured,
      tags: product.tags,
      created_at: Utc::now(),
    };
    tables.products.insert(id, row.clone());
    Ok(row)
  }

  async fn get_cart_items(&self, session_id: &str) -> Result<Vec<CartLine>> {
    let tables = self.tables.read();
    Ok(
      tables
        .cart_items
        .values()
        .filter(|ci| ci.session_id == session_id)
        .filter_map(|ci| {
          // Inner-join semantics: rows whose product vanished are skipped.
          tables.products.get(&ci.product_id).map(|p| CartLine {
            item: ci.clone(),
            product: p.clone(),
          })
        })
        .collect(),
    )
  }

  async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem> {
    let mut tables = self.tables.write();
    if let Some(existing_id) = tables.cart_item_id(&item.session_id, item.product_id) {
      if let Some(existing) = tables.cart_items.get_mut(&existing_id) {
        existing.quantity = merged_quantity(existing.quantity, item.quantity).ok_or_else(quantity_limit_exceeded)?;
        return Ok(existing.clone());
      }
    }

    let id = next_id(&mut tables.next_cart_item_id);
    let row = CartItem {
      id,
      session_id: item.session_id,
      product_id: item.product_id,
      quantity: item.quantity,
      created_at: Utc::now(),
    };
    tables.cart_items.insert(id, row.clone());
    Ok(row)
  }

  async fn update_cart_item_quantity(&self, session_id: &str, product_id: i32, quantity: i32) -> Result<()> {
    let mut tables = self.tables.write();
    let Some(id) = tables.cart_item_id(session_id, product_id) else {
      return Ok(());
    };
    if quantity <= 0 {
      tables.cart_items.remove(&id);
    } else if let Some(row) = tables.cart_items.get_mut(&id) {
      row.quantity = quantity;
    }
    Ok(())
  }

  async fn remove_from_cart(&self, session_id: &str, product_id: i32) -> Result<()> {
    let mut tables = self.tables.write();
    if let Some(id) = tables.cart_item_id(session_id, product_id) {
      tables.cart_items.remove(&id);
    }
    Ok(())
  }

  async fn clear_cart(&self, session_id: &str) -> Result<()> {
    self.tables.write().cart_items.retain(|_, ci| ci.session_id != session_id);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::errors::AppError;
  use crate::models::MAX_ITEM_QUANTITY;

  fn new_product(name: &str, category_id: i32, featured: bool, tags: &[&str]) -> NewProduct {
    NewProduct {
      name: name.to_string(),
      description: Some(format!("Fresh {}", name.to_lowercase())),
      price: "10.00".to_string(),
      category_id: Some(category_id),
      image_url: None,
      unit: "1kg".to_string(),
      stock: 10,
      is_available: true,
      is_featured: featured,
      tags: tags.iter().map(|t| t.to_string()).collect(),
    }
  }

  async fn storage_with_catalog() -> MemStorage {
    let storage = MemStorage::new();
    for slug in ["fruits", "dairy"] {
      storage
        .create_category(NewCategory {
          name: slug.to_string(),
          slug: slug.to_string(),
          description: None,
          image_url: None,
        })
        .await
        .unwrap();
    }
    storage.create_product(new_product("Apple", 1, false, &["sweet"])).await.unwrap();
    storage.create_product(new_product("Mango", 1, true, &["alphonso"])).await.unwrap();
    storage.create_product(new_product("Milk", 2, false, &["full-cream"])).await.unwrap();
    storage.create_product(new_product("Paneer", 2, true, &["homemade"])).await.unwrap();
    storage
  }

  fn ids(products: &[Product]) -> Vec<i32> {
    products.iter().map(|p| p.id).collect()
  }

  fn add(session: &str, product_id: i32, quantity: i32) -> NewCartItem {
    NewCartItem {
      session_id: session.to_string(),
      product_id,
      quantity,
    }
  }

  #[tokio::test]
  async fn listing_puts_featured_first_in_id_order() {
    let storage = storage_with_catalog().await;
    let all = storage.get_products(&ProductFilter::default()).await.unwrap();
    assert_eq!(ids(&all), vec![2, 4, 1, 3]);
  }

  #[tokio::test]
  async fn listing_filters_by_category_and_search() {
    let storage = storage_with_catalog().await;
    let dairy = ProductFilter {
      category_slug: Some("dairy".into()),
      search: None,
    };
    assert_eq!(ids(&storage.get_products(&dairy).await.unwrap()), vec![4, 3]);

    let dairy_milk = ProductFilter {
      category_slug: Some("dairy".into()),
      search: Some("MILK".into()),
    };
    assert_eq!(ids(&storage.get_products(&dairy_milk).await.unwrap()), vec![3]);

    let fruit_milk = ProductFilter {
      category_slug: Some("fruits".into()),
      search: Some("milk".into()),
    };
    assert!(storage.get_products(&fruit_milk).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn unknown_category_slug_is_ignored() {
    let storage = storage_with_catalog().await;
    let filter = ProductFilter {
      category_slug: Some("no-such-aisle".into()),
      search: None,
    };
    assert_eq!(storage.get_products(&filter).await.unwrap().len(), 4);
  }

  #[tokio::test]
  async fn search_reaches_tags() {
    let storage = storage_with_catalog().await;
    let filter = ProductFilter {
      category_slug: None,
      search: Some("alphon".into()),
    };
    assert_eq!(ids(&storage.get_products(&filter).await.unwrap()), vec![2]);
  }

  #[tokio::test]
  async fn featured_listing_only_has_featured() {
    let storage = storage_with_catalog().await;
    assert_eq!(ids(&storage.get_featured_products().await.unwrap()), vec![2, 4]);
  }

  #[tokio::test]
  async fn adding_twice_sums_into_one_row() {
    let storage = storage_with_catalog().await;
    let first = storage.add_to_cart(add("s1", 1, 2)).await.unwrap();
    let second = storage.add_to_cart(add("s1", 1, 3)).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity, 5);

    let lines = storage.get_cart_items("s1").await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].item.quantity, 5);
    assert_eq!(lines[0].product.name, "Apple");
  }

  #[tokio::test]
  async fn merge_past_the_line_limit_is_rejected() {
    let storage = storage_with_catalog().await;
    storage.add_to_cart(add("s1", 1, MAX_ITEM_QUANTITY)).await.unwrap();

    let err = storage.add_to_cart(add("s1", 1, i32::MAX)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    let lines = storage.get_cart_items("s1").await.unwrap();
    assert_eq!(lines[0].item.quantity, MAX_ITEM_QUANTITY);
  }

  #[tokio::test]
  async fn non_positive_quantity_removes_row() {
    let storage = storage_with_catalog().await;
    storage.add_to_cart(add("s1", 1, 2)).await.unwrap();
    storage.add_to_cart(add("s1", 3, 1)).await.unwrap();

    storage.update_cart_item_quantity("s1", 1, 7).await.unwrap();
    storage.update_cart_item_quantity("s1", 3, 0).await.unwrap();
    let lines = storage.get_cart_items("s1").await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!((lines[0].item.product_id, lines[0].item.quantity), (1, 7));

    storage.update_cart_item_quantity("s1", 1, -4).await.unwrap();
    assert!(storage.get_cart_items("s1").await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn updating_missing_row_does_not_insert() {
    let storage = storage_with_catalog().await;
    storage.update_cart_item_quantity("s1", 2, 3).await.unwrap();
    storage.remove_from_cart("s1", 2).await.unwrap();
    assert!(storage.get_cart_items("s1").await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn clear_only_touches_one_session() {
    let storage = storage_with_catalog().await;
    storage.add_to_cart(add("s1", 1, 1)).await.unwrap();
    storage.add_to_cart(add("s1", 2, 1)).await.unwrap();
    storage.add_to_cart(add("s2", 1, 4)).await.unwrap();

    storage.clear_cart("s1").await.unwrap();
    assert!(storage.get_cart_items("s1").await.unwrap().is_empty());
    let other = storage.get_cart_items("s2").await.unwrap();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].item.quantity, 4);
  }

  #[tokio::test]
  async fn remove_deletes_only_that_product() {
    let storage = storage_with_catalog().await;
    storage.add_to_cart(add("s1", 1, 1)).await.unwrap();
    storage.add_to_cart(add("s1", 2, 1)).await.unwrap();
    storage.remove_from_cart("s1", 1).await.unwrap();
    let lines = storage.get_cart_items("s1").await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].item.product_id, 2);
  }
}
