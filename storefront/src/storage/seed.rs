// storefront/src/storage/seed.rs

//! Default grocery catalog loaded on startup when `SEED_DB` is on.

use tracing::info;

use super::Storage;
use crate::errors::{AppError, Result};
use crate::models::{NewCategory, NewProduct};

struct SeedProduct {
  name: &'static str,
  description: &'static str,
  price: &'static str,
  category: &'static str, // Category slug
  image_url: &'static str,
  unit: &'static str,
  stock: i32,
  featured: bool,
  tags: &'static [&'static str],
}

// (name, slug, description, image url)
#[rustfmt::skip]
const CATEGORIES: &[(&str, &str, &str, &str)] = &[
  ("Vegetables", "vegetables", "Fresh & Organic", "https://images.unsplash.com/photo-1540420773420-3366772f4999?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"),
  ("Fruits", "fruits", "Sweet & Juicy", "https://images.unsplash.com/photo-1619566636858-adf3ef46400b?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"),
  ("Dairy", "dairy", "Fresh & Pure", "https://images.unsplash.com/photo-1550583724-b2692b85b150?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"),
  ("Spices", "spices", "Authentic Flavors", "https://images.unsplash.com/photo-1596040033229-a9821ebd058d?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"),
  ("Household", "household", "Daily Essentials", "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"),
  ("Snacks", "snacks", "Tasty Treats", "https://images.unsplash.com/photo-1599490659213-e2b9527bd087?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"),
];

#[rustfmt::skip]
const PRODUCTS: &[SeedProduct] = &[
  SeedProduct { name: "Fresh Tomatoes", description: "Organic vine-ripened tomatoes", price: "45.00", category: "vegetables", image_url: "https://images.unsplash.com/photo-1592924357228-91a4daadcfea?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1kg", stock: 50, featured: true, tags: &["organic", "fresh"] },
  SeedProduct { name: "Fresh Spinach", description: "Farm-fresh spinach leaves", price: "25.00", category: "vegetables", image_url: "https://images.unsplash.com/photo-1576045057995-568f588f82fb?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "500g", stock: 30, featured: false, tags: &["organic", "green"] },
  SeedProduct { name: "Fresh Carrots", description: "Sweet orange carrots", price: "35.00", category: "vegetables", image_url: "https://images.unsplash.com/photo-1598170845058-32b9d6a5da37?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1kg", stock: 40, featured: true, tags: &["fresh", "sweet"] },
  SeedProduct { name: "Onions", description: "Fresh red onions", price: "20.00", category: "vegetables", image_url: "https://images.unsplash.com/photo-1580201092675-a0a6a4d36963?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1kg", stock: 60, featured: false, tags: &["fresh"] },
  SeedProduct { name: "Potatoes", description: "Fresh potatoes", price: "30.00", category: "vegetables", image_url: "https://images.unsplash.com/photo-1518977676601-b53f82aba655?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "2kg", stock: 80, featured: false, tags: &["staple"] },
  SeedProduct { name: "Bell Peppers", description: "Colorful bell peppers", price: "60.00", category: "vegetables", image_url: "https://images.unsplash.com/photo-1525607551316-4a8e16d1f9ba?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "500g", stock: 25, featured: false, tags: &["colorful", "fresh"] },
  SeedProduct { name: "Cauliflower", description: "Fresh white cauliflower", price: "40.00", category: "vegetables", image_url: "https://images.unsplash.com/photo-1510627489930-0c1b0e5bb90e?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1 piece", stock: 20, featured: false, tags: &["fresh", "white"] },
  SeedProduct { name: "Broccoli", description: "Fresh green broccoli", price: "80.00", category: "vegetables", image_url: "https://images.unsplash.com/photo-1459411621453-7b03977f4bfc?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "500g", stock: 15, featured: false, tags: &["green", "healthy"] },
  SeedProduct { name: "Fresh Apples", description: "Kashmir red delicious apples", price: "180.00", category: "fruits", image_url: "https://images.unsplash.com/photo-1569870499705-504209102861?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1kg", stock: 35, featured: true, tags: &["premium", "sweet"] },
  SeedProduct { name: "Fresh Bananas", description: "Ripe yellow bananas", price: "60.00", category: "fruits", image_url: "https://images.unsplash.com/photo-1571771894821-ce9b6c11b08e?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1 dozen", stock: 50, featured: true, tags: &["ripe", "sweet"] },
  SeedProduct { name: "Fresh Oranges", description: "Juicy oranges", price: "120.00", category: "fruits", image_url: "https://images.unsplash.com/photo-1547514701-42782101795e?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1kg", stock: 40, featured: false, tags: &["juicy", "vitamin-c"] },
  SeedProduct { name: "Fresh Grapes", description: "Sweet green grapes", price: "150.00", category: "fruits", image_url: "https://images.unsplash.com/photo-1423483641154-5411ec9c0ddf?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "500g", stock: 20, featured: false, tags: &["sweet", "fresh"] },
  SeedProduct { name: "Mangoes", description: "Alphonso mangoes", price: "300.00", category: "fruits", image_url: "https://images.unsplash.com/photo-1601493700631-2b16ec4b4716?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1kg", stock: 25, featured: true, tags: &["alphonso", "premium"] },
  SeedProduct { name: "Pomegranates", description: "Fresh pomegranates", price: "200.00", category: "fruits", image_url: "https://images.unsplash.com/photo-1553279147-83c56d5ad5b9?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1kg", stock: 15, featured: false, tags: &["antioxidant", "fresh"] },
  SeedProduct { name: "Fresh Milk", description: "Full cream milk", price: "55.00", category: "dairy", image_url: "https://images.unsplash.com/photo-1563636619-e9143da7973b?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1L", stock: 100, featured: true, tags: &["fresh", "full-cream"] },
  SeedProduct { name: "Fresh Paneer", description: "Homemade cottage cheese", price: "80.00", category: "dairy", image_url: "https://images.unsplash.com/photo-1631452180539-96aca7d48617?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "200g", stock: 30, featured: true, tags: &["homemade", "fresh"] },
  SeedProduct { name: "Greek Yogurt", description: "Thick Greek yogurt", price: "120.00", category: "dairy", image_url: "https://images.unsplash.com/photo-1488477181946-6428a0291777?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "500g", stock: 25, featured: false, tags: &["greek", "thick"] },
  SeedProduct { name: "Butter", description: "Fresh white butter", price: "45.00", category: "dairy", image_url: "https://images.unsplash.com/photo-1589985270826-4b7bb135bc9d?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "100g", stock: 40, featured: false, tags: &["fresh", "white"] },
  SeedProduct { name: "Turmeric Powder", description: "Pure turmeric powder", price: "120.00", category: "spices", image_url: "https://images.unsplash.com/photo-1596040033229-a9821ebd058d?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "500g", stock: 50, featured: true, tags: &["pure", "organic"] },
  SeedProduct { name: "Red Chili Powder", description: "Spicy red chili powder", price: "100.00", category: "spices", image_url: "https://images.unsplash.com/photo-1583454110551-21f2fa2afe61?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "500g", stock: 45, featured: false, tags: &["spicy", "hot"] },
  SeedProduct { name: "Garam Masala", description: "Traditional garam masala blend", price: "150.00", category: "spices", image_url: "https://images.unsplash.com/photo-1596040033229-a9821ebd058d?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "200g", stock: 30, featured: true, tags: &["traditional", "blend"] },
  SeedProduct { name: "Cumin Powder", description: "Ground cumin seeds", price: "80.00", category: "spices", image_url: "https://images.unsplash.com/photo-1504544750208-dc0358e63f7f?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "250g", stock: 35, featured: false, tags: &["ground", "aromatic"] },
  SeedProduct { name: "Dish Soap", description: "Lemon scented dish soap", price: "85.00", category: "household", image_url: "https://images.unsplash.com/photo-1585012613961-90d70f8cc43d?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "500ml", stock: 60, featured: false, tags: &["lemon", "cleaning"] },
  SeedProduct { name: "Laundry Detergent", description: "Concentrated laundry detergent", price: "250.00", category: "household", image_url: "https://images.unsplash.com/photo-1610557892929-4ac84ff08b0a?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "1kg", stock: 40, featured: true, tags: &["concentrated", "effective"] },
  SeedProduct { name: "Toilet Paper", description: "Soft toilet paper rolls", price: "120.00", category: "household", image_url: "https://images.unsplash.com/photo-1631947430066-48c30d57b943?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "6 rolls", stock: 80, featured: false, tags: &["soft", "essential"] },
  SeedProduct { name: "All-Purpose Cleaner", description: "Multi-surface cleaner", price: "95.00", category: "household", image_url: "https://images.unsplash.com/photo-1584464491033-06628f3a6b7b?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "750ml", stock: 30, featured: false, tags: &["multi-surface", "effective"] },
  SeedProduct { name: "Mixed Nuts", description: "Premium mixed nuts", price: "450.00", category: "snacks", image_url: "https://images.unsplash.com/photo-1578662996442-48f60103fc96?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "500g", stock: 25, featured: true, tags: &["premium", "healthy"] },
  SeedProduct { name: "Potato Chips", description: "Crispy potato chips", price: "40.00", category: "snacks", image_url: "https://images.unsplash.com/photo-1566478989037-eec170784d0b?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "150g", stock: 100, featured: false, tags: &["crispy", "salty"] },
  SeedProduct { name: "Dark Chocolate", description: "70% dark chocolate bar", price: "180.00", category: "snacks", image_url: "https://images.unsplash.com/photo-1549007994-cb92caebd54b?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "100g", stock: 35, featured: true, tags: &["dark", "premium"] },
  SeedProduct { name: "Green Tea", description: "Organic green tea bags", price: "200.00", category: "snacks", image_url: "https://images.unsplash.com/photo-1627933825978-fb3c8c0b1e79?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=240", unit: "25 bags", stock: 40, featured: false, tags: &["organic", "healthy"] },
];

/// Number of (categories, products) in the default catalog.
pub fn catalog_size() -> (usize, usize) {
  (CATEGORIES.len(), PRODUCTS.len())
}

/// Loads the default catalog unless categories already exist.
/// Returns whether anything was inserted.
pub async fn seed_catalog(storage: &dyn Storage) -> Result<bool> {
  if !storage.get_categories().await?.is_empty() {
    info!("Catalog already seeded; skipping.");
    return Ok(false);
  }

  info!("Seeding catalog...");
  let mut category_ids = Vec::with_capacity(CATEGORIES.len());
  for (name, slug, description, image_url) in CATEGORIES {
    let category = storage
      .create_category(NewCategory {
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(description.to_string()),
        image_url: Some(image_url.to_string()),
      })
      .await?;
    category_ids.push((*slug, category.id));
  }

  for seed in PRODUCTS {
    let category_id = category_ids
      .iter()
      .find(|(slug, _)| *slug == seed.category)
      .map(|(_, id)| *id)
      .ok_or_else(|| AppError::Internal(format!("Seed product '{}' names unknown category '{}'", seed.name, seed.category)))?;
    storage
      .create_product(NewProduct {
        name: seed.name.to_string(),
        description: Some(seed.description.to_string()),
        price: seed.price.to_string(),
        category_id: Some(category_id),
        image_url: Some(seed.image_url.to_string()),
        unit: seed.unit.to_string(),
        stock: seed.stock,
        is_available: true,
        is_featured: seed.featured,
        tags: seed.tags.iter().map(|t| t.to_string()).collect(),
      })
      .await?;
  }

  info!(
    categories = CATEGORIES.len(),
    products = PRODUCTS.len(),
    "Catalog seeded."
  );
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::price::parse_cents;
  use crate::models::ProductFilter;
  use crate::storage::MemStorage;

  #[test]
  fn seed_data_is_consistent() {
    for seed in PRODUCTS {
      assert!(parse_cents(seed.price).is_ok(), "{} has a bad price", seed.name);
      assert!(
        CATEGORIES.iter().any(|(_, slug, _, _)| *slug == seed.category),
        "{} has an unknown category",
        seed.name
      );
    }
  }

  #[tokio::test]
  async fn seeding_is_idempotent() {
    let storage = MemStorage::new();
    assert!(seed_catalog(&storage).await.unwrap());
    assert!(!seed_catalog(&storage).await.unwrap());

    let (categories, products) = catalog_size();
    assert_eq!(storage.get_categories().await.unwrap().len(), categories);
    assert_eq!(
      storage.get_products(&ProductFilter::default()).await.unwrap().len(),
      products
    );
  }
}
