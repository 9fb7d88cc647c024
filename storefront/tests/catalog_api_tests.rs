// tests/catalog_api_tests.rs
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::Value;

use common::*;
use storefront::models::{Category, Product};

fn names(products: &[Product]) -> Vec<&str> {
  products.iter().map(|p| p.name.as_str()).collect()
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
  let app = init_app!(seeded_state().await);
  let body: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/api/health").to_request()).await;
  assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn lists_seeded_categories_in_order() {
  let app = init_app!(seeded_state().await);
  let categories: Vec<Category> =
    test::call_and_read_body_json(&app, TestRequest::get().uri("/api/categories").to_request()).await;
  let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
  assert_eq!(slugs, vec!["vegetables", "fruits", "dairy", "spices", "household", "snacks"]);
}

#[actix_web::test]
async fn category_by_slug_or_not_found() {
  let app = init_app!(seeded_state().await);
  let dairy: Category =
    test::call_and_read_body_json(&app, TestRequest::get().uri("/api/categories/dairy").to_request()).await;
  assert_eq!(dairy.name, "Dairy");
  assert_eq!(dairy.description.as_deref(), Some("Fresh & Pure"));

  let resp = test::call_service(&app, TestRequest::get().uri("/api/categories/toys").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["error"].as_str().unwrap().contains("toys"));
}

#[actix_web::test]
async fn default_listing_puts_featured_first_and_keeps_id_order() {
  let app = init_app!(seeded_state().await);
  let products: Vec<Product> =
    test::call_and_read_body_json(&app, TestRequest::get().uri("/api/products").to_request()).await;
  assert_eq!(products.len(), 30);

  let split = products.iter().position(|p| !p.is_featured).unwrap();
  assert_eq!(split, 12);
  assert!(products[split..].iter().all(|p| !p.is_featured));
  for group in [&products[..split], &products[split..]] {
    assert!(group.windows(2).all(|w| w[0].id < w[1].id));
  }
}

#[actix_web::test]
async fn search_finds_products_by_tag_alone() {
  let app = init_app!(seeded_state().await);
  // "vitamin-c" appears only in the tags of Fresh Oranges.
  let products: Vec<Product> =
    test::call_and_read_body_json(&app, TestRequest::get().uri("/api/products?search=Vitamin-C").to_request()).await;
  assert_eq!(names(&products), vec!["Fresh Oranges"]);
}

#[actix_web::test]
async fn category_and_search_combine_with_and() {
  let app = init_app!(seeded_state().await);
  let products: Vec<Product> = test::call_and_read_body_json(
    &app,
    TestRequest::get().uri("/api/products?category=fruits&search=sweet").to_request(),
  )
  .await;
  assert_eq!(names(&products), vec!["Fresh Apples", "Fresh Bananas", "Fresh Grapes"]);

  let dairy: Vec<Product> =
    test::call_and_read_body_json(&app, TestRequest::get().uri("/api/products?category=dairy").to_request()).await;
  assert_eq!(dairy.len(), 4);
  assert!(dairy.iter().all(|p| p.category_id == Some(3)));
}

#[actix_web::test]
async fn unknown_category_leaves_listing_unfiltered() {
  let app = init_app!(seeded_state().await);
  let products: Vec<Product> =
    test::call_and_read_body_json(&app, TestRequest::get().uri("/api/products?category=toys").to_request()).await;
  assert_eq!(products.len(), 30);
}

#[actix_web::test]
async fn price_sort_and_bad_sort() {
  let app = init_app!(seeded_state().await);
  let products: Vec<Product> =
    test::call_and_read_body_json(&app, TestRequest::get().uri("/api/products?sort=price-low").to_request()).await;
  assert_eq!(products[0].name, "Onions");
  assert_eq!(products[0].price, "20.00");

  let resp = test::call_service(&app, TestRequest::get().uri("/api/products?sort=cheapest").to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn featured_endpoint_only_returns_featured() {
  let app = init_app!(seeded_state().await);
  let products: Vec<Product> =
    test::call_and_read_body_json(&app, TestRequest::get().uri("/api/products/featured").to_request()).await;
  assert_eq!(products.len(), 12);
  assert!(products.iter().all(|p| p.is_featured));
}

#[actix_web::test]
async fn product_by_id() {
  let app = init_app!(seeded_state().await);
  let body: Value =
    test::call_and_read_body_json(&app, TestRequest::get().uri("/api/products/1").to_request()).await;
  assert_eq!(body["name"], "Fresh Tomatoes");
  assert_eq!(body["price"], "45.00");
  assert_eq!(body["categoryId"], 1);
  assert_eq!(body["isFeatured"], true);
  assert_eq!(body["tags"], serde_json::json!(["organic", "fresh"]));

  let resp = test::call_service(&app, TestRequest::get().uri("/api/products/9999").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = test::call_service(&app, TestRequest::get().uri("/api/products/abc").to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
