// tests/common/mod.rs
#![allow(dead_code, unused_macros)] // Not every test binary uses every helper

use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use storefront::config::AppConfig;
use storefront::state::AppState;
use storefront::storage::{seed::seed_catalog, MemStorage};

pub const SESSION_HEADER: &str = "X-Session-Id";

// Seeded ids (see storage::seed): 1 "Fresh Tomatoes" 45.00, 9 "Fresh Apples" 180.00.
pub const TOMATOES_ID: i32 = 1;
pub const APPLES_ID: i32 = 9;

static TRACING: Lazy<()> = Lazy::new(|| {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

pub fn test_config() -> AppConfig {
  AppConfig {
    checkout_delay: Duration::ZERO,
    ..AppConfig::default()
  }
}

/// In-memory state loaded with the default catalog.
pub async fn seeded_state() -> AppState {
  setup_tracing();
  let storage = Arc::new(MemStorage::new());
  seed_catalog(storage.as_ref()).await.expect("seeding in-memory storage");
  AppState::new(storage, test_config())
}

/// Builds the full application service around `$state`.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state))
        .configure(storefront::web::configure_app_routes),
    )
    .await
  };
}
