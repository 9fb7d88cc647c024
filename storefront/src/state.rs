// storefront/src/state.rs
use crate::config::AppConfig;
use crate::services::checkout::CheckoutSettings;
use crate::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub storage: Arc<dyn Storage>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(storage: Arc<dyn Storage>, config: AppConfig) -> Self {
    Self {
      storage,
      config: Arc::new(config),
    }
  }

  pub fn checkout_settings(&self) -> CheckoutSettings {
    CheckoutSettings {
      delivery_fee_cents: self.config.delivery_fee_cents,
      processing_delay: self.config.checkout_delay,
    }
  }
}
