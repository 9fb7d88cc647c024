// storefront/src/config.rs

use crate::errors::{AppError, Result};
use crate::models::price;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// `None` selects the in-memory storage backend.
  pub database_url: Option<String>,
  pub database_max_connections: u32,
  pub seed_db: bool,
  /// Flat delivery charge added to every non-empty cart, in cents.
  pub delivery_fee_cents: i64,
  /// How long a simulated checkout "processes" before confirming.
  pub checkout_delay: Duration,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      database_max_connections: 5,
      seed_db: true,
      delivery_fee_cents: 2500,
      checkout_delay: Duration::from_millis(2000),
      log_format: LogFormat::Pretty,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from an arbitrary variable source.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let defaults = Self::default();
    let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let server_host = get("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = match get("SERVER_PORT") {
      Some(raw) => raw
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?,
      None => defaults.server_port,
    };
    let database_url = get("DATABASE_URL");
    let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
      Some(raw) => raw
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: '{}'", raw)))?,
      None => defaults.database_max_connections,
    };
    let seed_db = match get("SEED_DB") {
      Some(raw) => raw
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?,
      None => defaults.seed_db,
    };
    let delivery_fee_cents = match get("DELIVERY_FEE") {
      Some(raw) => price::parse_cents(&raw)
        .map_err(|e| AppError::Config(format!("Invalid DELIVERY_FEE: {}", e)))?,
      None => defaults.delivery_fee_cents,
    };
    let checkout_delay = match get("CHECKOUT_DELAY_MS") {
      Some(raw) => Duration::from_millis(
        raw
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid CHECKOUT_DELAY_MS: {}", e)))?,
      ),
      None => defaults.checkout_delay,
    };
    let log_format = match get("LOG_FORMAT").as_deref() {
      None | Some("pretty") => LogFormat::Pretty,
      Some("json") => LogFormat::Json,
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'",
          other
        )))
      }
    };

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      seed_db,
      delivery_fee_cents,
      checkout_delay,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn empty_environment_yields_defaults() {
    let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.bind_address(), "127.0.0.1:8080");
    assert!(cfg.database_url.is_none());
    assert!(cfg.seed_db);
    assert_eq!(cfg.delivery_fee_cents, 2500);
    assert_eq!(cfg.checkout_delay, Duration::from_millis(2000));
    assert_eq!(cfg.log_format, LogFormat::Pretty);
  }

  #[test]
  fn values_are_read_and_parsed() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
      ("SERVER_HOST", "0.0.0.0"),
      ("SERVER_PORT", "9000"),
      ("DATABASE_URL", "postgres://localhost/shop"),
      ("SEED_DB", "false"),
      ("DELIVERY_FEE", "40"),
      ("CHECKOUT_DELAY_MS", "0"),
      ("LOG_FORMAT", "json"),
    ]))
    .unwrap();
    assert_eq!(cfg.bind_address(), "0.0.0.0:9000");
    assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/shop"));
    assert!(!cfg.seed_db);
    assert_eq!(cfg.delivery_fee_cents, 4000);
    assert_eq!(cfg.checkout_delay, Duration::ZERO);
    assert_eq!(cfg.log_format, LogFormat::Json);
  }

  #[test]
  fn blank_database_url_means_in_memory() {
    let cfg = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
    assert!(cfg.database_url.is_none());
  }

  #[test]
  fn invalid_values_are_config_errors() {
    for (name, value) in [
      ("SERVER_PORT", "eighty"),
      ("SEED_DB", "yes"),
      ("DELIVERY_FEE", "-3"),
      ("CHECKOUT_DELAY_MS", "soon"),
      ("DATABASE_MAX_CONNECTIONS", "0"),
      ("LOG_FORMAT", "xml"),
    ] {
      let err = AppConfig::from_lookup(lookup_from(&[(name, value)])).unwrap_err();
      assert!(matches!(err, AppError::Config(_)), "{name}={value} gave {err:?}");
    }
  }
}
