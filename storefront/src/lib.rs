// storefront/src/lib.rs

//! Grocery storefront backend: catalog browsing, session-scoped carts and
//! a simulated checkout, served as JSON over HTTP.
//!
//! Layers, top to bottom:
//!  - `web`: actix-web routes, handlers and the `SessionId` extractor.
//!  - `services`: catalog, cart and checkout operations.
//!  - `storage`: the `Storage` trait with PostgreSQL and in-memory backends.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
