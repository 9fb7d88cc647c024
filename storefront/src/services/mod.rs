// storefront/src/services/mod.rs

//! Business operations behind the HTTP handlers. Each function takes the
//! storage backend explicitly so it can be exercised without a server.

pub mod cart;
pub mod catalog;
pub mod checkout;
