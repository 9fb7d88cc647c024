// storefront/src/models/mod.rs

//! Contains data structures representing database entities.

pub mod cart_item;
pub mod category;
pub mod order;
pub mod price;
pub mod product;

pub use cart_item::{CartItem, CartLine, NewCartItem, MAX_ITEM_QUANTITY};
pub use category::{Category, NewCategory};
pub use order::{CartSummary, OrderConfirmation, PaymentMethod};
pub use product::{NewProduct, Product, ProductFilter};
