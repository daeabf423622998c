//! Products domain module.
//!
//! This crate contains the product entity and its validation rules,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod price;
pub mod product;
pub mod update;

pub use price::{PRICE_SCALE, normalize_price};
pub use product::{NewProduct, Product};
pub use update::ProductUpdate;
