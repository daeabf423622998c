//! Inventory domain module.
//!
//! This crate owns the product collection and the aggregate summary computed
//! over it, implemented purely as in-memory domain logic (no IO, no storage).

pub mod store;
pub mod summary;

pub use store::{DEFAULT_TOP_N, InventoryStore};
pub use summary::InventorySummary;
