//! `stockkeep-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no I/O, no presentation).

pub mod entity;
pub mod error;
pub mod id;
pub mod text;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductCode;
pub use value_object::ValueObject;
