//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**. They are built once, never mutated,
/// and two instances holding the same values are interchangeable. Inventory
/// summaries are the main example: a fresh snapshot is produced on every
/// request and holds no reference back to the store it was computed from.
///
/// - **Value Object**: `InventorySummary { product_count: 3, .. }`
/// - **Entity**: `Product { code: "A1", .. }` (same code, same product)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
