use rust_decimal::Decimal;
use serde::Serialize;

use stockkeep_core::ValueObject;
use stockkeep_products::Product;

/// Snapshot of aggregate inventory statistics.
///
/// Produced fresh by `InventoryStore::generate_summary`; the product lists
/// are owned copies, so later store mutations never show up here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    product_count: usize,
    total_items: i64,
    total_value: Decimal,
    top_by_stock: Vec<Product>,
    low_stock: Vec<Product>,
}

impl InventorySummary {
    pub fn new(
        product_count: usize,
        total_items: i64,
        total_value: Decimal,
        top_by_stock: Vec<Product>,
        low_stock: Vec<Product>,
    ) -> Self {
        Self {
            product_count,
            total_items,
            total_value,
            top_by_stock,
            low_stock,
        }
    }

    /// Number of distinct products.
    pub fn product_count(&self) -> usize {
        self.product_count
    }

    /// Sum of stock across all products.
    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    /// Sum of `price × stock` across all products.
    pub fn total_value(&self) -> Decimal {
        self.total_value
    }

    /// Highest-stock products, stock descending.
    pub fn top_by_stock(&self) -> &[Product] {
        &self.top_by_stock
    }

    /// Products under the low-stock threshold, stock ascending.
    pub fn low_stock(&self) -> &[Product] {
        &self.low_stock
    }
}

impl ValueObject for InventorySummary {}
