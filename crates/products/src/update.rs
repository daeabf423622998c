use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Single-field change to an existing product.
///
/// Each variant maps to exactly one `Product` setter; see
/// [`crate::Product::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProductUpdate {
    Name(String),
    Description(String),
    Price(Decimal),
    Stock(i64),
    IncreaseStock(i64),
    DecreaseStock(i64),
}
