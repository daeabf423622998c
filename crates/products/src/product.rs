use core::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockkeep_core::{DomainError, DomainResult, Entity, ProductCode, text};

use crate::price::normalize_price;
use crate::update::ProductUpdate;

/// Raw product input, as parsed from a prompt or a JSON document.
///
/// Optional fields fall back to their defaults in [`Product::create`]
/// (empty description, zero stock), except `price`, which is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl NewProduct {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }
}

/// Entity: Product.
///
/// Identity is the `code`; equality and hashing ignore every other field.
/// All mutators validate first and only then write, so a failed call leaves
/// the product exactly as it was. `price × stock` must fit in a `Decimal`;
/// price and stock changes that would break this are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NewProduct")]
pub struct Product {
    code: ProductCode,
    name: String,
    description: String,
    price: Decimal,
    stock: i64,
    #[serde(skip)]
    value: Decimal,
}

impl Product {
    /// Validate and build a product from raw input.
    pub fn create(input: NewProduct) -> DomainResult<Self> {
        let code = ProductCode::parse(&input.code)?;
        let name = text::require_non_blank(&input.name, "name")?;
        let description = input.description.as_deref().map(text::normalize).unwrap_or_default();
        let price = input
            .price
            .ok_or_else(|| DomainError::validation("price is required"))
            .and_then(normalize_price)?;
        let stock = validate_stock(input.stock.unwrap_or(0))?;
        let value = stock_value_of(price, stock)?;

        Ok(Self {
            code,
            name,
            description,
            price,
            stock,
            value,
        })
    }

    /// Short form: empty description, zero stock.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Decimal) -> DomainResult<Self> {
        Self::create(NewProduct::new(code, name).price(price))
    }

    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Value of the units on hand (`price × stock`), exact.
    pub fn stock_value(&self) -> Decimal {
        self.value
    }

    pub fn set_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = text::require_non_blank(name, "name")?;
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = text::normalize(description);
    }

    pub fn clear_description(&mut self) {
        self.description.clear();
    }

    pub fn set_price(&mut self, price: Decimal) -> DomainResult<()> {
        let price = normalize_price(price)?;
        self.value = stock_value_of(price, self.stock)?;
        self.price = price;
        Ok(())
    }

    /// Alias of [`Product::set_price`].
    pub fn update_price(&mut self, price: Decimal) -> DomainResult<()> {
        self.set_price(price)
    }

    pub fn set_stock(&mut self, stock: i64) -> DomainResult<()> {
        let stock = validate_stock(stock)?;
        self.value = stock_value_of(self.price, stock)?;
        self.stock = stock;
        Ok(())
    }

    pub fn increase_stock(&mut self, amount: i64) -> DomainResult<()> {
        if amount <= 0 {
            return Err(DomainError::validation("increase amount must be greater than zero"));
        }
        let stock = self
            .stock
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("stock would overflow"))?;
        self.set_stock(stock)
    }

    pub fn decrease_stock(&mut self, amount: i64) -> DomainResult<()> {
        if amount <= 0 {
            return Err(DomainError::validation("decrease amount must be greater than zero"));
        }
        if self.stock - amount < 0 {
            return Err(DomainError::validation("stock cannot go negative"));
        }
        self.set_stock(self.stock - amount)
    }

    /// Apply a single-field change through the matching setter.
    pub fn apply(&mut self, update: ProductUpdate) -> DomainResult<()> {
        match update {
            ProductUpdate::Name(name) => self.set_name(&name),
            ProductUpdate::Description(description) => {
                self.set_description(&description);
                Ok(())
            }
            ProductUpdate::Price(price) => self.set_price(price),
            ProductUpdate::Stock(stock) => self.set_stock(stock),
            ProductUpdate::IncreaseStock(amount) => self.increase_stock(amount),
            ProductUpdate::DecreaseStock(amount) => self.decrease_stock(amount),
        }
    }

    /// Every field, for single-product views.
    pub fn detailed_description(&self) -> String {
        format!(
            "Product[code = {}, name = {}, price = {}, stock = {}, description = {}]",
            self.code, self.name, self.price, self.stock, self.description
        )
    }
}

fn validate_stock(stock: i64) -> DomainResult<i64> {
    if stock < 0 {
        return Err(DomainError::validation("stock cannot be negative"));
    }
    Ok(stock)
}

fn stock_value_of(price: Decimal, stock: i64) -> DomainResult<Decimal> {
    price
        .checked_mul(Decimal::from(stock))
        .ok_or_else(|| DomainError::validation("stock value (price × stock) is too large"))
}

impl TryFrom<NewProduct> for Product {
    type Error = DomainError;

    fn try_from(value: NewProduct) -> Result<Self, Self::Error> {
        Self::create(value)
    }
}

impl Entity for Product {
    type Id = ProductCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} - {} (${}, stock={})", self.code, self.name, self.price, self.stock)
    }
}
