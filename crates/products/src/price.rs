//! Price normalization.

use rust_decimal::{Decimal, RoundingStrategy};

use stockkeep_core::{DomainError, DomainResult};

/// Fractional digits every stored price carries.
pub const PRICE_SCALE: u32 = 2;

/// Reject negative prices, then round half-up to [`PRICE_SCALE`] digits.
///
/// The result always has scale 2, so `15000` becomes `15000.00`; prices too
/// large to carry two fractional digits are rejected.
/// Prices are non-negative here, so away-from-zero is half-up.
pub fn normalize_price(price: Decimal) -> DomainResult<Decimal> {
    if price < Decimal::ZERO {
        return Err(DomainError::validation("price cannot be negative"));
    }
    let mut rounded = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    if rounded.scale() != PRICE_SCALE {
        return Err(DomainError::validation("price is too large"));
    }
    Ok(rounded)
}
