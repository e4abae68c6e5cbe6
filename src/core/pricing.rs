//! Bouquet pricing - pure computations over an already loaded composition.
//!
//! Money is fixed-point `Decimal`. Every derived amount is rounded to the currency's
//! minor unit (two places) with round-half-up, i.e. midpoints move away from zero.
//!
//! Stored amounts and derived totals are capped at [`MAX_AMOUNT`]. SQLite keeps decimal
//! columns as REAL, and ten significant digits is what survives that round trip exactly.

use crate::{
    entities::component,
    errors::{Error, Result},
};
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of the shop currency
pub const CURRENCY_SCALE: u32 = 2;

/// Largest amount a price or total may hold: 99 999 999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// One composition entry joined with the component it references.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionLine {
    /// The referenced component
    pub component: component::Model,
    /// Units of the component in the bouquet
    pub quantity: i32,
}

impl CompositionLine {
    /// Cost of this line: unit price times quantity, `None` on overflow.
    #[must_use]
    pub fn cost(&self) -> Option<Decimal> {
        self.component
            .unit_price
            .checked_mul(Decimal::from(self.quantity))
    }
}

/// Rounds an amount to two decimal places, half-up.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// `base_price + Σ(unit_price × quantity)`, rounded to the currency's minor unit.
///
/// # Errors
/// `InvalidAmount` when the total exceeds [`MAX_AMOUNT`]. An intermediate overflow is
/// reported with `Decimal::MAX` as the amount.
pub fn compute_total_price(
    base_price: Decimal,
    composition: &[CompositionLine],
) -> Result<Decimal> {
    let overflow = || Error::InvalidAmount {
        amount: Decimal::MAX,
    };
    let total = composition.iter().try_fold(base_price, |acc, line| {
        line.cost()
            .and_then(|cost| acc.checked_add(cost))
            .ok_or_else(overflow)
    })?;

    let total = round_currency(total);
    if total > MAX_AMOUNT {
        return Err(Error::InvalidAmount { amount: total });
    }
    Ok(total)
}

/// Rejects negative amounts and amounts above [`MAX_AMOUNT`], and normalises the rest
/// to two places.
pub fn validate_amount(amount: Decimal) -> Result<Decimal> {
    let rounded = round_currency(amount);
    if (amount.is_sign_negative() && !amount.is_zero()) || rounded > MAX_AMOUNT {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(rounded)
}

/// Composition quantities must be at least one; nothing is clamped.
pub const fn validate_quantity(quantity: i32) -> Result<i32> {
    if quantity < 1 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(quantity)
}

/// Names are trimmed and must not be empty.
pub fn validate_name(kind: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: format!("{kind} name cannot be empty"),
        });
    }
    Ok(trimmed.to_string())
}
