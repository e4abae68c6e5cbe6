//! Price bracket operations - named ranges the budget step of the quiz offers.

use crate::{
    core::pricing,
    entities::{PriceBracket, price_bracket},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Human readable name for a bracket defined only by its bounds.
#[must_use]
pub fn bracket_label(min: Option<Decimal>, max: Option<Decimal>) -> String {
    match (min, max) {
        (None, None) => "any price".to_string(),
        (None, Some(max)) => format!("up to {max:.2}"),
        (Some(min), None) => format!("from {min:.2}"),
        (Some(min), Some(max)) => format!("from {min:.2} to {max:.2}"),
    }
}

/// Checks bracket bounds: neither negative, and `min < max` when both are present.
/// Returns the bounds rounded to the currency's minor unit.
pub fn validate_bracket(
    name: &str,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> Result<(Option<Decimal>, Option<Decimal>)> {
    let invalid = || Error::InvalidPriceBracket {
        name: name.to_string(),
        min,
        max,
    };

    let min = min
        .map(pricing::validate_amount)
        .transpose()
        .map_err(|_| invalid())?;
    let max = max
        .map(pricing::validate_amount)
        .transpose()
        .map_err(|_| invalid())?;

    if matches!((min, max), (Some(lo), Some(hi)) if lo >= hi) {
        return Err(invalid());
    }
    Ok((min, max))
}

/// Retrieves all price brackets, cheapest lower bound first.
pub async fn list_price_brackets<C>(db: &C) -> Result<Vec<price_bracket::Model>>
where
    C: ConnectionTrait,
{
    PriceBracket::find()
        .order_by_asc(price_bracket::Column::MinPrice)
        .order_by_asc(price_bracket::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a price bracket by its unique name.
pub async fn get_price_bracket_by_name<C>(
    db: &C,
    name: &str,
) -> Result<Option<price_bracket::Model>>
where
    C: ConnectionTrait,
{
    PriceBracket::find()
        .filter(price_bracket::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a price bracket. When `name` is `None` the name is derived from the bounds.
///
/// # Arguments
/// * `name` - Quiz answer text, or `None` to use [`bracket_label`]
/// * `min` - Inclusive lower bound, `None` for open-ended
/// * `max` - Inclusive upper bound, `None` for open-ended
///
/// # Errors
/// `InvalidPriceBracket` for negative bounds or `min >= max`; nothing is written.
pub async fn create_price_bracket<C>(
    db: &C,
    name: Option<&str>,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> Result<price_bracket::Model>
where
    C: ConnectionTrait,
{
    let name = match name {
        Some(name) => pricing::validate_name("Price bracket", name)?,
        None => bracket_label(min, max),
    };
    let (min, max) = validate_bracket(&name, min, max)?;

    let created = price_bracket::ActiveModel {
        name: Set(name),
        min_price: Set(min),
        max_price: Set(max),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!("Added price bracket '{}'", created.name);
    Ok(created)
}
