//! Price bracket entity - a named price range used by the recommendation quiz.
//!
//! Either bound may be absent. A bracket with neither bound matches every price.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Price bracket database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_brackets")]
pub struct Model {
    /// Unique identifier for the bracket
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique name shown in the quiz (e.g., "Budget")
    #[sea_orm(unique)]
    pub name: String,
    /// Inclusive lower bound
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound
    pub max_price: Option<Decimal>,
}

impl Model {
    /// Whether `price` falls inside the bracket. Both bounds are inclusive.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }
}

/// `PriceBracket` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
