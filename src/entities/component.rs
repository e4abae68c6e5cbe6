//! Component entity - A purchasable flower or accessory unit.
//!
//! Components are shared reference data: many bouquets point at the same component
//! through composition entries, and no bouquet owns one.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What kind of unit a component is
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// A stem or bunch of flowers
    #[sea_orm(string_value = "flower")]
    Flower,
    /// Ribbons, wrapping, baskets and the like
    #[sea_orm(string_value = "accessory")]
    Accessory,
}

/// Component database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "components")]
pub struct Model {
    /// Unique identifier for the component
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique name (e.g., "Rose", "Ribbon")
    #[sea_orm(unique)]
    pub name: String,
    /// Flower or accessory
    pub kind: ComponentKind,
    /// Price of a single unit, two decimal places
    pub unit_price: Decimal,
    /// Units currently in stock
    pub stock: i32,
    /// Free-form note shown to florists
    pub note: Option<String>,
}

/// Defines relationships between Component and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One component appears in many composition entries
    #[sea_orm(has_many = "super::bouquet_component::Entity")]
    BouquetComponents,
}

impl Related<super::bouquet_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BouquetComponents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
