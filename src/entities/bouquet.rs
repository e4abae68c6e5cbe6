//! Bouquet entity - A sellable arrangement.
//!
//! `total_price` is a cached, derived column: base price plus the cost of every
//! composition entry. It is rewritten by `core::bouquet::recalculate_total_price`
//! in the same transaction as any change to its inputs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bouquet database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bouquets")]
pub struct Model {
    /// Unique identifier for the bouquet
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique display name (e.g., "Spring Mix")
    #[sea_orm(unique)]
    pub name: String,
    /// Short description for the catalog card
    pub description: String,
    /// Arrangement and labor charge, independent of component cost
    pub base_price: Decimal,
    /// Derived price charged to the customer
    pub total_price: Decimal,
    /// Whether the bouquet can currently be ordered
    pub available: bool,
    /// When the bouquet was created
    pub created_at: DateTime,
    /// When the bouquet or its composition last changed
    pub updated_at: DateTime,
}

/// Defines relationships between Bouquet and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A bouquet owns its composition entries
    #[sea_orm(has_many = "super::bouquet_component::Entity")]
    BouquetComponents,
    /// Event tag links
    #[sea_orm(has_many = "super::bouquet_event::Entity")]
    BouquetEvents,
    /// Orders placed for this bouquet
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::bouquet_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BouquetComponents.def()
    }
}

impl Related<super::bouquet_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BouquetEvents.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        super::bouquet_event::Relation::Event.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::bouquet_event::Relation::Bouquet.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
