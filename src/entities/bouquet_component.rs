//! Composition entry - how many units of a component go into a bouquet.
//!
//! The composite primary key enforces one entry per (bouquet, component) pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Composition entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bouquet_components")]
pub struct Model {
    /// Owning bouquet
    #[sea_orm(primary_key, auto_increment = false)]
    pub bouquet_id: i64,
    /// Referenced component
    #[sea_orm(primary_key, auto_increment = false)]
    pub component_id: i64,
    /// Units of the component, always at least one
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bouquet::Entity",
        from = "Column::BouquetId",
        to = "super::bouquet::Column::Id",
        on_delete = "Cascade"
    )]
    Bouquet,
    // Removing a component changes bouquet totals, so it goes through
    // `core::component::delete_component` rather than a database cascade.
    #[sea_orm(
        belongs_to = "super::component::Entity",
        from = "Column::ComponentId",
        to = "super::component::Column::Id",
        on_delete = "Restrict"
    )]
    Component,
}

impl Related<super::bouquet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bouquet.def()
    }
}

impl Related<super::component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Component.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
