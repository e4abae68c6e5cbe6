//! Event tag entity - a named occasion such as "birthday" or "wedding".

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event tag database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique occasion name
    #[sea_orm(unique)]
    pub name: String,
}

/// Defines relationships between Event and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Bouquet links
    #[sea_orm(has_many = "super::bouquet_event::Entity")]
    BouquetEvents,
}

impl Related<super::bouquet_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BouquetEvents.def()
    }
}

impl Related<super::bouquet::Entity> for Entity {
    fn to() -> RelationDef {
        super::bouquet_event::Relation::Bouquet.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::bouquet_event::Relation::Event.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
