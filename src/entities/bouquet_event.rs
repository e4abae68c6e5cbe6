//! Bouquet to event tag link (many-to-many join table).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bouquet_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub bouquet_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i64,
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
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
}

impl Related<super::bouquet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bouquet.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
