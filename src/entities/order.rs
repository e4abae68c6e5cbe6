//! Order entity - a customer's request to deliver one bouquet.
//!
//! `total_cost` is a snapshot of the bouquet's total price when the order was placed,
//! so later catalog edits never change what the customer was charged.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ordered bouquet
    pub bouquet_id: i64,
    /// Customer's full name
    pub customer_name: String,
    /// Customer's contact phone
    pub customer_phone: String,
    /// Where to deliver
    pub delivery_address: String,
    /// Requested delivery slot as entered by the customer
    pub delivery_time: String,
    /// Amount charged, fixed at placement
    pub total_cost: Decimal,
    /// When the order was placed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order is for one bouquet; bouquets with orders cannot be removed
    #[sea_orm(
        belongs_to = "super::bouquet::Entity",
        from = "Column::BouquetId",
        to = "super::bouquet::Column::Id",
        on_delete = "Restrict"
    )]
    Bouquet,
}

impl Related<super::bouquet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bouquet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
