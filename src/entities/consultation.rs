//! Consultation entity - a callback request left by a customer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Consultation request database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "consultations")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name the customer gave
    pub name: String,
    /// Phone number to call back
    pub phone: String,
    /// When the request was left
    pub created_at: DateTimeUtc,
}

/// `Consultation` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
