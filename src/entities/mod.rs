//! Entity module - Contains all SeaORM entity definitions for the catalog database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod bouquet;
pub mod bouquet_component;
pub mod bouquet_event;
pub mod component;
pub mod consultation;
pub mod event;
pub mod order;
pub mod price_bracket;

// Re-export specific types to avoid conflicts
pub use bouquet::{Column as BouquetColumn, Entity as Bouquet, Model as BouquetModel};
pub use bouquet_component::{
    Column as BouquetComponentColumn, Entity as BouquetComponent, Model as BouquetComponentModel,
};
pub use bouquet_event::{
    Column as BouquetEventColumn, Entity as BouquetEvent, Model as BouquetEventModel,
};
pub use component::{
    Column as ComponentColumn, ComponentKind, Entity as Component, Model as ComponentModel,
};
pub use consultation::{
    Column as ConsultationColumn, Entity as Consultation, Model as ConsultationModel,
};
pub use event::{Column as EventColumn, Entity as Event, Model as EventModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use price_bracket::{
    Column as PriceBracketColumn, Entity as PriceBracket, Model as PriceBracketModel,
};
