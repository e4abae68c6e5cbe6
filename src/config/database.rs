//! Database configuration module for the flower shop catalog.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.
//! Creation is idempotent (`IF NOT EXISTS`) and ordered so foreign keys resolve.

use crate::entities::{
    Bouquet, BouquetComponent, BouquetEvent, Component, Consultation, Event, Order, PriceBracket,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/flower_shop.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates every catalog table that does not exist yet.
///
/// Referenced tables are created before the tables holding foreign keys to them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Component).await?;
    create_table(db, &schema, Bouquet).await?;
    create_table(db, &schema, Event).await?;
    create_table(db, &schema, PriceBracket).await?;
    create_table(db, &schema, BouquetComponent).await?;
    create_table(db, &schema, BouquetEvent).await?;
    create_table(db, &schema, Order).await?;
    create_table(db, &schema, Consultation).await?;

    info!("Catalog tables ensured.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        bouquet::Model as BouquetModel, component::Model as ComponentModel,
        order::Model as OrderModel, price_bracket::Model as PriceBracketModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ComponentModel> = Component::find().limit(1).all(&db).await?;
        let _: Vec<BouquetModel> = Bouquet::find().limit(1).all(&db).await?;
        let _: Vec<PriceBracketModel> = PriceBracket::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<BouquetModel> = Bouquet::find().limit(1).all(&db).await?;
        Ok(())
    }
}
