//! Shared test utilities for the flower shop catalog.
//!
//! This module provides common helper functions for setting up test databases
//! and creating catalog entities with sensible defaults.

use crate::{
    core::{bouquet, component},
    entities::{self, ComponentKind},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test flower component.
///
/// # Defaults
/// * `kind`: flower
/// * `stock`: 0
/// * `note`: None
pub async fn create_test_component(
    db: &DatabaseConnection,
    name: &str,
    unit_price: Decimal,
) -> Result<entities::component::Model> {
    component::create_component(db, name, ComponentKind::Flower, unit_price, 0, None).await
}

/// Creates an empty, available bouquet with the given base price.
pub async fn create_test_bouquet(
    db: &DatabaseConnection,
    name: &str,
    base_price: Decimal,
) -> Result<entities::bouquet::Model> {
    bouquet::create_bouquet(db, name, "Test bouquet", Some(base_price)).await
}

/// Sets up the "Spring Mix" bouquet: base 300 with five roses at 40 and one ribbon at 50.
/// Returns (db, bouquet) with the bouquet's total already at 550.
pub async fn setup_spring_mix() -> Result<(DatabaseConnection, entities::bouquet::Model)> {
    let db = setup_test_db().await?;
    create_test_component(&db, "Rose", Decimal::new(40, 0)).await?;
    component::create_component(
        &db,
        "Ribbon",
        ComponentKind::Accessory,
        Decimal::new(50, 0),
        0,
        None,
    )
    .await?;

    let spring_mix = create_test_bouquet(&db, "Spring Mix", Decimal::new(300, 0)).await?;
    bouquet::add_component(&db, spring_mix.id, "Rose", 5).await?;
    let spring_mix = bouquet::add_component(&db, spring_mix.id, "Ribbon", 1).await?;
    Ok((db, spring_mix))
}
