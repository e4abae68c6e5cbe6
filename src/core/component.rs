//! Component business logic - flowers and accessories bouquets are built from.
//!
//! Components are shared across bouquets. Changing a unit price therefore changes the
//! total of every bouquet that uses the component, and those totals are rewritten in the
//! same transaction as the price change.

use crate::{
    core::{bouquet, pricing},
    entities::{BouquetComponent, Component, ComponentKind, bouquet_component, component},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Retrieves all components, flowers first, then alphabetically by name.
pub async fn get_all_components<C>(db: &C) -> Result<Vec<component::Model>>
where
    C: ConnectionTrait,
{
    // "flower" sorts after "accessory"
    Component::find()
        .order_by_desc(component::Column::Kind)
        .order_by_asc(component::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a component by its unique name.
pub async fn get_component_by_name<C>(db: &C, name: &str) -> Result<Option<component::Model>>
where
    C: ConnectionTrait,
{
    Component::find()
        .filter(component::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a component by name, failing with `ComponentNotFound` when it does not exist.
pub async fn require_component_by_name<C>(db: &C, name: &str) -> Result<component::Model>
where
    C: ConnectionTrait,
{
    get_component_by_name(db, name)
        .await?
        .ok_or_else(|| Error::ComponentNotFound {
            name: name.trim().to_string(),
        })
}

/// Retrieves a component by its id.
pub async fn get_component_by_id<C>(db: &C, component_id: i64) -> Result<Option<component::Model>>
where
    C: ConnectionTrait,
{
    Component::find_by_id(component_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new component after validating its name, price and stock.
///
/// The name is trimmed and must be unique across flowers and accessories alike. The unit
/// price is rounded to two places before it is stored.
///
/// # Arguments
/// * `name` - Display name, also the key bouquets and imports refer to it by
/// * `kind` - Flower or accessory
/// * `unit_price` - Price of one unit, between zero and [`pricing::MAX_AMOUNT`]
/// * `stock` - Units on hand
/// * `note` - Optional free-form note shown to staff
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The unit price is negative or above the maximum
/// - The stock is negative
/// - The insert fails (including a duplicate name)
#[instrument(skip(db))]
pub async fn create_component<C>(
    db: &C,
    name: &str,
    kind: ComponentKind,
    unit_price: Decimal,
    stock: i32,
    note: Option<String>,
) -> Result<component::Model>
where
    C: ConnectionTrait,
{
    let name = pricing::validate_name("Component", name)?;
    let unit_price = pricing::validate_amount(unit_price)?;
    if stock < 0 {
        return Err(Error::InvalidStock { stock });
    }

    let component = component::ActiveModel {
        name: Set(name),
        kind: Set(kind),
        unit_price: Set(unit_price),
        stock: Set(stock),
        note: Set(note.filter(|n| !n.trim().is_empty())),
        ..Default::default()
    };
    let created = component.insert(db).await?;
    info!("Created component '{}' at {}", created.name, created.unit_price);
    Ok(created)
}

/// Ids of the bouquets whose composition includes the component.
async fn bouquets_using<C>(db: &C, component_id: i64) -> Result<Vec<i64>>
where
    C: ConnectionTrait,
{
    BouquetComponent::find()
        .select_only()
        .column(bouquet_component::Column::BouquetId)
        .filter(bouquet_component::Column::ComponentId.eq(component_id))
        .into_tuple()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Changes a component's unit price and recomputes every bouquet that uses it.
///
/// Returns the updated component together with the number of bouquets repriced.
#[instrument(skip(db))]
pub async fn update_component_price<C>(
    db: &C,
    name: &str,
    new_price: Decimal,
) -> Result<(component::Model, usize)>
where
    C: ConnectionTrait + TransactionTrait,
{
    let new_price = pricing::validate_amount(new_price)?;

    let txn = db.begin().await?;

    let mut component: component::ActiveModel =
        require_component_by_name(&txn, name).await?.into();
    component.unit_price = Set(new_price);
    let component = component.update(&txn).await?;

    let bouquet_ids = bouquets_using(&txn, component.id).await?;

    for bouquet_id in &bouquet_ids {
        bouquet::recalculate_total_price(&txn, *bouquet_id).await?;
    }

    txn.commit().await?;
    debug!(
        "Component '{}' repriced to {}, {} bouquet(s) recalculated",
        component.name,
        component.unit_price,
        bouquet_ids.len()
    );
    Ok((component, bouquet_ids.len()))
}

/// Sets the number of units in stock.
pub async fn set_component_stock<C>(db: &C, name: &str, stock: i32) -> Result<component::Model>
where
    C: ConnectionTrait,
{
    if stock < 0 {
        return Err(Error::InvalidStock { stock });
    }
    let mut component: component::ActiveModel = require_component_by_name(db, name).await?.into();
    component.stock = Set(stock);
    component.update(db).await.map_err(Into::into)
}

/// Deletes a component, removing it from every bouquet that uses it.
///
/// The composition entries, the component row and the repriced totals of the affected
/// bouquets are written in one transaction. Returns the number of bouquets repriced.
///
/// # Errors
/// `ComponentNotFound` for an unknown name.
#[instrument(skip(db))]
pub async fn delete_component<C>(db: &C, name: &str) -> Result<usize>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let component = require_component_by_name(&txn, name).await?;
    let bouquet_ids = bouquets_using(&txn, component.id).await?;

    BouquetComponent::delete_many()
        .filter(bouquet_component::Column::ComponentId.eq(component.id))
        .exec(&txn)
        .await?;
    Component::delete_by_id(component.id).exec(&txn).await?;

    for bouquet_id in &bouquet_ids {
        bouquet::recalculate_total_price(&txn, *bouquet_id).await?;
    }

    txn.commit().await?;
    info!(
        "Deleted component '{}', {} bouquet(s) repriced",
        component.name,
        bouquet_ids.len()
    );
    Ok(bouquet_ids.len())
}
