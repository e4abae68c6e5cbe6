//! Bouquet business logic - catalog entries, their composition and derived price.
//!
//! A bouquet's `total_price` is cached on its row. Every mutation path that can change
//! it (creation, base price, adding, re-quantifying or removing a component) runs in a
//! database transaction and calls [`recalculate_total_price`] before committing, so a
//! reader never observes a stale total.

use crate::{
    core::{
        component::require_component_by_name,
        event::events_for_bouquet,
        order::count_orders_for_bouquet,
        pricing::{self, CompositionLine},
    },
    entities::{
        Bouquet, BouquetComponent, BouquetEvent, Component, bouquet, bouquet_component,
        bouquet_event, component,
    },
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// A bouquet with its composition and event tags, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BouquetDetails {
    /// The bouquet row, including the cached total
    pub bouquet: bouquet::Model,
    /// Components and quantities
    pub composition: Vec<CompositionLine>,
    /// Names of the occasions the bouquet is tagged for
    pub events: Vec<String>,
}

/// Retrieves every bouquet ordered by name.
pub async fn get_all_bouquets<C>(db: &C) -> Result<Vec<bouquet::Model>>
where
    C: ConnectionTrait,
{
    Bouquet::find()
        .order_by_asc(bouquet::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves bouquets that can currently be ordered, ordered by name.
pub async fn get_available_bouquets<C>(db: &C) -> Result<Vec<bouquet::Model>>
where
    C: ConnectionTrait,
{
    Bouquet::find()
        .filter(bouquet::Column::Available.eq(true))
        .order_by_asc(bouquet::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a bouquet by id.
pub async fn get_bouquet_by_id<C>(db: &C, bouquet_id: i64) -> Result<Option<bouquet::Model>>
where
    C: ConnectionTrait,
{
    Bouquet::find_by_id(bouquet_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a bouquet by its unique name.
pub async fn get_bouquet_by_name<C>(db: &C, name: &str) -> Result<Option<bouquet::Model>>
where
    C: ConnectionTrait,
{
    Bouquet::find()
        .filter(bouquet::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a bouquet by id, failing with `BouquetNotFound` when it does not exist.
pub async fn require_bouquet<C>(db: &C, bouquet_id: i64) -> Result<bouquet::Model>
where
    C: ConnectionTrait,
{
    get_bouquet_by_id(db, bouquet_id)
        .await?
        .ok_or_else(|| Error::BouquetNotFound {
            id: bouquet_id.to_string(),
        })
}

/// Loads a bouquet's composition, ordered by component name.
pub async fn get_composition<C>(db: &C, bouquet_id: i64) -> Result<Vec<CompositionLine>>
where
    C: ConnectionTrait,
{
    let rows = BouquetComponent::find()
        .filter(bouquet_component::Column::BouquetId.eq(bouquet_id))
        .find_also_related(Component)
        .order_by_asc(component::Column::Name)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(entry, component)| {
            component
                .map(|component| CompositionLine {
                    component,
                    quantity: entry.quantity,
                })
                .ok_or_else(|| Error::ComponentNotFound {
                    name: entry.component_id.to_string(),
                })
        })
        .collect()
}

/// Loads a bouquet with its composition and event names.
pub async fn get_bouquet_details<C>(db: &C, bouquet_id: i64) -> Result<BouquetDetails>
where
    C: ConnectionTrait,
{
    let bouquet = require_bouquet(db, bouquet_id).await?;
    let composition = get_composition(db, bouquet_id).await?;
    let events = events_for_bouquet(db, bouquet_id)
        .await?
        .into_iter()
        .map(|event| event.name)
        .collect();

    Ok(BouquetDetails {
        bouquet,
        composition,
        events,
    })
}

/// Re-derives a bouquet's total price from its base price and composition and
/// persists it.
///
/// Every mutation of a bouquet's price inputs must call this on the same connection or
/// transaction as the mutation itself, before the change becomes visible.
pub async fn recalculate_total_price<C>(db: &C, bouquet_id: i64) -> Result<bouquet::Model>
where
    C: ConnectionTrait,
{
    let bouquet = require_bouquet(db, bouquet_id).await?;
    let composition = get_composition(db, bouquet_id).await?;
    let total_price = pricing::compute_total_price(bouquet.base_price, &composition)?;

    debug!(
        "Bouquet '{}': base {} + {} line(s) = {}",
        bouquet.name,
        bouquet.base_price,
        composition.len(),
        total_price
    );

    let mut active: bouquet::ActiveModel = bouquet.into();
    active.total_price = Set(total_price);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Creates a bouquet. A missing base price defaults to zero.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The base price is negative
/// - The insert fails (including a duplicate name)
#[instrument(skip(db))]
pub async fn create_bouquet<C>(
    db: &C,
    name: &str,
    description: &str,
    base_price: Option<Decimal>,
) -> Result<bouquet::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let name = pricing::validate_name("Bouquet", name)?;
    let base_price = pricing::validate_amount(base_price.unwrap_or(Decimal::ZERO))?;

    let txn = db.begin().await?;

    let now = chrono::Utc::now().naive_utc();
    let bouquet = bouquet::ActiveModel {
        name: Set(name),
        description: Set(description.trim().to_string()),
        base_price: Set(base_price),
        total_price: Set(base_price),
        available: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = bouquet.insert(&txn).await?;
    let created = recalculate_total_price(&txn, created.id).await?;

    txn.commit().await?;
    info!("Created bouquet '{}' ({})", created.name, created.total_price);
    Ok(created)
}

/// Changes a bouquet's base price and recomputes its total.
#[instrument(skip(db))]
pub async fn set_base_price<C>(
    db: &C,
    bouquet_id: i64,
    base_price: Decimal,
) -> Result<bouquet::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let base_price = pricing::validate_amount(base_price)?;

    let txn = db.begin().await?;

    let mut active: bouquet::ActiveModel = require_bouquet(&txn, bouquet_id).await?.into();
    active.base_price = Set(base_price);
    active.update(&txn).await?;
    let updated = recalculate_total_price(&txn, bouquet_id).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Marks a bouquet as orderable or not. Does not affect its price.
pub async fn set_availability<C>(
    db: &C,
    bouquet_id: i64,
    available: bool,
) -> Result<bouquet::Model>
where
    C: ConnectionTrait,
{
    let mut active: bouquet::ActiveModel = require_bouquet(db, bouquet_id).await?.into();
    active.available = Set(available);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Adds `quantity` units of a component to a bouquet.
///
/// If the component is already part of the bouquet its quantity grows by `quantity`,
/// keeping one entry per (bouquet, component) pair. The entry and the bouquet's new total
/// are written in one transaction; when the new total would exceed the maximum amount
/// nothing is written.
///
/// # Arguments
/// * `bouquet_id` - The bouquet to extend
/// * `component_name` - Name of an existing component
/// * `quantity` - Units to add, at least one
///
/// # Errors
/// - `InvalidQuantity` when `quantity < 1` (checked before touching storage)
/// - `BouquetNotFound` / `ComponentNotFound` for unknown references
/// - `InvalidAmount` when the resulting total is out of range
#[instrument(skip(db))]
pub async fn add_component<C>(
    db: &C,
    bouquet_id: i64,
    component_name: &str,
    quantity: i32,
) -> Result<bouquet::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let quantity = pricing::validate_quantity(quantity)?;

    let txn = db.begin().await?;

    require_bouquet(&txn, bouquet_id).await?;
    let component = require_component_by_name(&txn, component_name).await?;

    match BouquetComponent::find_by_id((bouquet_id, component.id))
        .one(&txn)
        .await?
    {
        Some(entry) => {
            let combined = entry
                .quantity
                .checked_add(quantity)
                .ok_or(Error::InvalidQuantity { quantity })?;
            let mut active: bouquet_component::ActiveModel = entry.into();
            active.quantity = Set(combined);
            active.update(&txn).await?;
        }
        None => {
            let entry = bouquet_component::ActiveModel {
                bouquet_id: Set(bouquet_id),
                component_id: Set(component.id),
                quantity: Set(quantity),
            };
            BouquetComponent::insert(entry)
                .exec_without_returning(&txn)
                .await?;
        }
    }

    let updated = recalculate_total_price(&txn, bouquet_id).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Sets the quantity of a component in a bouquet, creating the entry when missing.
///
/// # Errors
/// - `InvalidQuantity` when `quantity < 1`; remove the component instead
/// - `BouquetNotFound` / `ComponentNotFound` for unknown references
#[instrument(skip(db))]
pub async fn set_component_quantity<C>(
    db: &C,
    bouquet_id: i64,
    component_name: &str,
    quantity: i32,
) -> Result<bouquet::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let quantity = pricing::validate_quantity(quantity)?;

    let txn = db.begin().await?;

    require_bouquet(&txn, bouquet_id).await?;
    let component = require_component_by_name(&txn, component_name).await?;

    match BouquetComponent::find_by_id((bouquet_id, component.id))
        .one(&txn)
        .await?
    {
        Some(entry) => {
            let mut active: bouquet_component::ActiveModel = entry.into();
            active.quantity = Set(quantity);
            active.update(&txn).await?;
        }
        None => {
            let entry = bouquet_component::ActiveModel {
                bouquet_id: Set(bouquet_id),
                component_id: Set(component.id),
                quantity: Set(quantity),
            };
            BouquetComponent::insert(entry)
                .exec_without_returning(&txn)
                .await?;
        }
    }

    let updated = recalculate_total_price(&txn, bouquet_id).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Removes a component from a bouquet entirely.
///
/// # Errors
/// `ComponentNotFound` when the component does not exist or is not part of the bouquet.
#[instrument(skip(db))]
pub async fn remove_component<C>(
    db: &C,
    bouquet_id: i64,
    component_name: &str,
) -> Result<bouquet::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    require_bouquet(&txn, bouquet_id).await?;
    let component = require_component_by_name(&txn, component_name).await?;

    let deleted = BouquetComponent::delete_by_id((bouquet_id, component.id))
        .exec(&txn)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(Error::ComponentNotFound {
            name: component.name,
        });
    }

    let updated = recalculate_total_price(&txn, bouquet_id).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Deletes a bouquet together with its composition entries and event links.
///
/// # Errors
/// `BouquetInUse` when orders reference the bouquet.
#[instrument(skip(db))]
pub async fn delete_bouquet<C>(db: &C, bouquet_id: i64) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let bouquet = require_bouquet(&txn, bouquet_id).await?;
    let orders = count_orders_for_bouquet(&txn, bouquet_id).await?;
    if orders > 0 {
        return Err(Error::BouquetInUse {
            name: bouquet.name,
            orders,
        });
    }

    BouquetComponent::delete_many()
        .filter(bouquet_component::Column::BouquetId.eq(bouquet_id))
        .exec(&txn)
        .await?;
    BouquetEvent::delete_many()
        .filter(bouquet_event::Column::BouquetId.eq(bouquet_id))
        .exec(&txn)
        .await?;
    Bouquet::delete_by_id(bouquet_id).exec(&txn).await?;

    txn.commit().await?;
    info!("Deleted bouquet '{}'", bouquet.name);
    Ok(())
}
