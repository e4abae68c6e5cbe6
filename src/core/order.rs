//! Order placement - records a delivery request and fixes the amount charged.
//!
//! The order's `total_cost` is a snapshot of the bouquet's cached total price, which
//! every pricing mutation keeps current. Placing an order never writes to the bouquet.

use crate::{
    core::{bouquet, pricing},
    entities::{Order, order},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Customer input for a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Bouquet being ordered
    pub bouquet_id: i64,
    /// Customer's full name
    pub customer_name: String,
    /// Customer's contact phone
    pub customer_phone: String,
    /// Delivery address
    pub delivery_address: String,
    /// Requested delivery slot
    pub delivery_time: String,
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: format!("{field} is required"),
        });
    }
    Ok(trimmed.to_string())
}

/// Places an order for an available bouquet.
///
/// Customer fields are trimmed and must all be present. The order stores the bouquet's
/// current total as `total_cost`; later catalog changes do not alter it.
///
/// # Arguments
/// * `new_order` - Bouquet id plus the customer's name, phone, address and delivery slot
///
/// # Errors
/// Returns an error if:
/// - Any customer field is blank
/// - The bouquet does not exist (`BouquetNotFound`)
/// - The bouquet is not available (`BouquetUnavailable`)
#[instrument(skip(db, new_order), fields(bouquet_id = new_order.bouquet_id))]
pub async fn place_order<C>(db: &C, new_order: NewOrder) -> Result<order::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let customer_name = required("Customer name", &new_order.customer_name)?;
    let customer_phone = required("Customer phone", &new_order.customer_phone)?;
    let delivery_address = required("Delivery address", &new_order.delivery_address)?;
    let delivery_time = required("Delivery time", &new_order.delivery_time)?;

    let txn = db.begin().await?;

    let ordered = bouquet::require_bouquet(&txn, new_order.bouquet_id).await?;
    if !ordered.available {
        return Err(Error::BouquetUnavailable { name: ordered.name });
    }

    let created = order::ActiveModel {
        bouquet_id: Set(ordered.id),
        customer_name: Set(customer_name),
        customer_phone: Set(customer_phone),
        delivery_address: Set(delivery_address),
        delivery_time: Set(delivery_time),
        total_cost: Set(pricing::round_currency(ordered.total_price)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(
        "Order {} placed for '{}' ({})",
        created.id, ordered.name, created.total_cost
    );
    Ok(created)
}

/// Retrieves an order by id.
pub async fn get_order_by_id<C>(db: &C, order_id: i64) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })
}

/// Orders placed for a bouquet, newest first.
pub async fn list_orders_for_bouquet<C>(db: &C, bouquet_id: i64) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find()
        .filter(order::Column::BouquetId.eq(bouquet_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of orders referencing a bouquet.
pub async fn count_orders_for_bouquet<C>(db: &C, bouquet_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    Order::find()
        .filter(order::Column::BouquetId.eq(bouquet_id))
        .count(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn order_for(bouquet_id: i64) -> NewOrder {
        NewOrder {
            bouquet_id,
            customer_name: "Anna Petrova".to_string(),
            customer_phone: "+79001234567".to_string(),
            delivery_address: "12 Garden St".to_string(),
            delivery_time: "2026-10-20 14:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_place_order_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut blank_phone = order_for(1);
        blank_phone.customer_phone = "  ".to_string();
        let result = place_order(&db, blank_phone).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message } if message == "Customer phone is required"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_snapshots_total() -> Result<()> {
        let (db, spring_mix) = setup_spring_mix().await?;

        let order = place_order(&db, order_for(spring_mix.id)).await?;
        assert_eq!(order.total_cost, Decimal::new(550, 0));
        assert_eq!(order.customer_name, "Anna Petrova");

        // later catalog changes do not touch the placed order
        crate::core::bouquet::set_base_price(&db, spring_mix.id, Decimal::new(400, 0)).await?;
        let reloaded = get_order_by_id(&db, order.id).await?;
        assert_eq!(reloaded.total_cost, Decimal::new(550, 0));

        let orders = list_orders_for_bouquet(&db, spring_mix.id).await?;
        assert_eq!(orders[0].total_cost, Decimal::new(550, 0));
        assert_eq!(orders.len(), 1);
        assert_eq!(count_orders_for_bouquet(&db, spring_mix.id).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_leaves_bouquet_untouched() -> Result<()> {
        let (db, spring_mix) = setup_spring_mix().await?;
        let before = crate::core::bouquet::require_bouquet(&db, spring_mix.id).await?;

        place_order(&db, order_for(spring_mix.id)).await?;

        let after = crate::core::bouquet::require_bouquet(&db, spring_mix.id).await?;
        assert_eq!(after, before);

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_unknown_or_unavailable_bouquet() -> Result<()> {
        let (db, spring_mix) = setup_spring_mix().await?;

        let result = place_order(&db, order_for(999)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::BouquetNotFound { .. }
        ));

        crate::core::bouquet::set_availability(&db, spring_mix.id, false).await?;
        let result = place_order(&db, order_for(spring_mix.id)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::BouquetUnavailable { name } if name == "Spring Mix"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_ordered_bouquet_cannot_be_deleted() -> Result<()> {
        let (db, spring_mix) = setup_spring_mix().await?;
        place_order(&db, order_for(spring_mix.id)).await?;

        let result = crate::core::bouquet::delete_bouquet(&db, spring_mix.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::BouquetInUse { orders: 1, .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = get_order_by_id(&db, 7).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 7 }));
        Ok(())
    }
}
