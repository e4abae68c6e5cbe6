//! Event tag operations - occasions bouquets are recommended for.

use crate::{
    core::{bouquet::require_bouquet, pricing},
    entities::{BouquetEvent, Event, bouquet_event, event},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Retrieves all event tags ordered by name.
pub async fn list_events<C>(db: &C) -> Result<Vec<event::Model>>
where
    C: ConnectionTrait,
{
    Event::find()
        .order_by_asc(event::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an event tag by its unique name.
pub async fn get_event_by_name<C>(db: &C, name: &str) -> Result<Option<event::Model>>
where
    C: ConnectionTrait,
{
    Event::find()
        .filter(event::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the named event, creating it first if needed.
///
/// The flag is true when the event was created by this call.
pub async fn get_or_create_event<C>(db: &C, name: &str) -> Result<(event::Model, bool)>
where
    C: ConnectionTrait,
{
    let name = pricing::validate_name("Event", name)?;
    if let Some(existing) = get_event_by_name(db, &name).await? {
        return Ok((existing, false));
    }

    let created = event::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!("Added event '{}'", created.name);
    Ok((created, true))
}

/// Event tags a bouquet is linked to, ordered by name.
pub async fn events_for_bouquet<C>(db: &C, bouquet_id: i64) -> Result<Vec<event::Model>>
where
    C: ConnectionTrait,
{
    Event::find()
        .inner_join(BouquetEvent)
        .filter(bouquet_event::Column::BouquetId.eq(bouquet_id))
        .order_by_asc(event::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Links a bouquet to an event tag, creating the tag if it is new.
///
/// Tagging twice is a no-op. Returns true when a new link was written.
pub async fn tag_bouquet<C>(db: &C, bouquet_id: i64, event_name: &str) -> Result<bool>
where
    C: ConnectionTrait,
{
    require_bouquet(db, bouquet_id).await?;
    let (event, _) = get_or_create_event(db, event_name).await?;

    if BouquetEvent::find_by_id((bouquet_id, event.id))
        .one(db)
        .await?
        .is_some()
    {
        debug!("Bouquet {} already tagged '{}'", bouquet_id, event.name);
        return Ok(false);
    }

    let link = bouquet_event::ActiveModel {
        bouquet_id: Set(bouquet_id),
        event_id: Set(event.id),
    };
    BouquetEvent::insert(link).exec_without_returning(db).await?;
    Ok(true)
}

/// Removes a bouquet's link to an event tag. Returns true when a link was removed.
///
/// # Errors
/// `EventNotFound` when no event has that name.
pub async fn untag_bouquet<C>(db: &C, bouquet_id: i64, event_name: &str) -> Result<bool>
where
    C: ConnectionTrait,
{
    let event = get_event_by_name(db, event_name)
        .await?
        .ok_or_else(|| Error::EventNotFound {
            name: event_name.trim().to_string(),
        })?;

    let deleted = BouquetEvent::delete_by_id((bouquet_id, event.id))
        .exec(db)
        .await?;
    Ok(deleted.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_get_or_create_event() -> Result<()> {
        let db = setup_test_db().await?;

        let (birthday, created) = get_or_create_event(&db, "birthday").await?;
        assert!(created);
        let (again, created) = get_or_create_event(&db, " birthday ").await?;
        assert!(!created);
        assert_eq!(again.id, birthday.id);

        let result = get_or_create_event(&db, "").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_tag_and_untag_bouquet() -> Result<()> {
        let db = setup_test_db().await?;
        let bouquet = create_test_bouquet(&db, "Roses", Decimal::new(500, 0)).await?;

        assert!(tag_bouquet(&db, bouquet.id, "wedding").await?);
        assert!(tag_bouquet(&db, bouquet.id, "anniversary").await?);
        assert!(!tag_bouquet(&db, bouquet.id, "wedding").await?);

        let names: Vec<String> = events_for_bouquet(&db, bouquet.id)
            .await?
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["anniversary", "wedding"]);
        assert_eq!(list_events(&db).await?.len(), 2);

        assert!(untag_bouquet(&db, bouquet.id, "wedding").await?);
        assert!(!untag_bouquet(&db, bouquet.id, "wedding").await?);
        assert_eq!(events_for_bouquet(&db, bouquet.id).await?.len(), 1);

        let result = untag_bouquet(&db, bouquet.id, "graduation").await;
        assert!(matches!(result, Err(Error::EventNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_tag_unknown_bouquet() -> Result<()> {
        let db = setup_test_db().await?;
        let result = tag_bouquet(&db, 99, "birthday").await;
        assert!(matches!(result, Err(Error::BouquetNotFound { .. })));
        Ok(())
    }
}
