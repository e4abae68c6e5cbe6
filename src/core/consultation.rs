//! Consultation requests - customers asking to be called back.

use crate::{
    entities::{Consultation, consultation},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Records a callback request.
///
/// # Errors
/// `Validation` when the name or phone is blank.
pub async fn request_consultation<C>(
    db: &C,
    name: &str,
    phone: &str,
) -> Result<consultation::Model>
where
    C: ConnectionTrait,
{
    let (name, phone) = (name.trim(), phone.trim());
    if name.is_empty() || phone.is_empty() {
        return Err(Error::Validation {
            message: "Name and phone are required for a consultation".to_string(),
        });
    }

    let created = consultation::ActiveModel {
        name: Set(name.to_string()),
        phone: Set(phone.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!("Consultation requested by {}", created.name);
    Ok(created)
}

/// All consultation requests, newest first.
pub async fn list_consultations<C>(db: &C) -> Result<Vec<consultation::Model>>
where
    C: ConnectionTrait,
{
    Consultation::find()
        .order_by_desc(consultation::Column::CreatedAt)
        .order_by_desc(consultation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_request_consultation() -> Result<()> {
        let db = setup_test_db().await?;

        request_consultation(&db, "Ivan", "+79005550000").await?;
        let second = request_consultation(&db, " Olga ", " +79005551111 ").await?;
        assert_eq!(second.name, "Olga");
        assert_eq!(second.phone, "+79005551111");

        let all = list_consultations(&db).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_request_consultation_requires_contact() -> Result<()> {
        let db = setup_test_db().await?;
        let result = request_consultation(&db, "Ivan", "").await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(list_consultations(&db).await?.is_empty());
        Ok(())
    }
}
