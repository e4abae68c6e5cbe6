//! Catalog loading - seeding reference data from config.toml and bulk import from JSON.
//!
//! Both run in a single transaction and reuse entities that already exist (matched by
//! name), so running them again against the same input changes nothing.

use crate::{
    config::catalog::CatalogConfig,
    core::{bouquet, component, event, price_bracket},
    entities::ComponentKind,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// A catalog document as exported by the shop's data team.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogDocument {
    /// Price brackets for the quiz
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
    /// Components bouquets are built from
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
    /// Bouquets with their composition and occasions
    #[serde(default)]
    pub bouquets: Vec<BouquetEntry>,
}

/// A price bracket in the catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceEntry {
    /// Name; derived from the bounds when omitted
    #[serde(default)]
    pub name: Option<String>,
    /// Inclusive lower bound
    #[serde(default)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound
    #[serde(default)]
    pub max_price: Option<Decimal>,
}

/// A component in the catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentEntry {
    /// Unique component name
    pub name: String,
    /// Flower or accessory
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Unit price
    pub price: Decimal,
    /// Free-form note
    #[serde(default)]
    pub note: Option<String>,
    /// Units in stock
    #[serde(default)]
    pub stock: i32,
}

/// A bouquet in the catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct BouquetEntry {
    /// Unique bouquet name
    pub name: String,
    /// Arrangement charge; zero when omitted
    #[serde(default)]
    pub base_price: Option<Decimal>,
    /// Catalog card text
    #[serde(default)]
    pub description: String,
    /// Occasion names
    #[serde(default)]
    pub events: Vec<String>,
    /// Components by name
    #[serde(default)]
    pub components: Vec<CompositionEntry>,
}

/// One line of a bouquet's composition in the catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct CompositionEntry {
    /// Component name, must exist in the document or the database
    pub name: String,
    /// Units of the component
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

/// What an import created or touched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Price brackets created
    pub price_brackets_created: usize,
    /// Components created
    pub components_created: usize,
    /// Bouquets created
    pub bouquets_created: usize,
    /// Event tags created
    pub events_created: usize,
    /// Composition entries written (created or re-quantified)
    pub composition_entries: usize,
}

/// What seeding from configuration created.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    /// Event tags created
    pub events_created: usize,
    /// Price brackets created
    pub price_brackets_created: usize,
}

/// Reads a catalog document from a JSON file.
///
/// # Errors
/// I/O errors reading the file, JSON errors parsing it.
pub fn load_catalog_document<P: AsRef<Path>>(path: P) -> Result<CatalogDocument> {
    let path = path.as_ref();
    debug!("Reading catalog document from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Creates the named price bracket unless one with that name exists.
/// Returns true when it was created.
async fn ensure_price_bracket<C>(
    db: &C,
    name: Option<&str>,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let name = name.map_or_else(|| price_bracket::bracket_label(min, max), str::to_string);
    if price_bracket::get_price_bracket_by_name(db, &name)
        .await?
        .is_some()
    {
        warn!("Price bracket '{}' already exists. Skipping.", name);
        return Ok(false);
    }
    price_bracket::create_price_bracket(db, Some(&name), min, max).await?;
    Ok(true)
}

/// Inserts the event tags and price brackets listed in the configuration that do not
/// exist yet.
#[instrument(skip(db, config))]
pub async fn seed_reference_data<C>(db: &C, config: &CatalogConfig) -> Result<SeedSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    info!(
        "Seeding {} event(s) and {} price bracket(s) from configuration.",
        config.events.len(),
        config.price_brackets.len()
    );
    let txn = db.begin().await?;
    let mut summary = SeedSummary::default();

    for name in &config.events {
        let (_, created) = event::get_or_create_event(&txn, name).await?;
        if created {
            summary.events_created += 1;
        }
    }

    for bracket in &config.price_brackets {
        if ensure_price_bracket(&txn, bracket.name.as_deref(), bracket.min, bracket.max).await? {
            summary.price_brackets_created += 1;
        }
    }

    txn.commit().await?;
    Ok(summary)
}

/// Imports a catalog document in one transaction.
///
/// Existing components and bouquets are reused as they are; composition quantities are
/// set to the document's values and every imported bouquet is repriced. A composition
/// line naming an unknown component aborts the whole import with `ComponentNotFound`.
#[instrument(skip(db, document))]
pub async fn import_catalog<C>(db: &C, document: &CatalogDocument) -> Result<ImportSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let mut summary = ImportSummary::default();

    for price in &document.prices {
        if ensure_price_bracket(&txn, price.name.as_deref(), price.min_price, price.max_price)
            .await?
        {
            summary.price_brackets_created += 1;
        }
    }

    for entry in &document.components {
        if component::get_component_by_name(&txn, &entry.name)
            .await?
            .is_none()
        {
            component::create_component(
                &txn,
                &entry.name,
                entry.kind,
                entry.price,
                entry.stock,
                entry.note.clone(),
            )
            .await?;
            summary.components_created += 1;
        }
    }

    for entry in &document.bouquets {
        let existing = bouquet::get_bouquet_by_name(&txn, &entry.name).await?;
        let target = match existing {
            Some(found) => found,
            None => {
                summary.bouquets_created += 1;
                bouquet::create_bouquet(&txn, &entry.name, &entry.description, entry.base_price)
                    .await?
            }
        };

        for event_name in &entry.events {
            if event::get_event_by_name(&txn, event_name).await?.is_none() {
                summary.events_created += 1;
            }
            event::tag_bouquet(&txn, target.id, event_name).await?;
        }

        for line in &entry.components {
            bouquet::set_component_quantity(&txn, target.id, &line.name, line.quantity).await?;
            summary.composition_entries += 1;
        }

        let priced = bouquet::recalculate_total_price(&txn, target.id).await?;
        debug!("Imported bouquet '{}' at {}", priced.name, priced.total_price);
    }

    txn.commit().await?;
    info!("Catalog import finished: {:?}", summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::catalog::PriceBracketConfig;
    use crate::errors::Error;
    use crate::test_utils::setup_test_db;
    use std::io::Write;

    const CATALOG_JSON: &str = r#"{
        "prices": [
            {"name": "Budget", "max_price": 1000},
            {"min_price": 1000}
        ],
        "components": [
            {"name": "Rose", "type": "flower", "price": 40, "stock": 100},
            {"name": "Ribbon", "type": "accessory", "price": "50.00", "note": "satin"}
        ],
        "bouquets": [
            {
                "name": "Spring Mix",
                "base_price": 300,
                "description": "Roses with a satin ribbon",
                "events": ["birthday"],
                "components": [
                    {"name": "Rose", "quantity": 5},
                    {"name": "Ribbon"}
                ]
            },
            {
                "name": "Grand Bouquet",
                "base_price": 1500,
                "events": ["birthday", "wedding"]
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_import_catalog() -> Result<()> {
        let db = setup_test_db().await?;
        let document: CatalogDocument = serde_json::from_str(CATALOG_JSON)?;

        let summary = import_catalog(&db, &document).await?;
        assert_eq!(
            summary,
            ImportSummary {
                price_brackets_created: 2,
                components_created: 2,
                bouquets_created: 2,
                events_created: 2,
                composition_entries: 2,
            }
        );

        let spring_mix = bouquet::get_bouquet_by_name(&db, "Spring Mix")
            .await?
            .unwrap();
        assert_eq!(spring_mix.total_price, Decimal::new(550, 0));
        assert!(
            price_bracket::get_price_bracket_by_name(&db, "from 1000.00")
                .await?
                .is_some()
        );

        let budget = crate::core::recommendation::filter_bouquets(
            &db,
            Some("birthday"),
            Some("Budget"),
        )
        .await?;
        assert_eq!(budget.bouquets.len(), 1);
        assert_eq!(budget.bouquets[0].name, "Spring Mix");

        Ok(())
    }

    #[tokio::test]
    async fn test_import_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let document: CatalogDocument = serde_json::from_str(CATALOG_JSON)?;

        import_catalog(&db, &document).await?;
        let second = import_catalog(&db, &document).await?;
        assert_eq!(second.components_created, 0);
        assert_eq!(second.bouquets_created, 0);
        assert_eq!(second.events_created, 0);
        assert_eq!(second.price_brackets_created, 0);

        let spring_mix = bouquet::get_bouquet_by_name(&db, "Spring Mix")
            .await?
            .unwrap();
        // quantities are set, not accumulated
        assert_eq!(spring_mix.total_price, Decimal::new(550, 0));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_component_rolls_back_import() -> Result<()> {
        let db = setup_test_db().await?;
        let document: CatalogDocument = serde_json::from_str(
            r#"{
                "components": [{"name": "Rose", "type": "flower", "price": 40}],
                "bouquets": [{
                    "name": "Mystery",
                    "base_price": 100,
                    "components": [{"name": "Orchid", "quantity": 2}]
                }]
            }"#,
        )?;

        let result = import_catalog(&db, &document).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ComponentNotFound { name } if name == "Orchid"
        ));

        assert!(bouquet::get_all_bouquets(&db).await?.is_empty());
        assert!(component::get_all_components(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_quantity_rolls_back_import() -> Result<()> {
        let db = setup_test_db().await?;
        let document: CatalogDocument = serde_json::from_str(
            r#"{
                "components": [{"name": "Rose", "type": "flower", "price": 40}],
                "bouquets": [{"name": "Empty", "components": [{"name": "Rose", "quantity": 0}]}]
            }"#,
        )?;

        let result = import_catalog(&db, &document).await;
        assert!(result.unwrap_err().is_validation());
        assert!(bouquet::get_all_bouquets(&db).await?.is_empty());

        Ok(())
    }

    #[test]
    fn test_load_catalog_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG_JSON.as_bytes()).unwrap();

        let document = load_catalog_document(file.path()).unwrap();
        assert_eq!(document.components.len(), 2);
        assert_eq!(document.components[1].kind, ComponentKind::Accessory);
        assert_eq!(document.bouquets[0].components[1].quantity, 1);
        assert!(document.bouquets[1].components.is_empty());
    }

    #[test]
    fn test_load_catalog_document_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(matches!(
            load_catalog_document(file.path()),
            Err(Error::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_seed_reference_data() -> Result<()> {
        let db = setup_test_db().await?;
        let config = CatalogConfig {
            events: vec!["birthday".to_string(), "wedding".to_string()],
            price_brackets: vec![
                PriceBracketConfig {
                    name: Some("Budget".to_string()),
                    min: None,
                    max: Some(Decimal::new(1000, 0)),
                },
                PriceBracketConfig {
                    name: None,
                    min: Some(Decimal::new(1000, 0)),
                    max: Some(Decimal::new(3000, 0)),
                },
            ],
            ..Default::default()
        };

        let summary = seed_reference_data(&db, &config).await?;
        assert_eq!(
            summary,
            SeedSummary {
                events_created: 2,
                price_brackets_created: 2,
            }
        );

        let again = seed_reference_data(&db, &config).await?;
        assert_eq!(again, SeedSummary::default());
        assert_eq!(event::list_events(&db).await?.len(), 2);
        assert_eq!(price_bracket::list_price_brackets(&db).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_rejects_inverted_bracket() -> Result<()> {
        let db = setup_test_db().await?;
        let config = CatalogConfig {
            events: vec!["birthday".to_string()],
            price_brackets: vec![PriceBracketConfig {
                name: Some("Broken".to_string()),
                min: Some(Decimal::new(3000, 0)),
                max: Some(Decimal::new(1000, 0)),
            }],
            ..Default::default()
        };

        let result = seed_reference_data(&db, &config).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidPriceBracket { .. }
        ));
        // the event seeded before the failure was rolled back too
        assert!(event::list_events(&db).await?.is_empty());

        Ok(())
    }
}
