use flower_shop::{
    config::{
        catalog::load_default_config,
        database::{create_connection, create_tables},
    },
    core::{bouquet, catalog_import},
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the catalog configuration
    let config = load_default_config()
        .inspect_err(|e| error!("Failed to load catalog configuration: {}", e))?;

    // 4. Connect and create the schema
    let db = create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed events and price brackets
    let seeded = catalog_import::seed_reference_data(&db, &config).await?;
    info!(
        "Reference data ready ({} event(s), {} price bracket(s) created).",
        seeded.events_created, seeded.price_brackets_created
    );

    // 6. Import the seed catalog, if one is configured
    if let Some(seed_file) = &config.seed_file {
        let document = catalog_import::load_catalog_document(seed_file)
            .inspect_err(|e| error!("Failed to read {}: {}", seed_file.display(), e))?;
        catalog_import::import_catalog(&db, &document).await?;
    }

    for item in bouquet::get_all_bouquets(&db).await? {
        info!(
            "{}: {} ({})",
            item.name,
            item.total_price,
            if item.available { "available" } else { "unavailable" }
        );
    }

    Ok(())
}
