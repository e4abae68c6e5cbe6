/// Catalog reference data and payment settings from config.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;
