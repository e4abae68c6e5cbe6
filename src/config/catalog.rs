//! Catalog configuration loading from config.toml
//!
//! The configuration names the reference data the shop always carries (event tags and
//! price brackets used by the recommendation quiz), an optional catalog JSON file to
//! import on startup, and the settings handed to the payment collaborator.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "FLOWER_SHOP_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Event tags to seed
    #[serde(default)]
    pub events: Vec<String>,
    /// Price brackets to seed
    #[serde(default)]
    pub price_brackets: Vec<PriceBracketConfig>,
    /// Catalog JSON document imported on startup, if any
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
    /// Payment handoff settings
    #[serde(default)]
    pub payment: PaymentConfig,
}

/// Configuration for a single price bracket
#[derive(Debug, Deserialize, Clone)]
pub struct PriceBracketConfig {
    /// Bracket name; derived from the bounds when omitted
    #[serde(default)]
    pub name: Option<String>,
    /// Inclusive lower bound
    #[serde(default)]
    pub min: Option<Decimal>,
    /// Inclusive upper bound
    #[serde(default)]
    pub max: Option<Decimal>,
}

/// Settings copied into every payment request
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PaymentConfig {
    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Where the gateway sends the customer after paying
    #[serde(default = "default_return_url")]
    pub return_url: String,
}

fn default_currency() -> String {
    "RUB".to_string()
}

fn default_return_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            return_url: default_return_url(),
        }
    }
}

/// Loads catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads configuration from `$FLOWER_SHOP_CONFIG`, or ./config.toml when unset.
pub fn load_default_config() -> Result<CatalogConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_catalog_config() {
        let toml_str = r#"
            events = ["birthday", "wedding"]
            seed_file = "data/catalog.json"

            [[price_brackets]]
            name = "Budget"
            max = 1000

            [[price_brackets]]
            min = 1000
            max = 5000

            [payment]
            currency = "EUR"
        "#;

        let config: CatalogConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.events, vec!["birthday", "wedding"]);
        assert_eq!(config.price_brackets.len(), 2);
        assert_eq!(config.price_brackets[0].name.as_deref(), Some("Budget"));
        assert_eq!(config.price_brackets[0].min, None);
        assert_eq!(config.price_brackets[0].max, Some(Decimal::new(1000, 0)));
        assert!(config.price_brackets[1].name.is_none());
        assert_eq!(config.seed_file, Some(PathBuf::from("data/catalog.json")));
        assert_eq!(config.payment.currency, "EUR");
        assert_eq!(config.payment.return_url, "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CatalogConfig = toml::from_str("").unwrap();
        assert!(config.events.is_empty());
        assert!(config.price_brackets.is_empty());
        assert!(config.seed_file.is_none());
        assert_eq!(config.payment, PaymentConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "events = [\"anniversary\"]").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.events, vec!["anniversary"]);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/flower-shop/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
