//! Unified error type for the catalog core.
//!
//! Variants fall into two families that callers care about: validation failures
//! (bad input rejected at the write boundary) and reference failures (a name or id
//! that does not resolve). Everything else is infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for catalog operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong, including the file path
        message: String,
    },

    /// Generic input validation failure (empty names, blank fields)
    #[error("Validation error: {message}")]
    Validation {
        /// Which input was rejected
        message: String,
    },

    /// Composition quantity must be at least one
    #[error("Invalid quantity {quantity}: must be at least 1")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// Money amount is negative or above the supported maximum
    #[error("Invalid amount {amount}: must be between 0 and 99999999.99")]
    InvalidAmount {
        /// The rejected amount, `Decimal::MAX` when the arithmetic overflowed
        amount: Decimal,
    },

    /// Stock count is negative
    #[error("Invalid stock {stock}: must not be negative")]
    InvalidStock {
        /// The rejected stock count
        stock: i32,
    },

    /// Price bracket bounds are inconsistent
    #[error("Invalid price bracket '{name}': min {min:?} must be below max {max:?}")]
    InvalidPriceBracket {
        /// Bracket name
        name: String,
        /// Requested lower bound
        min: Option<Decimal>,
        /// Requested upper bound
        max: Option<Decimal>,
    },

    /// Bouquet exists but cannot be ordered
    #[error("Bouquet '{name}' is not available")]
    BouquetUnavailable {
        /// Bouquet name
        name: String,
    },

    /// Quiz step taken in the wrong state
    #[error("Quiz step out of order: expected {expected}, current state is {actual}")]
    QuizOutOfOrder {
        /// State the step requires
        expected: &'static str,
        /// State the session is in
        actual: &'static str,
    },

    /// Component name does not resolve
    #[error("Component '{name}' not found")]
    ComponentNotFound {
        /// The name looked up
        name: String,
    },

    /// Bouquet id does not resolve
    #[error("Bouquet {id} not found")]
    BouquetNotFound {
        /// The id looked up
        id: String,
    },

    /// Event tag name does not resolve
    #[error("Event '{name}' not found")]
    EventNotFound {
        /// The name looked up
        name: String,
    },

    /// Order id does not resolve
    #[error("Order {id} not found")]
    OrderNotFound {
        /// The id looked up
        id: i64,
    },

    /// Bouquet cannot be deleted while orders reference it
    #[error("Bouquet '{name}' is referenced by {orders} order(s)")]
    BouquetInUse {
        /// Bouquet name
        name: String,
        /// Number of orders pointing at it
        orders: u64,
    },

    /// Storage failure reported by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog document is not valid JSON for its schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment variable missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// True for input rejected at the write boundary.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidQuantity { .. }
                | Self::InvalidAmount { .. }
                | Self::InvalidStock { .. }
                | Self::InvalidPriceBracket { .. }
                | Self::BouquetUnavailable { .. }
                | Self::QuizOutOfOrder { .. }
        )
    }

    /// True when a referenced entity does not exist (or is still referenced).
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::ComponentNotFound { .. }
                | Self::BouquetNotFound { .. }
                | Self::EventNotFound { .. }
                | Self::OrderNotFound { .. }
                | Self::BouquetInUse { .. }
        )
    }
}

/// Convenience `Result` type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families() {
        assert!(Error::InvalidQuantity { quantity: 0 }.is_validation());
        assert!(!Error::InvalidQuantity { quantity: 0 }.is_reference());
        assert!(
            Error::ComponentNotFound {
                name: "Tulip".to_string()
            }
            .is_reference()
        );
        assert!(
            !Error::Config {
                message: String::new()
            }
            .is_validation()
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidPriceBracket {
            name: "Broken".to_string(),
            min: Some(Decimal::new(500, 0)),
            max: Some(Decimal::new(100, 0)),
        };
        assert_eq!(
            err.to_string(),
            "Invalid price bracket 'Broken': min Some(500) must be below max Some(100)"
        );
        assert_eq!(
            Error::BouquetNotFound {
                id: "7".to_string()
            }
            .to_string(),
            "Bouquet 7 not found"
        );
    }

    #[test]
    fn test_invalid_amount_message_names_the_range() {
        let err = Error::InvalidAmount {
            amount: Decimal::new(-5, 0),
        };
        assert_eq!(
            err.to_string(),
            "Invalid amount -5: must be between 0 and 99999999.99"
        );
        assert!(err.is_validation());
    }
}
