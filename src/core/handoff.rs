//! Payloads handed to the payment gateway and the staff messaging bot.
//!
//! Building these is all the catalog does: sending them, and whatever happens after,
//! belongs to the collaborators.

use crate::{
    config::catalog::PaymentConfig,
    core::pricing::round_currency,
    entities::{consultation, order},
};
use rust_decimal::Decimal;
use serde::Serialize;

/// A payment to create with the gateway for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    /// Order being paid for
    pub order_id: i64,
    /// Amount, two decimal places
    pub amount: Decimal,
    /// ISO 4217 currency code
    pub currency: String,
    /// Capture the payment as soon as it is authorised
    pub capture: bool,
    /// Where the gateway redirects the customer afterwards
    pub return_url: String,
    /// Text shown on the gateway page
    pub description: String,
}

impl PaymentRequest {
    /// Builds the request for an order using the configured currency and return URL.
    #[must_use]
    pub fn for_order(order: &order::Model, config: &PaymentConfig) -> Self {
        let amount = round_currency(order.total_cost);
        Self {
            order_id: order.id,
            amount,
            currency: config.currency.clone(),
            capture: true,
            return_url: config.return_url.clone(),
            description: format!(
                "Payment for order #{} of {amount:.2} {}",
                order.id, config.currency
            ),
        }
    }
}

/// Plain-text message for the staff chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Message body
    pub text: String,
}

impl Notification {
    /// Announces a newly placed order.
    #[must_use]
    pub fn new_order(order: &order::Model, bouquet_name: &str) -> Self {
        Self {
            text: format!(
                "New order!\nCustomer: {} - {}\nDelivery time: {}\nAddress: {}\nBouquet: {}\nTotal: {:.2}",
                order.customer_name,
                order.customer_phone,
                order.delivery_time,
                order.delivery_address,
                bouquet_name,
                order.total_cost
            ),
        }
    }

    /// Announces a consultation request.
    #[must_use]
    pub fn consultation(request: &consultation::Model) -> Self {
        Self {
            text: format!(
                "Consultation requested!\nCustomer: {}\nPhone: {}",
                request.name, request.phone
            ),
        }
    }
}
