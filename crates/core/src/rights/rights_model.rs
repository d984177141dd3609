use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::event_log::SecurityChangeEvent;

fn ensure_positive(quantity: i64) -> Result<()> {
    if quantity <= 0 {
        return Err(Error::invalid_argument(format!(
            "Quantity must be positive, got {}",
            quantity
        )));
    }
    Ok(())
}

/// A buy or sell of rights.
///
/// Cash settlement is verified by an external collaborator before the order
/// reaches the trading service; `price` is recorded for audit only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightOrder {
    pub portfolio_id: String,
    pub right_symbol: String,
    pub quantity: i64,
    pub price: Decimal,
    #[serde(default)]
    pub order_ref: Option<String>,
}

impl RightOrder {
    pub fn new(portfolio_id: &str, right_symbol: &str, quantity: i64, price: Decimal) -> Self {
        Self {
            portfolio_id: portfolio_id.to_string(),
            right_symbol: right_symbol.to_string(),
            quantity,
            price,
            order_ref: None,
        }
    }

    pub fn with_order_ref(mut self, order_ref: impl Into<String>) -> Self {
        self.order_ref = Some(order_ref.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive(self.quantity)?;
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(Error::invalid_argument(format!(
                "Price must not be negative, got {}",
                self.price
            )));
        }
        if self.portfolio_id.trim().is_empty() {
            return Err(Error::invalid_argument("Portfolio id must not be empty"));
        }
        Ok(())
    }
}

/// A request to convert rights 1:1 into the underlying stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightUsageRequest {
    pub portfolio_id: String,
    pub right_symbol: String,
    pub quantity: i64,
    #[serde(default)]
    pub request_ref: Option<String>,
}

impl RightUsageRequest {
    pub fn new(portfolio_id: &str, right_symbol: &str, quantity: i64) -> Self {
        Self {
            portfolio_id: portfolio_id.to_string(),
            right_symbol: right_symbol.to_string(),
            quantity,
            request_ref: None,
        }
    }

    pub fn with_request_ref(mut self, request_ref: impl Into<String>) -> Self {
        self.request_ref = Some(request_ref.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive(self.quantity)?;
        if self.portfolio_id.trim().is_empty() {
            return Err(Error::invalid_argument("Portfolio id must not be empty"));
        }
        Ok(())
    }
}

/// The two events committed by a successful usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightUsageOutcome {
    /// Negative delta on the right.
    pub burned: SecurityChangeEvent,
    /// Positive delta on the stock.
    pub minted: SecurityChangeEvent,
    /// Cash owed to the wallet collaborator: quantity times the fixed price.
    pub total_cost: Decimal,
}
