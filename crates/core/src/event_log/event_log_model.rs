use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::TIMESTAMP_SUBSEC_DIGITS;
use crate::errors::{Error, Result};
use crate::securities::normalize_symbol;

/// Provenance of a quantity change. Audit only, never read by aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    CapitalRaise,
    BuyRight,
    SellRight,
    RightUsage,
    Adjustment,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::CapitalRaise => "CAPITAL_RAISE",
            ActionType::BuyRight => "BUY_RIGHT",
            ActionType::SellRight => "SELL_RIGHT",
            ActionType::RightUsage => "RIGHT_USAGE",
            ActionType::Adjustment => "ADJUSTMENT",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CAPITAL_RAISE" => Ok(ActionType::CapitalRaise),
            "BUY_RIGHT" => Ok(ActionType::BuyRight),
            "SELL_RIGHT" => Ok(ActionType::SellRight),
            "RIGHT_USAGE" => Ok(ActionType::RightUsage),
            "ADJUSTMENT" => Ok(ActionType::Adjustment),
            _ => Err(format!("Unknown action type: {}", s)),
        }
    }
}

/// The only persisted fact: a signed change in the volume of one security
/// held by one portfolio.
///
/// Events are immutable once appended. `delta` is never zero; construction
/// rejects it and every event log adapter re-checks it before writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityChangeEvent {
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub delta: i64,
    pub timestamp: DateTime<Utc>,
    pub action_type: ActionType,
    /// External correlation id (order id, message id). Opaque to the core.
    pub action_ref: Option<String>,
    /// Price attached for audit. Does not take part in aggregation.
    pub unit_price: Option<Decimal>,
}

impl SecurityChangeEvent {
    /// Creates an event stamped with the current time and a fresh id.
    pub fn new(
        portfolio_id: impl Into<String>,
        symbol: &str,
        delta: i64,
        action_type: ActionType,
    ) -> Result<Self> {
        let event = Self {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.into(),
            symbol: normalize_symbol(symbol),
            delta,
            timestamp: Self::logical_time(Utc::now()),
            action_type,
            action_ref: None,
            unit_price: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Overrides the event time.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Self::logical_time(timestamp);
        self
    }

    pub fn with_action_ref(mut self, action_ref: Option<String>) -> Self {
        self.action_ref = action_ref;
        self
    }

    pub fn with_unit_price(mut self, unit_price: Option<Decimal>) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// Checks the invariants every persisted event must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.delta == 0 {
            return Err(Error::invalid_argument(format!(
                "Event {} for {} has a zero delta",
                self.id, self.symbol
            )));
        }
        if self.id.trim().is_empty() {
            return Err(Error::invalid_argument("Event id must not be empty"));
        }
        if self.portfolio_id.trim().is_empty() {
            return Err(Error::invalid_argument("Portfolio id must not be empty"));
        }
        if self.symbol.is_empty() {
            return Err(Error::invalid_argument("Symbol must not be empty"));
        }
        Ok(())
    }

    /// Truncates to the precision every adapter stores.
    pub fn logical_time(timestamp: DateTime<Utc>) -> DateTime<Utc> {
        timestamp.trunc_subsecs(TIMESTAMP_SUBSEC_DIGITS)
    }
}
