//! Human readable audit lines for events.

use rust_decimal::Decimal;

use super::{ActionType, SecurityChangeEvent};
use crate::constants::DESCRIPTION_DATETIME_FORMAT;

fn price_suffix(quantity: u64, unit_price: Option<Decimal>) -> String {
    let Some(price) = unit_price else {
        return String::new();
    };
    match price.checked_mul(Decimal::from(quantity)) {
        Some(total) => format!(
            " @ {}/unit (Total: {})",
            price.normalize(),
            total.normalize()
        ),
        // Total is not representable as a Decimal.
        None => format!(" @ {}/unit", price.normalize()),
    }
}

/// Renders one event, e.g. `[2025-06-15 10:00] Bought 30 of FOOLAD_X @ 120/unit (Total: 3600)`.
pub fn describe_event(event: &SecurityChangeEvent) -> String {
    let when = event.timestamp.format(DESCRIPTION_DATETIME_FORMAT);
    let quantity = event.delta.unsigned_abs();
    let body = match event.action_type {
        ActionType::CapitalRaise => {
            format!("Granted {} of {} (capital raise)", quantity, event.symbol)
        }
        ActionType::BuyRight => format!(
            "Bought {} of {}{}",
            quantity,
            event.symbol,
            price_suffix(quantity, event.unit_price)
        ),
        ActionType::SellRight => format!(
            "Sold {} of {}{}",
            quantity,
            event.symbol,
            price_suffix(quantity, event.unit_price)
        ),
        ActionType::RightUsage if event.delta < 0 => {
            format!("Used {} of {}", quantity, event.symbol)
        }
        ActionType::RightUsage => format!(
            "Received {} of {} from right usage{}",
            quantity,
            event.symbol,
            price_suffix(quantity, event.unit_price)
        ),
        ActionType::Adjustment => format!("Adjusted {} by {:+}", event.symbol, event.delta),
    };
    format!("[{}] {}", when, body)
}
