//! Parser for the one-line announcement format `CAPITAL_RAISE <SYMBOL> <PER_SHARE>`.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::CapitalRaiseAnnouncement;
use crate::errors::{Error, Result};

pub const CAPITAL_RAISE_VERB: &str = "CAPITAL_RAISE";

/// Parses e.g. `CAPITAL_RAISE FOOLAD 0.25`.
///
/// Tokens are whitespace separated and there must be exactly three. The ratio
/// is parsed as an exact decimal; scientific notation is accepted.
pub fn parse_announcement(message: &str) -> Result<CapitalRaiseAnnouncement> {
    let parts: Vec<&str> = message.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::invalid_argument(format!(
            "Expected 3 parts, got {}",
            parts.len()
        )));
    }
    if parts[0] != CAPITAL_RAISE_VERB {
        return Err(Error::invalid_argument(format!("Unknown verb: {}", parts[0])));
    }
    let per_share_ratio = Decimal::from_str(parts[2])
        .or_else(|_| Decimal::from_scientific(parts[2]))
        .map_err(|_| Error::invalid_argument("Per-share must be a number"))?;

    let announcement = CapitalRaiseAnnouncement::new(parts[1], per_share_ratio);
    announcement.validate()?;
    Ok(announcement)
}
