use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::securities::normalize_symbol;

/// Net signed volume per symbol for one portfolio.
///
/// Derived, never persisted. Symbols whose net is exactly zero are absent, so
/// a security never held looks the same as one fully liquidated. Negative
/// nets are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingSnapshot {
    pub portfolio_id: String,
    /// Cutoff the snapshot was bounded by; `None` means the whole log.
    pub as_of: Option<DateTime<Utc>>,
    positions: BTreeMap<String, i64>,
}

impl HoldingSnapshot {
    pub(crate) fn from_totals(
        portfolio_id: &str,
        as_of: Option<DateTime<Utc>>,
        totals: BTreeMap<String, i128>,
    ) -> Self {
        // Only the final net is clamped into i64.
        let positions = totals
            .into_iter()
            .filter(|(_, net)| *net != 0)
            .map(|(symbol, net)| (symbol, net.clamp(i64::MIN as i128, i64::MAX as i128) as i64))
            .collect();
        Self {
            portfolio_id: portfolio_id.to_string(),
            as_of,
            positions,
        }
    }

    /// Net volume of `symbol`, zero when absent.
    pub fn volume_of(&self, symbol: &str) -> i64 {
        self.positions
            .get(&normalize_symbol(symbol))
            .copied()
            .unwrap_or(0)
    }

    pub fn positions(&self) -> &BTreeMap<String, i64> {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}
