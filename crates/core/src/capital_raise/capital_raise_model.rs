use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A parsed capital raise announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalRaiseAnnouncement {
    /// Stock whose holders are entitled.
    pub symbol: String,
    /// Rights granted per held share. Non-negative.
    pub per_share_ratio: Decimal,
    /// Correlation reference (message id) stamped on every grant.
    #[serde(default)]
    pub reference: Option<String>,
}

impl CapitalRaiseAnnouncement {
    pub fn new(symbol: &str, per_share_ratio: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            per_share_ratio,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: Option<String>) -> Self {
        self.reference = reference;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::invalid_argument("Announcement symbol must not be empty"));
        }
        if self.per_share_ratio.is_sign_negative() && !self.per_share_ratio.is_zero() {
            return Err(Error::invalid_argument(format!(
                "Per-share ratio must be non-negative, got {}",
                self.per_share_ratio
            )));
        }
        Ok(())
    }
}

/// `floor(held * ratio)` in exact decimal arithmetic.
pub fn compute_entitlement(held: i64, per_share_ratio: Decimal) -> Result<i64> {
    Decimal::from(held)
        .checked_mul(per_share_ratio)
        .and_then(|product| product.floor().to_i64())
        .ok_or_else(|| {
            Error::invalid_argument(format!(
                "Entitlement overflow for {} shares at ratio {}",
                held, per_share_ratio
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_entitlement_floors() {
        assert_eq!(compute_entitlement(100, dec!(0.5)).unwrap(), 50);
        assert_eq!(compute_entitlement(200, dec!(0.5)).unwrap(), 100);
        assert_eq!(compute_entitlement(10, dec!(0.25)).unwrap(), 2);
        assert_eq!(compute_entitlement(3, dec!(0.3)).unwrap(), 0);
    }

    #[test]
    fn test_entitlement_is_exact_where_floats_are_not() {
        // 10 * 0.3 evaluates to 2.9999999999999996 in binary floating point.
        assert_eq!(compute_entitlement(10, dec!(0.3)).unwrap(), 3);
        assert_eq!(compute_entitlement(100, dec!(0.07)).unwrap(), 7);
    }

    #[test]
    fn test_negative_ratio_is_invalid() {
        let announcement = CapitalRaiseAnnouncement::new("FOOLAD", dec!(-0.1));
        assert!(matches!(
            announcement.validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(CapitalRaiseAnnouncement::new("FOOLAD", dec!(0))
            .validate()
            .is_ok());
    }
}
