use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::{RightUsageOutcome, RightUsageRequest, RightUsageServiceTrait};
use crate::constants::RIGHT_USAGE_PRICE_PER_RIGHT;
use crate::errors::{Error, Result};
use crate::event_log::{ActionType, EventLogRepositoryTrait, SecurityChangeEvent};
use crate::holdings::HoldingsServiceTrait;
use crate::securities::{
    is_right_symbol, normalize_symbol, require_security, stock_of, SecurityKind,
    SecurityRegistryTrait,
};
use crate::utils::PortfolioLocks;

/// Converts rights into the underlying stock at a fixed price per right.
pub struct RightUsageService {
    event_log: Arc<dyn EventLogRepositoryTrait>,
    holdings_service: Arc<dyn HoldingsServiceTrait>,
    securities: Arc<dyn SecurityRegistryTrait>,
    locks: Arc<PortfolioLocks>,
}

impl RightUsageService {
    pub fn new(
        event_log: Arc<dyn EventLogRepositoryTrait>,
        holdings_service: Arc<dyn HoldingsServiceTrait>,
        securities: Arc<dyn SecurityRegistryTrait>,
        locks: Arc<PortfolioLocks>,
    ) -> Self {
        Self {
            event_log,
            holdings_service,
            securities,
            locks,
        }
    }
}

#[async_trait]
impl RightUsageServiceTrait for RightUsageService {
    async fn use_rights(&self, request: RightUsageRequest) -> Result<RightUsageOutcome> {
        request.validate()?;
        let right_symbol = normalize_symbol(&request.right_symbol);
        if !is_right_symbol(&right_symbol) {
            return Err(Error::invalid_argument(format!(
                "{} is not a right symbol",
                right_symbol
            )));
        }
        let right = require_security(self.securities.as_ref(), &right_symbol, SecurityKind::Right)?;
        let stock = require_security(
            self.securities.as_ref(),
            &stock_of(&right.symbol),
            SecurityKind::Stock,
        )?;

        let quantity = request.quantity;
        let portfolio_id = request.portfolio_id;
        let _guard = self.locks.lock(&portfolio_id).await;

        let available = self.holdings_service.available(&portfolio_id, &right.symbol)?;
        if available < quantity {
            warn!(
                "Rejected usage of {} {} for portfolio {}: only {} held",
                quantity, right.symbol, portfolio_id, available
            );
            return Err(Error::InsufficientRights {
                symbol: right.symbol,
                requested: quantity,
                available,
            });
        }

        // Both legs share one timestamp and one correlation reference.
        let reference = request
            .request_ref
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let timestamp = SecurityChangeEvent::logical_time(Utc::now());
        let price = Decimal::from(RIGHT_USAGE_PRICE_PER_RIGHT);

        let burn = SecurityChangeEvent::new(
            portfolio_id.as_str(),
            &right.symbol,
            -quantity,
            ActionType::RightUsage,
        )?
        .at(timestamp)
        .with_action_ref(Some(reference.clone()));
        let mint = SecurityChangeEvent::new(
            portfolio_id.as_str(),
            &stock.symbol,
            quantity,
            ActionType::RightUsage,
        )?
        .at(timestamp)
        .with_action_ref(Some(reference.clone()))
        .with_unit_price(Some(price));

        let mut committed = self.event_log.append_all(vec![burn, mint]).await?;
        let (Some(minted), Some(burned)) = (committed.pop(), committed.pop()) else {
            return Err(Error::Unexpected(format!(
                "Usage {} committed an incomplete batch",
                reference
            )));
        };

        info!(
            "Used {} of {} for portfolio {} (ref {})",
            quantity, right.symbol, portfolio_id, reference
        );
        Ok(RightUsageOutcome {
            burned,
            minted,
            total_cost: price * Decimal::from(quantity),
        })
    }
}
