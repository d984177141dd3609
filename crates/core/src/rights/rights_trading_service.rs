use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use super::{RightOrder, RightTradingServiceTrait};
use crate::errors::{Error, Result};
use crate::event_log::{ActionType, EventLogRepositoryTrait, SecurityChangeEvent};
use crate::holdings::HoldingsServiceTrait;
use crate::securities::{require_security, Security, SecurityKind, SecurityRegistryTrait};
use crate::utils::PortfolioLocks;

pub struct RightTradingService {
    event_log: Arc<dyn EventLogRepositoryTrait>,
    holdings_service: Arc<dyn HoldingsServiceTrait>,
    securities: Arc<dyn SecurityRegistryTrait>,
    locks: Arc<PortfolioLocks>,
}

impl RightTradingService {
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

    /// Validates the order and resolves the right it names. Runs before any
    /// holdings read.
    fn resolve_right(&self, order: &RightOrder) -> Result<Security> {
        order.validate()?;
        require_security(
            self.securities.as_ref(),
            &order.right_symbol,
            SecurityKind::Right,
        )
    }

    fn build_event(
        order: RightOrder,
        right: &Security,
        delta: i64,
        action_type: ActionType,
    ) -> Result<SecurityChangeEvent> {
        Ok(
            SecurityChangeEvent::new(order.portfolio_id, &right.symbol, delta, action_type)?
                .with_action_ref(order.order_ref)
                .with_unit_price(Some(order.price)),
        )
    }
}

#[async_trait]
impl RightTradingServiceTrait for RightTradingService {
    async fn buy_rights(&self, order: RightOrder) -> Result<SecurityChangeEvent> {
        let right = self.resolve_right(&order)?;
        let quantity = order.quantity;
        let event = Self::build_event(order, &right, quantity, ActionType::BuyRight)?;

        let _guard = self.locks.lock(&event.portfolio_id).await;
        let event = self.event_log.append(event).await?;
        info!(
            "Bought {} of {} for portfolio {}",
            quantity, event.symbol, event.portfolio_id
        );
        Ok(event)
    }

    async fn sell_rights(&self, order: RightOrder) -> Result<SecurityChangeEvent> {
        let right = self.resolve_right(&order)?;
        let quantity = order.quantity;
        let portfolio_id = order.portfolio_id.clone();

        // The guard spans the balance check and the append.
        let _guard = self.locks.lock(&portfolio_id).await;
        let available = self.holdings_service.available(&portfolio_id, &right.symbol)?;
        if available < quantity {
            warn!(
                "Rejected sell of {} {} for portfolio {}: only {} held",
                quantity, right.symbol, portfolio_id, available
            );
            return Err(Error::InsufficientRights {
                symbol: right.symbol,
                requested: quantity,
                available,
            });
        }

        let event = Self::build_event(order, &right, -quantity, ActionType::SellRight)?;
        let event = self.event_log.append(event).await?;
        info!(
            "Sold {} of {} for portfolio {}",
            quantity, event.symbol, event.portfolio_id
        );
        Ok(event)
    }
}
