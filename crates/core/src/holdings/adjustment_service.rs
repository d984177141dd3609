use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::errors::{Error, Result};
use crate::event_log::{ActionType, EventLogRepositoryTrait, SecurityChangeEvent};
use crate::securities::{normalize_symbol, SecurityRegistryTrait};
use crate::utils::PortfolioLocks;

/// Records manual corrections, the entry point for stock positions.
#[async_trait]
pub trait AdjustmentServiceTrait: Send + Sync {
    async fn record_adjustment(
        &self,
        portfolio_id: &str,
        symbol: &str,
        delta: i64,
        reference: Option<String>,
    ) -> Result<SecurityChangeEvent>;
}

pub struct AdjustmentService {
    event_log: Arc<dyn EventLogRepositoryTrait>,
    securities: Arc<dyn SecurityRegistryTrait>,
    locks: Arc<PortfolioLocks>,
}

impl AdjustmentService {
    pub fn new(
        event_log: Arc<dyn EventLogRepositoryTrait>,
        securities: Arc<dyn SecurityRegistryTrait>,
        locks: Arc<PortfolioLocks>,
    ) -> Self {
        Self {
            event_log,
            securities,
            locks,
        }
    }
}

#[async_trait]
impl AdjustmentServiceTrait for AdjustmentService {
    async fn record_adjustment(
        &self,
        portfolio_id: &str,
        symbol: &str,
        delta: i64,
        reference: Option<String>,
    ) -> Result<SecurityChangeEvent> {
        let symbol = normalize_symbol(symbol);
        let event = SecurityChangeEvent::new(portfolio_id, &symbol, delta, ActionType::Adjustment)?
            .with_action_ref(reference);
        if self.securities.find_by_symbol(&symbol)?.is_none() {
            return Err(Error::UnknownSecurity(symbol));
        }

        let _guard = self.locks.lock(portfolio_id).await;
        let event = self.event_log.append(event).await?;
        info!(
            "Adjusted {} by {:+} in portfolio {}",
            event.symbol, event.delta, event.portfolio_id
        );
        Ok(event)
    }
}
