use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use super::{rebuild, rebuild_up_to, HoldingSnapshot};
use crate::errors::Result;
use crate::event_log::EventLogRepositoryTrait;

/// Read-only holdings queries. Every call recomputes from the event log.
pub trait HoldingsServiceTrait: Send + Sync {
    fn current_holdings(&self, portfolio_id: &str) -> Result<HoldingSnapshot>;

    fn holdings_as_of(&self, portfolio_id: &str, cutoff: DateTime<Utc>)
        -> Result<HoldingSnapshot>;

    /// Current net volume of one symbol.
    fn available(&self, portfolio_id: &str, symbol: &str) -> Result<i64> {
        Ok(self.current_holdings(portfolio_id)?.volume_of(symbol))
    }
}

pub struct HoldingsService {
    event_log: Arc<dyn EventLogRepositoryTrait>,
}

impl HoldingsService {
    pub fn new(event_log: Arc<dyn EventLogRepositoryTrait>) -> Self {
        Self { event_log }
    }
}

impl HoldingsServiceTrait for HoldingsService {
    fn current_holdings(&self, portfolio_id: &str) -> Result<HoldingSnapshot> {
        let events = self.event_log.find_by_portfolio(portfolio_id)?;
        debug!(
            "Rebuilding holdings for portfolio {} from {} events",
            portfolio_id,
            events.len()
        );
        Ok(rebuild(portfolio_id, &events))
    }

    fn holdings_as_of(
        &self,
        portfolio_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<HoldingSnapshot> {
        let events = self
            .event_log
            .find_by_portfolio_up_to(portfolio_id, cutoff)?;
        Ok(rebuild_up_to(portfolio_id, &events, cutoff))
    }
}
