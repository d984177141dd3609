use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use super::{compute_entitlement, CapitalRaiseAnnouncement, CapitalRaiseServiceTrait};
use crate::errors::Result;
use crate::event_log::{ActionType, EventLogRepositoryTrait, SecurityChangeEvent};
use crate::holdings::HoldingsServiceTrait;
use crate::securities::{require_security, right_of, SecurityKind, SecurityRegistryTrait};
use crate::utils::PortfolioLocks;

pub struct CapitalRaiseService {
    event_log: Arc<dyn EventLogRepositoryTrait>,
    holdings_service: Arc<dyn HoldingsServiceTrait>,
    securities: Arc<dyn SecurityRegistryTrait>,
    locks: Arc<PortfolioLocks>,
}

impl CapitalRaiseService {
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
impl CapitalRaiseServiceTrait for CapitalRaiseService {
    async fn process_announcement(
        &self,
        announcement: CapitalRaiseAnnouncement,
    ) -> Result<Vec<SecurityChangeEvent>> {
        announcement.validate()?;
        let stock = require_security(
            self.securities.as_ref(),
            &announcement.symbol,
            SecurityKind::Stock,
        )?;
        let right = require_security(
            self.securities.as_ref(),
            &right_of(&stock.symbol),
            SecurityKind::Right,
        )?;

        let portfolio_ids = self.event_log.list_portfolio_ids()?;
        // Holders must not trade while their entitlement is being computed.
        let _guards = self.locks.lock_many(&portfolio_ids).await;

        let granted_at = Utc::now();
        let mut grants = Vec::new();
        for portfolio_id in &portfolio_ids {
            let held = self
                .holdings_service
                .current_holdings(portfolio_id)?
                .volume_of(&stock.symbol);
            if held <= 0 {
                continue;
            }
            let entitlement = compute_entitlement(held, announcement.per_share_ratio)?;
            if entitlement == 0 {
                debug!(
                    "Portfolio {} holds {} {} but is entitled to no rights",
                    portfolio_id, held, stock.symbol
                );
                continue;
            }
            grants.push(
                SecurityChangeEvent::new(
                    portfolio_id.as_str(),
                    &right.symbol,
                    entitlement,
                    ActionType::CapitalRaise,
                )?
                .at(granted_at)
                .with_action_ref(announcement.reference.clone()),
            );
        }

        if grants.is_empty() {
            info!(
                "Capital raise on {} at {} granted no rights",
                stock.symbol, announcement.per_share_ratio
            );
            return Ok(grants);
        }

        let appended = self.event_log.append_all(grants).await?;
        info!(
            "Capital raise on {} at {} granted {} to {} portfolios",
            stock.symbol,
            announcement.per_share_ratio,
            right.symbol,
            appended.len()
        );
        Ok(appended)
    }
}
