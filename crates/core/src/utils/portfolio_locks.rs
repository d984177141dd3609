//! Per-portfolio mutual exclusion for check-then-act sequences.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per portfolio id.
///
/// Mutating services hold a portfolio's guard from the holdings read until
/// the append returns, so two mutations of the same portfolio never
/// interleave. Every service must share the same instance.
#[derive(Default)]
pub struct PortfolioLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl PortfolioLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, portfolio_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(portfolio_id.to_string())
            .or_default()
            .value()
            .clone()
    }

    pub async fn lock(&self, portfolio_id: &str) -> OwnedMutexGuard<()> {
        self.handle(portfolio_id).lock_owned().await
    }

    /// Locks several portfolios, always in sorted id order. Duplicates are
    /// locked once.
    pub async fn lock_many(&self, portfolio_ids: &[String]) -> Vec<OwnedMutexGuard<()>> {
        let mut ordered: Vec<&String> = portfolio_ids.iter().collect();
        ordered.sort();
        ordered.dedup();

        let mut guards = Vec::with_capacity(ordered.len());
        for portfolio_id in ordered {
            guards.push(self.lock(portfolio_id).await);
        }
        guards
    }
}
