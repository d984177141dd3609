use std::collections::{BTreeSet, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;

use super::{EventLogRepositoryTrait, SecurityChangeEvent};
use crate::errors::{DatabaseError, Error, Result};

/// Event log kept in process memory.
///
/// Events are stored in insertion order; reads stable-sort by timestamp so
/// ties keep that order.
#[derive(Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<SecurityChangeEvent>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored events across all portfolios.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<SecurityChangeEvent>>> {
        self.events
            .read()
            .map_err(|_| Error::Database(DatabaseError::Internal("event log lock poisoned".into())))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<SecurityChangeEvent>>> {
        self.events
            .write()
            .map_err(|_| Error::Database(DatabaseError::Internal("event log lock poisoned".into())))
    }

    fn collect_sorted<F>(&self, portfolio_id: &str, keep: F) -> Result<Vec<SecurityChangeEvent>>
    where
        F: Fn(&SecurityChangeEvent) -> bool,
    {
        let events = self.read()?;
        let mut matching: Vec<SecurityChangeEvent> = events
            .iter()
            .filter(|e| e.portfolio_id == portfolio_id && keep(e))
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.timestamp);
        Ok(matching)
    }
}

/// Rejects the batch if any event is invalid or reuses an id.
fn check_batch(
    existing: &[SecurityChangeEvent],
    batch: &[SecurityChangeEvent],
) -> Result<()> {
    let mut seen: HashSet<&str> = existing.iter().map(|e| e.id.as_str()).collect();
    for event in batch {
        event.validate()?;
        if !seen.insert(event.id.as_str()) {
            return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                "event id {} already exists",
                event.id
            ))));
        }
    }
    Ok(())
}

#[async_trait]
impl EventLogRepositoryTrait for InMemoryEventLog {
    async fn append(&self, event: SecurityChangeEvent) -> Result<SecurityChangeEvent> {
        let mut events = self.write()?;
        check_batch(&events, std::slice::from_ref(&event))?;
        debug!(
            "Appending {} {:+} {} for portfolio {}",
            event.action_type, event.delta, event.symbol, event.portfolio_id
        );
        events.push(event.clone());
        Ok(event)
    }

    async fn append_all(
        &self,
        batch: Vec<SecurityChangeEvent>,
    ) -> Result<Vec<SecurityChangeEvent>> {
        if batch.is_empty() {
            return Err(Error::invalid_argument("Cannot append an empty batch"));
        }
        let mut events = self.write()?;
        check_batch(&events, &batch)?;
        debug!("Appending batch of {} events", batch.len());
        events.extend(batch.iter().cloned());
        Ok(batch)
    }

    fn find_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<SecurityChangeEvent>> {
        self.collect_sorted(portfolio_id, |_| true)
    }

    fn find_by_portfolio_up_to(
        &self,
        portfolio_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SecurityChangeEvent>> {
        self.collect_sorted(portfolio_id, |e| e.timestamp <= cutoff)
    }

    fn list_portfolio_ids(&self) -> Result<Vec<String>> {
        let events = self.read()?;
        let ids: BTreeSet<&str> = events.iter().map(|e| e.portfolio_id.as_str()).collect();
        Ok(ids.into_iter().map(str::to_string).collect())
    }
}
