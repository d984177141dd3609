use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::SecurityChangeEvent;
use crate::errors::Result;

/// Contract for the append-only event log.
///
/// Any adapter satisfying these signatures is valid, provided that:
/// - an appended event is visible to every later read of its portfolio;
/// - `append_all` is all-or-nothing;
/// - reads return events by timestamp ascending, ties in insertion order,
///   and never reorder previously committed events.
#[async_trait]
pub trait EventLogRepositoryTrait: Send + Sync {
    /// Persists one event.
    async fn append(&self, event: SecurityChangeEvent) -> Result<SecurityChangeEvent>;

    /// Persists a non-empty ordered batch atomically. If any event is invalid
    /// nothing is written.
    async fn append_all(
        &self,
        events: Vec<SecurityChangeEvent>,
    ) -> Result<Vec<SecurityChangeEvent>>;

    fn find_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<SecurityChangeEvent>>;

    /// Same as `find_by_portfolio`, restricted to `timestamp <= cutoff`.
    fn find_by_portfolio_up_to(
        &self,
        portfolio_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SecurityChangeEvent>>;

    /// Every portfolio with at least one event, sorted.
    fn list_portfolio_ids(&self) -> Result<Vec<String>>;
}
