use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use rightsbook_core::errors::{Error, Result};
use rightsbook_core::event_log::{EventLogRepositoryTrait, SecurityChangeEvent};

use super::model::{to_stored_time, NewSecurityChangeDB, SecurityChangeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::security_changes;
use crate::schema::security_changes::dsl::*;

/// Event log stored in the `security_changes` table.
///
/// Reads use the pool; every append goes through the writer actor, so a batch
/// is one immediate transaction.
pub struct EventLogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EventLogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        EventLogRepository { pool, writer }
    }

    fn to_events(rows: Vec<SecurityChangeDB>) -> Result<Vec<SecurityChangeEvent>> {
        rows.into_iter()
            .map(|row| SecurityChangeEvent::try_from(row).map_err(Error::from))
            .collect()
    }

    fn insert_rows(conn: &mut SqliteConnection, rows: &[NewSecurityChangeDB]) -> Result<()> {
        for row in rows {
            diesel::insert_into(security_changes::table)
                .values(row)
                .execute(conn)
                .map_err(StorageError::from)?;
        }
        Ok(())
    }
}

#[async_trait]
impl EventLogRepositoryTrait for EventLogRepository {
    async fn append(&self, event: SecurityChangeEvent) -> Result<SecurityChangeEvent> {
        event.validate()?;
        let row = NewSecurityChangeDB::from(&event);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                Self::insert_rows(conn, std::slice::from_ref(&row))
            })
            .await?;
        Ok(event)
    }

    async fn append_all(&self, events: Vec<SecurityChangeEvent>) -> Result<Vec<SecurityChangeEvent>> {
        if events.is_empty() {
            return Err(Error::invalid_argument("Cannot append an empty batch"));
        }
        for event in &events {
            event.validate()?;
        }
        let rows: Vec<NewSecurityChangeDB> = events.iter().map(NewSecurityChangeDB::from).collect();
        let count = rows.len();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                Self::insert_rows(conn, &rows)
            })
            .await?;
        debug!("Appended batch of {} events", count);
        Ok(events)
    }

    fn find_by_portfolio(&self, portfolio: &str) -> Result<Vec<SecurityChangeEvent>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = security_changes
            .filter(portfolio_id.eq(portfolio))
            .order((occurred_at.asc(), seq.asc()))
            .select(SecurityChangeDB::as_select())
            .load::<SecurityChangeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_events(rows)
    }

    fn find_by_portfolio_up_to(
        &self,
        portfolio: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SecurityChangeEvent>> {
        let mut conn = get_connection(&self.pool)?;
        let cutoff = to_stored_time(&SecurityChangeEvent::logical_time(cutoff));
        let rows = security_changes
            .filter(portfolio_id.eq(portfolio))
            .filter(occurred_at.le(cutoff))
            .order((occurred_at.asc(), seq.asc()))
            .select(SecurityChangeDB::as_select())
            .load::<SecurityChangeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_events(rows)
    }

    fn list_portfolio_ids(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let ids = security_changes
            .select(portfolio_id)
            .distinct()
            .order(portfolio_id.asc())
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(ids)
    }
}
