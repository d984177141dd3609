//! Database models for the event log.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;
use rightsbook_core::event_log::{ActionType, SecurityChangeEvent};

/// Fixed-width RFC3339 with microseconds, so text order is time order.
pub(crate) fn to_stored_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn from_stored_time(value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptRow(format!("bad timestamp {}: {}", value, e)))
}

/// Database row of `security_changes`.
#[derive(Queryable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::security_changes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SecurityChangeDB {
    pub seq: i64,
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub delta: i64,
    pub occurred_at: String,
    pub action_type: String,
    pub action_ref: Option<String>,
    pub unit_price: Option<String>,
    pub created_at: String,
}

/// Insert form of `security_changes`; `seq` is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::security_changes)]
pub struct NewSecurityChangeDB {
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub delta: i64,
    pub occurred_at: String,
    pub action_type: String,
    pub action_ref: Option<String>,
    pub unit_price: Option<String>,
    pub created_at: String,
}

impl From<&SecurityChangeEvent> for NewSecurityChangeDB {
    fn from(event: &SecurityChangeEvent) -> Self {
        Self {
            id: event.id.clone(),
            portfolio_id: event.portfolio_id.clone(),
            symbol: event.symbol.clone(),
            delta: event.delta,
            occurred_at: to_stored_time(&event.timestamp),
            action_type: event.action_type.as_str().to_string(),
            action_ref: event.action_ref.clone(),
            unit_price: event.unit_price.map(|p| p.normalize().to_string()),
            created_at: to_stored_time(&Utc::now()),
        }
    }
}

impl TryFrom<SecurityChangeDB> for SecurityChangeEvent {
    type Error = StorageError;

    fn try_from(db: SecurityChangeDB) -> Result<Self, Self::Error> {
        let action_type = ActionType::from_str(&db.action_type)
            .map_err(|e| StorageError::CorruptRow(e.to_string()))?;
        let unit_price = db
            .unit_price
            .as_deref()
            .map(Decimal::from_str)
            .transpose()
            .map_err(|e| StorageError::CorruptRow(format!("bad unit price: {}", e)))?;

        Ok(SecurityChangeEvent {
            id: db.id,
            portfolio_id: db.portfolio_id,
            symbol: db.symbol,
            delta: db.delta,
            timestamp: from_stored_time(&db.occurred_at)?,
            action_type,
            action_ref: db.action_ref,
            unit_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stored_time_is_fixed_width_and_sortable() {
        let early = Utc.with_ymd_and_hms(2025, 6, 15, 9, 5, 0).unwrap();
        let late = early + chrono::Duration::microseconds(1);

        let (a, b) = (to_stored_time(&early), to_stored_time(&late));
        assert_eq!(a, "2025-06-15T09:05:00.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(from_stored_time(&b).unwrap(), late);
    }
}
