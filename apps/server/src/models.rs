use chrono::{DateTime, Utc};
use rightsbook_core::event_log::{describe_event, SecurityChangeEvent};
use rightsbook_core::securities::{Security, SecurityKind};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSecurity {
    pub symbol: String,
    pub kind: SecurityKind,
    pub name: Option<String>,
    pub isin: Option<String>,
}

impl From<NewSecurity> for Security {
    fn from(s: NewSecurity) -> Self {
        let mut security = Security::new(&s.symbol, s.kind);
        if let Some(name) = s.name {
            security = security.with_name(name);
        }
        if let Some(isin) = s.isin {
            security = security.with_isin(isin);
        }
        security
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAdjustment {
    pub symbol: String,
    pub delta: i64,
    pub reference: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsQuery {
    pub as_of: Option<DateTime<Utc>>,
}

/// An event together with its audit line.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: SecurityChangeEvent,
    pub description: String,
}

impl From<SecurityChangeEvent> for EventView {
    fn from(event: SecurityChangeEvent) -> Self {
        let description = describe_event(&event);
        Self { event, description }
    }
}
