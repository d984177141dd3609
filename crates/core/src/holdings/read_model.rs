//! Pure reconstruction of holdings from an event sequence.
//!
//! The fold is a per-symbol sum, so the input order of events does not change
//! the result. Only the cutoff filter looks at timestamps. Sums are carried in
//! `i128` so no partial sum can overflow.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::HoldingSnapshot;
use crate::event_log::SecurityChangeEvent;

fn fold<'a, I>(portfolio_id: &str, events: I, as_of: Option<DateTime<Utc>>) -> HoldingSnapshot
where
    I: IntoIterator<Item = &'a SecurityChangeEvent>,
{
    let mut totals: BTreeMap<String, i128> = BTreeMap::new();
    for event in events
        .into_iter()
        .filter(|e| e.portfolio_id == portfolio_id)
    {
        let net = totals.entry(event.symbol.clone()).or_insert(0);
        *net += i128::from(event.delta);
    }
    HoldingSnapshot::from_totals(portfolio_id, as_of, totals)
}

/// Sums every event of `portfolio_id` by symbol. Events of other portfolios
/// are ignored.
pub fn rebuild(portfolio_id: &str, events: &[SecurityChangeEvent]) -> HoldingSnapshot {
    fold(portfolio_id, events, None)
}

/// Like [`rebuild`], but events after `cutoff` are excluded first.
pub fn rebuild_up_to(
    portfolio_id: &str,
    events: &[SecurityChangeEvent],
    cutoff: DateTime<Utc>,
) -> HoldingSnapshot {
    fold(
        portfolio_id,
        events.iter().filter(|e| e.timestamp <= cutoff),
        Some(cutoff),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_log::ActionType;
    use chrono::{Duration, TimeZone};

    fn event(portfolio: &str, symbol: &str, delta: i64, minute: i64) -> SecurityChangeEvent {
        let base = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        SecurityChangeEvent::new(portfolio, symbol, delta, ActionType::Adjustment)
            .unwrap()
            .at(base + Duration::minutes(minute))
    }

    #[test]
    fn test_sums_by_symbol() {
        let events = vec![
            event("p1", "FOOLAD", 100, 0),
            event("p1", "FOOLAD_X", 60, 1),
            event("p1", "FOOLAD_X", -40, 2),
            event("p1", "FOOLAD", 40, 2),
        ];
        let snapshot = rebuild("p1", &events);
        assert_eq!(snapshot.volume_of("FOOLAD"), 140);
        assert_eq!(snapshot.volume_of("FOOLAD_X"), 20);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.as_of.is_none());
    }

    #[test]
    fn test_zero_nets_are_omitted() {
        let events = vec![event("p1", "FOOLAD", 10, 0), event("p1", "FOOLAD", -10, 1)];
        let snapshot = rebuild("p1", &events);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.volume_of("FOOLAD"), 0);
    }

    #[test]
    fn test_negative_nets_are_surfaced() {
        let events = vec![event("p1", "FOOLAD", 3, 0), event("p1", "FOOLAD", -5, 1)];
        assert_eq!(rebuild("p1", &events).volume_of("FOOLAD"), -2);
    }

    #[test]
    fn test_other_portfolios_are_ignored() {
        let events = vec![event("p1", "FOOLAD", 10, 0), event("p2", "FOOLAD", 99, 0)];
        let snapshot = rebuild("p1", &events);
        assert_eq!(snapshot.volume_of("FOOLAD"), 10);
        assert_eq!(snapshot.portfolio_id, "p1");
    }

    #[test]
    fn test_rebuild_up_to_excludes_later_events() {
        let events = vec![
            event("p1", "FOOLAD", 10, 0),
            event("p1", "FOOLAD", -4, 5),
            event("p1", "FOOLAD", 7, 10),
        ];
        let cutoff = Utc.with_ymd_and_hms(2025, 6, 15, 10, 5, 0).unwrap();
        let snapshot = rebuild_up_to("p1", &events, cutoff);
        assert_eq!(snapshot.volume_of("FOOLAD"), 6);
        assert_eq!(snapshot.as_of, Some(cutoff));
    }

    #[test]
    fn test_fold_is_order_independent_at_extremes() {
        let forward = vec![
            event("p1", "FOOLAD", i64::MAX, 0),
            event("p1", "FOOLAD", 1, 1),
            event("p1", "FOOLAD", -1, 2),
        ];
        let reversed = vec![
            event("p1", "FOOLAD", 1, 0),
            event("p1", "FOOLAD", -1, 1),
            event("p1", "FOOLAD", i64::MAX, 2),
        ];
        assert_eq!(rebuild("p1", &forward).volume_of("FOOLAD"), i64::MAX);
        assert_eq!(rebuild("p1", &reversed).volume_of("FOOLAD"), i64::MAX);

        let cancelling = vec![
            event("p1", "FOOLAD", i64::MIN, 0),
            event("p1", "FOOLAD", i64::MAX, 1),
            event("p1", "FOOLAD", 1, 2),
        ];
        assert!(rebuild("p1", &cancelling).is_empty());
    }

    #[test]
    fn test_final_net_beyond_i64_is_clamped() {
        let events = vec![event("p1", "FOOLAD", i64::MAX, 0), event("p1", "FOOLAD", 5, 1)];
        assert_eq!(rebuild("p1", &events).volume_of("FOOLAD"), i64::MAX);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let events = vec![event("p1", "FOOLAD", 10, 0), event("p1", "FOOLAD_X", 5, 1)];
        assert_eq!(rebuild("p1", &events), rebuild("p1", &events));
    }
}
