//! Property-based integration tests for holdings reconstruction.
//!
//! Holdings are a pure fold over the event log, so they must not depend on
//! event order, and a point-in-time view must equal a full rebuild over the
//! events at or before the cutoff.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use rightsbook_core::capital_raise::compute_entitlement;
use rightsbook_core::holdings::{rebuild, rebuild_up_to};
use rightsbook_core::{ActionType, SecurityChangeEvent};

// =============================================================================
// Generators
// =============================================================================

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
}

fn arb_action_type() -> impl Strategy<Value = ActionType> {
    prop_oneof![
        Just(ActionType::CapitalRaise),
        Just(ActionType::BuyRight),
        Just(ActionType::SellRight),
        Just(ActionType::RightUsage),
        Just(ActionType::Adjustment),
    ]
}

/// Generates a valid event over a small alphabet of portfolios and symbols so
/// collisions are frequent.
fn arb_event() -> impl Strategy<Value = SecurityChangeEvent> {
    (
        prop_oneof![Just("p1"), Just("p2")],
        prop_oneof![Just("FOO"), Just("FOO_X"), Just("BAR"), Just("BAR_X")],
        prop_oneof![-1_000i64..=-1, 1i64..=1_000],
        0i64..600, // minutes after base
        arb_action_type(),
    )
        .prop_map(|(portfolio, symbol, delta, minute, action)| {
            SecurityChangeEvent::new(portfolio, symbol, delta, action)
                .unwrap()
                .at(base_time() + Duration::minutes(minute))
        })
}

fn arb_events(max_count: usize) -> impl Strategy<Value = Vec<SecurityChangeEvent>> {
    proptest::collection::vec(arb_event(), 0..=max_count)
}

/// Reference sum, grouped by symbol with zero nets removed.
fn grouped_sum(portfolio: &str, events: &[SecurityChangeEvent]) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for event in events.iter().filter(|e| e.portfolio_id == portfolio) {
        *totals.entry(event.symbol.clone()).or_insert(0i64) += event.delta;
    }
    totals.retain(|_, net| *net != 0);
    totals
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rebuilding equals the per-symbol sum of deltas, with symbols that net
    /// to zero absent.
    #[test]
    fn prop_rebuild_is_grouped_sum(events in arb_events(60)) {
        for portfolio in ["p1", "p2"] {
            let snapshot = rebuild(portfolio, &events);
            prop_assert_eq!(snapshot.positions(), &grouped_sum(portfolio, &events));
            prop_assert!(snapshot.positions().values().all(|net| *net != 0));
        }
    }

    /// Event order does not change the result.
    #[test]
    fn prop_rebuild_ignores_order(
        events in arb_events(60),
        shuffled in arb_events(60).prop_shuffle(),
    ) {
        let mut reversed = events.clone();
        reversed.reverse();
        prop_assert_eq!(rebuild("p1", &events), rebuild("p1", &reversed));

        let mut rotated = shuffled.clone();
        if !rotated.is_empty() {
            let mid = rotated.len() / 2;
            rotated.rotate_left(mid);
        }
        prop_assert_eq!(rebuild("p2", &shuffled), rebuild("p2", &rotated));
    }

    /// A point-in-time view equals a full rebuild over the events up to and
    /// including the cutoff.
    #[test]
    fn prop_rebuild_up_to_matches_filtered_rebuild(
        events in arb_events(60),
        cutoff_minute in 0i64..600,
    ) {
        let cutoff = base_time() + Duration::minutes(cutoff_minute);
        let filtered: Vec<SecurityChangeEvent> = events
            .iter()
            .filter(|e| e.timestamp <= cutoff)
            .cloned()
            .collect();

        let as_of = rebuild_up_to("p1", &events, cutoff);
        let full = rebuild("p1", &filtered);
        prop_assert_eq!(as_of.positions(), full.positions());
        prop_assert_eq!(as_of.as_of, Some(cutoff));
    }

    /// The entitlement never exceeds `held * ratio` and misses it by less
    /// than one unit.
    #[test]
    fn prop_entitlement_is_floor(held in 0i64..1_000_000, thousandths in 0i64..5_000) {
        let ratio = Decimal::new(thousandths, 3);
        let granted = compute_entitlement(held, ratio).unwrap();
        let exact = Decimal::from(held) * ratio;

        prop_assert!(Decimal::from(granted) <= exact);
        prop_assert!(exact - Decimal::from(granted) < Decimal::ONE);
    }
}
