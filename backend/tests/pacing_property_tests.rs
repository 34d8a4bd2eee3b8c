//! Property-based tests for the pacing engine.
//!
//! These tests use `proptest` to check invariants of `compute_pacing` across
//! randomly generated flights and delivery histories.
//!
//! # How to run
//!
//! ```bash
//! cargo test --test pacing_property_tests
//!
//! # Increase case count for thorough testing (default is 256):
//! PROPTEST_CASES=10000 cargo test --test pacing_property_tests
//! ```
//!
//! # Testing strategy
//!
//! Delivery counters are drawn from small integers so that sums are exact
//! in `f64` regardless of summation order. Properties cover:
//! - record order and foreign records do not change the verdict
//! - a flight with no records is always AMBER at zero
//! - the tier always agrees with the percentage thresholds
//! - batch evaluation matches per-flight evaluation
//! - repeated evaluation is bit-for-bit identical

use adops_pacing::models::{
    DeliveryRecord, FlightId, FlightSpec, GoalType, HealthTier, PacingResult, PricingModel,
};
use adops_pacing::services::{compute_pacing, compute_pacing_batch};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn arb_pricing_model() -> impl Strategy<Value = PricingModel> {
    prop_oneof![
        Just(PricingModel::Cpm),
        Just(PricingModel::Cpc),
        Just(PricingModel::Cpa),
        Just(PricingModel::Flat),
    ]
}

fn arb_goal_type() -> impl Strategy<Value = GoalType> {
    prop_oneof![
        Just(GoalType::Impressions),
        Just(GoalType::Clicks),
        Just(GoalType::Conversions),
        Just(GoalType::Spend),
        Just(GoalType::None),
    ]
}

fn arb_flight(id: i64) -> impl Strategy<Value = FlightSpec> {
    (
        arb_pricing_model(),
        arb_goal_type(),
        proptest::option::of(0u32..100_000),
        0u32..10_000,
        proptest::option::of(0i64..60),
        proptest::option::of(0i64..90),
        any::<bool>(),
    )
        .prop_map(move |(model, goal_type, goal, rate, start, len, always_on)| {
            let start_date = start.map(|s| base_date() + Duration::days(s));
            let end_date = match (start_date, len) {
                (Some(s), Some(l)) => Some(s + Duration::days(l)),
                _ => None,
            };
            FlightSpec {
                goal_type,
                goal_amount: goal.map(f64::from),
                rate: f64::from(rate),
                start_date,
                end_date,
                always_on,
                ..FlightSpec::new(FlightId::new(id), model)
            }
        })
}

fn arb_records(flight_ids: Vec<i64>) -> impl Strategy<Value = Vec<DeliveryRecord>> {
    let ids = flight_ids.clone();
    proptest::collection::vec(
        (
            0..ids.len(),
            0i64..120,
            0u32..50_000,
            0u32..5_000,
            0u32..10_000,
            0u32..500,
        ),
        0..40,
    )
    .prop_map(move |rows| {
        rows.into_iter()
            .map(|(idx, day, imps, clicks, spend, conv)| DeliveryRecord {
                flight_id: FlightId::new(flight_ids[idx]),
                date: base_date() + Duration::days(day),
                impressions: f64::from(imps),
                clicks: f64::from(clicks),
                spend: f64::from(spend),
                conversions: f64::from(conv),
            })
            .collect()
    })
}

fn arb_now() -> impl Strategy<Value = DateTime<Utc>> {
    (-30i64..200, 0i64..86_400).prop_map(|(day, secs)| {
        Utc.from_utc_datetime(&base_date().and_hms_opt(0, 0, 0).unwrap())
            + Duration::days(day)
            + Duration::seconds(secs)
    })
}

proptest! {
    /// Reversing the record list never changes the verdict.
    #[test]
    fn prop_pacing_order_independent(
        flight in arb_flight(1),
        records in arb_records(vec![1, 2]),
        now in arb_now(),
    ) {
        let mut reversed = records.clone();
        reversed.reverse();
        prop_assert_eq!(
            compute_pacing(&flight, &records, now),
            compute_pacing(&flight, &reversed, now)
        );
    }

    /// Records belonging to other flights are ignored.
    #[test]
    fn prop_pacing_ignores_foreign_records(
        flight in arb_flight(1),
        records in arb_records(vec![1, 2, 3]),
        now in arb_now(),
    ) {
        let own: Vec<DeliveryRecord> = records
            .iter()
            .filter(|r| r.flight_id == flight.id)
            .cloned()
            .collect();
        prop_assert_eq!(
            compute_pacing(&flight, &records, now),
            compute_pacing(&flight, &own, now)
        );
    }

    /// No matching records means AMBER with every value at zero.
    #[test]
    fn prop_no_records_is_amber(
        flight in arb_flight(1),
        others in arb_records(vec![2, 3]),
        now in arb_now(),
    ) {
        prop_assert_eq!(compute_pacing(&flight, &others, now), PacingResult::unknown());
    }

    /// The tier always agrees with the percentage thresholds, and the
    /// percentage is zero whenever nothing was expected.
    #[test]
    fn prop_tier_matches_percentage(
        flight in arb_flight(1),
        records in arb_records(vec![1]),
        now in arb_now(),
    ) {
        prop_assume!(!records.is_empty());
        let result = compute_pacing(&flight, &records, now);
        prop_assert_eq!(result.health, HealthTier::from_percentage(result.percentage));
        if result.expected <= 0.0 {
            prop_assert_eq!(result.percentage, 0.0);
            prop_assert_eq!(result.health, HealthTier::Red);
        }
        prop_assert!(result.delivered >= 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 65_536, ..ProptestConfig::default() })]

    /// Prorated CPM targets never exceed the goal.
    #[test]
    fn prop_prorated_target_bounded_by_goal(
        flight in arb_flight(1),
        records in arb_records(vec![1]),
        now in arb_now(),
    ) {
        prop_assume!(flight.pricing_model == PricingModel::Cpm);
        prop_assume!(flight.goal_type != GoalType::Impressions);
        prop_assume!(!records.is_empty());
        let result = compute_pacing(&flight, &records, now);
        let goal = flight.goal_amount.unwrap_or(0.0);
        prop_assert!(result.expected >= 0.0);
        prop_assert!(result.expected <= goal * (1.0 + 1e-12));
    }
}

proptest! {
    /// Batch evaluation matches evaluating each flight on its own.
    #[test]
    fn prop_batch_matches_single(
        a in arb_flight(1),
        b in arb_flight(2),
        c in arb_flight(3),
        records in arb_records(vec![1, 2, 3, 4]),
        now in arb_now(),
    ) {
        let flights = vec![a, b, c];
        let batch = compute_pacing_batch(&flights, &records, now);
        prop_assert_eq!(batch.len(), flights.len());
        for (flight, (id, result)) in flights.iter().zip(batch) {
            prop_assert_eq!(id, flight.id);
            prop_assert_eq!(result, compute_pacing(flight, &records, now));
        }
    }

    /// Evaluating twice gives bit-identical results.
    #[test]
    fn prop_pacing_deterministic(
        flight in arb_flight(1),
        records in arb_records(vec![1]),
        now in arb_now(),
    ) {
        let first = compute_pacing(&flight, &records, now);
        let second = compute_pacing(&flight, &records, now);
        prop_assert_eq!(first.percentage.to_bits(), second.percentage.to_bits());
        prop_assert_eq!(first.expected.to_bits(), second.expected.to_bits());
        prop_assert_eq!(first.health, second.health);
    }
}
