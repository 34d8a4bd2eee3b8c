//! Flight pacing and delivery-health engine.
//!
//! Given a flight and the delivery history of any number of flights, compute
//! how far the flight's delivery is along against what it should have
//! delivered by now, and classify that into a [`HealthTier`].
//!
//! The computation is pure: inputs are borrowed immutably and the only
//! ambient input, the current instant, is passed explicitly (or through a
//! [`Clock`] on [`PacingEngine`]). It never fails; degenerate inputs produce
//! zeros, and malformed numbers (negative rates, NaN counters) flow through
//! the arithmetic unchecked. Validation belongs to the caller (see
//! [`crate::db::services`]).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;

use crate::models::{
    ceil_days, date_start, Clock, DeliveryRecord, DeliveryTotals, FlightId, FlightSpec, GoalType,
    PacingResult, PricingModel, SystemClock,
};

/// Sum the counters of every record belonging to `flight_id`.
pub fn aggregate_delivery<'a, I>(flight_id: FlightId, records: I) -> DeliveryTotals
where
    I: IntoIterator<Item = &'a DeliveryRecord>,
{
    records
        .into_iter()
        .filter(|r| r.flight_id == flight_id)
        .fold(DeliveryTotals::default(), |mut acc, r| {
            acc.impressions += r.impressions;
            acc.clicks += r.clicks;
            acc.spend += r.spend;
            acc.conversions += r.conversions;
            acc.days += 1;
            acc
        })
}

/// Goal amount, if the flight's goal is expressed in `goal_type`.
fn goal_for(flight: &FlightSpec, goal_type: GoalType) -> Option<f64> {
    if flight.goal_type == goal_type {
        flight.goal_amount
    } else {
        None
    }
}

/// Target prorated linearly over the flight's date window.
///
/// Returns 0 for always-on flights, flights missing either date, and
/// zero-length or inverted windows.
fn prorated_goal(flight: &FlightSpec, now: DateTime<Utc>) -> f64 {
    if flight.always_on {
        return 0.0;
    }
    let (Some(start), Some(end)) = (flight.start_date, flight.end_date) else {
        return 0.0;
    };

    let start = date_start(start);
    let total_days = ceil_days(start, date_start(end));
    if total_days <= 0 {
        return 0.0;
    }
    let days_passed = ceil_days(start, now).clamp(0, total_days);

    flight.goal_amount.unwrap_or(0.0) / total_days as f64 * days_passed as f64
}

/// Select delivered/expected in the unit of the flight's pricing model.
fn delivered_and_expected(
    flight: &FlightSpec,
    totals: &DeliveryTotals,
    now: DateTime<Utc>,
) -> (f64, f64) {
    match flight.pricing_model {
        PricingModel::Cpm => {
            let expected = goal_for(flight, GoalType::Impressions)
                .unwrap_or_else(|| prorated_goal(flight, now));
            (totals.impressions, expected)
        }
        PricingModel::Cpc => (
            totals.clicks,
            goal_for(flight, GoalType::Clicks).unwrap_or(0.0),
        ),
        PricingModel::Cpa => (
            totals.conversions,
            goal_for(flight, GoalType::Conversions).unwrap_or(0.0),
        ),
        PricingModel::Flat => (totals.spend, flight.rate),
    }
}

/// Compute the pacing verdict for `flight` from the full record set.
///
/// `all_records` may hold delivery for other flights; only records whose
/// `flight_id` matches are considered. A flight without any records is
/// reported as AMBER with all values at zero. A flight with records but no
/// computable target reports `percentage = 0` and therefore RED.
pub fn compute_pacing(
    flight: &FlightSpec,
    all_records: &[DeliveryRecord],
    now: DateTime<Utc>,
) -> PacingResult {
    let totals = aggregate_delivery(flight.id, all_records);
    pacing_from_totals(flight, &totals, now)
}

/// Compute pacing from already aggregated totals.
pub fn pacing_from_totals(
    flight: &FlightSpec,
    totals: &DeliveryTotals,
    now: DateTime<Utc>,
) -> PacingResult {
    if totals.days == 0 {
        debug!("flight {}: no delivery records, pacing unknown", flight.id);
        return PacingResult::unknown();
    }

    let (delivered, expected) = delivered_and_expected(flight, totals, now);
    let result = PacingResult::from_delivery(delivered, expected);
    debug!(
        "flight {} ({}): delivered={} expected={} pct={:.2} health={}",
        flight.id, flight.pricing_model, delivered, expected, result.percentage, result.health
    );
    result
}

/// Pacing for many flights against one record set.
///
/// Records are grouped by flight once, so the cost is linear in
/// `flights + records`. Results come back in the order of `flights` and are
/// identical to calling [`compute_pacing`] per flight.
pub fn compute_pacing_batch(
    flights: &[FlightSpec],
    all_records: &[DeliveryRecord],
    now: DateTime<Utc>,
) -> Vec<(FlightId, PacingResult)> {
    let mut by_flight: HashMap<FlightId, Vec<&DeliveryRecord>> = HashMap::new();
    for record in all_records {
        by_flight.entry(record.flight_id).or_default().push(record);
    }

    flights
        .iter()
        .map(|flight| {
            let totals = by_flight
                .get(&flight.id)
                .map(|records| aggregate_delivery(flight.id, records.iter().copied()))
                .unwrap_or_default();
            (flight.id, pacing_from_totals(flight, &totals, now))
        })
        .collect()
}

/// Pacing calculator bound to a time source.
#[derive(Debug, Clone, Default)]
pub struct PacingEngine<C: Clock = SystemClock> {
    clock: C,
}

impl PacingEngine<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> PacingEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn compute(&self, flight: &FlightSpec, all_records: &[DeliveryRecord]) -> PacingResult {
        compute_pacing(flight, all_records, self.clock.now())
    }

    pub fn compute_batch(
        &self,
        flights: &[FlightSpec],
        all_records: &[DeliveryRecord],
    ) -> Vec<(FlightId, PacingResult)> {
        compute_pacing_batch(flights, all_records, self.clock.now())
    }
}

#[cfg(test)]
#[path = "pacing_tests.rs"]
mod pacing_tests;
