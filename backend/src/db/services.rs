//! High-level store service layer.
//!
//! Repository-agnostic operations combining storage with pacing: input
//! validation before writes, cache invalidation after writes, and the
//! read paths that feed pacing readouts and the timeline.
//!
//! The pacing engine itself trusts its inputs; this layer is where flights
//! and delivery are checked before they are stored.
//!
//! # Usage
//!
//! ```no_run
//! use adops_pacing::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let overview = services::list_pacing(&repo, chrono::Utc::now()).await?;
//!     println!("Paced {} flights", overview.total);
//!     Ok(())
//! }
//! ```

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{DeliveryRecord, FlightId, FlightSpec, PricingModel};
use crate::routes::flights::FlightInfo;
use crate::routes::pacing::{FlightPacing, PacingOverview};
use crate::routes::timeline::TimelineData;
use crate::services::{build_timeline, compute_pacing, compute_pacing_batch, PacingCache};

// ==================== Health & Connection ====================

/// Check if the store is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Validation ====================

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Check a flight definition before it is stored.
///
/// Rejects negative or non-finite money/goal amounts and inverted date
/// windows. A goal expressed in a metric the pricing model does not pace on
/// is accepted but logged, since such a flight will always report RED once
/// it has delivery.
pub fn validate_flight(flight: &FlightSpec) -> RepositoryResult<()> {
    let context = || {
        ErrorContext::new("validate_flight")
            .with_entity("flight")
            .with_entity_id(flight.id)
    };

    if !non_negative(flight.rate) {
        return Err(RepositoryError::validation_with_context(
            format!("rate must be a non-negative number, got {}", flight.rate),
            context(),
        ));
    }
    if let Some(goal) = flight.goal_amount {
        if !non_negative(goal) {
            return Err(RepositoryError::validation_with_context(
                format!("goal_amount must be a non-negative number, got {}", goal),
                context(),
            ));
        }
    }
    if let (Some(start), Some(end)) = (flight.start_date, flight.end_date) {
        if end < start {
            return Err(RepositoryError::validation_with_context(
                format!("end_date {} is before start_date {}", end, start),
                context(),
            ));
        }
    }

    let prorated = flight.pricing_model == PricingModel::Cpm
        && flight.start_date.is_some()
        && flight.end_date.is_some();
    if let Some(native) = flight.pricing_model.native_goal() {
        if flight.goal_amount.is_some() && flight.goal_type != native && !prorated {
            warn!(
                "flight {}: {:?} goal on a {} flight has no pacing target",
                flight.id, flight.goal_type, flight.pricing_model
            );
        }
    }
    Ok(())
}

/// Check one delivery record before it is stored.
pub fn validate_delivery(record: &DeliveryRecord) -> RepositoryResult<()> {
    let counters = [
        ("impressions", record.impressions),
        ("clicks", record.clicks),
        ("spend", record.spend),
        ("conversions", record.conversions),
    ];
    for (name, value) in counters {
        if !non_negative(value) {
            return Err(RepositoryError::validation_with_context(
                format!(
                    "{} must be a non-negative number, got {} on {}",
                    name, value, record.date
                ),
                ErrorContext::new("validate_delivery")
                    .with_entity("delivery")
                    .with_entity_id(record.flight_id),
            ));
        }
    }
    Ok(())
}

// ==================== Flight Operations ====================

/// Validate and store a new flight.
pub async fn store_flight<R: FullRepository + ?Sized>(
    repo: &R,
    flight: &FlightSpec,
) -> RepositoryResult<FlightSpec> {
    validate_flight(flight)?;
    let stored = repo.store_flight(flight).await?;
    info!("Stored flight {} ({})", stored.id, stored.pricing_model);
    Ok(stored)
}

/// Validate and replace a flight, dropping any cached pacing for it.
pub async fn update_flight<R: FullRepository + ?Sized>(
    repo: &R,
    cache: &PacingCache,
    flight: &FlightSpec,
) -> RepositoryResult<FlightSpec> {
    validate_flight(flight)?;
    let updated = repo.update_flight(flight).await?;
    cache.invalidate(updated.id);
    info!("Updated flight {}", updated.id);
    Ok(updated)
}

/// Delete a flight and its delivery.
pub async fn delete_flight<R: FullRepository + ?Sized>(
    repo: &R,
    cache: &PacingCache,
    flight_id: FlightId,
) -> RepositoryResult<()> {
    repo.delete_flight(flight_id).await?;
    cache.invalidate(flight_id);
    info!("Deleted flight {}", flight_id);
    Ok(())
}

pub async fn get_flight<R: FullRepository + ?Sized>(
    repo: &R,
    flight_id: FlightId,
) -> RepositoryResult<FlightSpec> {
    repo.get_flight(flight_id).await
}

pub async fn list_flights<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<FlightSpec>> {
    repo.list_flights().await
}

/// Flight listing with the number of delivery days stored per flight.
pub async fn list_flight_infos<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<FlightInfo>> {
    let flights = repo.list_flights().await?;
    let records = repo.list_delivery().await?;

    let mut days: HashMap<FlightId, usize> = HashMap::new();
    for record in &records {
        *days.entry(record.flight_id).or_default() += 1;
    }

    Ok(flights
        .iter()
        .map(|f| FlightInfo::new(f, days.get(&f.id).copied().unwrap_or(0)))
        .collect())
}

// ==================== Delivery Operations ====================

/// Validate and upsert delivery records, invalidating pacing of every
/// flight they touch.
///
/// Validation covers the whole batch before anything is written.
pub async fn record_delivery<R: FullRepository + ?Sized>(
    repo: &R,
    cache: &PacingCache,
    records: &[DeliveryRecord],
) -> RepositoryResult<usize> {
    for record in records {
        validate_delivery(record)?;
    }
    let written = repo.upsert_delivery(records).await?;

    let touched: BTreeSet<FlightId> = records.iter().map(|r| r.flight_id).collect();
    cache.invalidate_many(touched.iter().copied());
    info!(
        "Recorded {} delivery rows across {} flights",
        written,
        touched.len()
    );
    Ok(written)
}

pub async fn get_flight_delivery<R: FullRepository + ?Sized>(
    repo: &R,
    flight_id: FlightId,
) -> RepositoryResult<Vec<DeliveryRecord>> {
    repo.list_delivery_for_flight(flight_id).await
}

// ==================== Pacing ====================

/// Pacing of one flight at `now`.
pub async fn get_flight_pacing<R: FullRepository + ?Sized>(
    repo: &R,
    flight_id: FlightId,
    now: DateTime<Utc>,
) -> RepositoryResult<FlightPacing> {
    let flight = repo.get_flight(flight_id).await?;
    let records = repo.list_delivery_for_flight(flight_id).await?;
    Ok(FlightPacing::new(&flight, compute_pacing(&flight, &records, now)))
}

/// Pacing of one flight, served from `cache` while fresh.
pub async fn get_flight_pacing_cached<R: FullRepository + ?Sized>(
    repo: &R,
    cache: &PacingCache,
    flight_id: FlightId,
    now: DateTime<Utc>,
) -> RepositoryResult<FlightPacing> {
    // Taken before any read so a write landing mid-computation is detected.
    let generation = cache.generation();
    let flight = repo.get_flight(flight_id).await?;
    if let Some(result) = cache.get(flight_id, now) {
        debug!("flight {}: pacing cache hit", flight_id);
        return Ok(FlightPacing::new(&flight, result));
    }

    let records = repo.list_delivery_for_flight(flight_id).await?;
    let result = compute_pacing(&flight, &records, now);
    if !cache.insert_if_current(flight_id, result, now, generation) {
        debug!("flight {}: written during pacing, result not cached", flight_id);
    }
    Ok(FlightPacing::new(&flight, result))
}

/// Pacing of every stored flight at `now`, in flight id order.
pub async fn list_pacing<R: FullRepository + ?Sized>(
    repo: &R,
    now: DateTime<Utc>,
) -> RepositoryResult<PacingOverview> {
    let flights = repo.list_flights().await?;
    let records = repo.list_delivery().await?;

    let results = compute_pacing_batch(&flights, &records, now);
    let flights: Vec<FlightPacing> = flights
        .iter()
        .zip(results)
        .map(|(flight, (_, result))| FlightPacing::new(flight, result))
        .collect();
    let total = flights.len();
    Ok(PacingOverview { flights, total })
}

// ==================== Timeline ====================

/// Timeline dataset for every stored flight at `now`.
pub async fn get_timeline<R: FullRepository + ?Sized>(
    repo: &R,
    now: DateTime<Utc>,
) -> RepositoryResult<TimelineData> {
    let flights = repo.list_flights().await?;
    let records = repo.list_delivery().await?;
    Ok(build_timeline(&flights, &records, now))
}
