//! Delivery repository trait.
//!
//! Delivery is stored as at most one record per flight per calendar day.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{DeliveryRecord, FlightId};

/// Repository trait for daily delivery counters.
#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    /// Insert or replace records keyed by `(flight_id, date)`.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records written
    /// * `Err(RepositoryError::NotFound)` - If a record references an unknown flight;
    ///   nothing is written in that case
    async fn upsert_delivery(&self, records: &[DeliveryRecord]) -> RepositoryResult<usize>;

    /// All delivery records across flights, ordered by flight then date.
    async fn list_delivery(&self) -> RepositoryResult<Vec<DeliveryRecord>>;

    /// Delivery records of one flight, ordered by date.
    async fn list_delivery_for_flight(
        &self,
        flight_id: FlightId,
    ) -> RepositoryResult<Vec<DeliveryRecord>>;
}
