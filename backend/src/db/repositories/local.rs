//! In-memory local repository implementation.
//!
//! All data lives in ordered maps behind a single lock, which keeps listings
//! deterministic and makes the store suitable for unit tests and local
//! development.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::repository::{
    DeliveryRepository, ErrorContext, FlightRepository, RepositoryError, RepositoryResult,
};
use crate::models::{DeliveryRecord, FlightId, FlightSpec};

/// In-memory local repository.
///
/// # Example
/// ```
/// use adops_pacing::db::repositories::LocalRepository;
/// use adops_pacing::db::repository::FlightRepository;
/// use adops_pacing::models::{FlightId, FlightSpec, PricingModel};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = LocalRepository::new();
/// let stored = repo
///     .store_flight(&FlightSpec::new(FlightId::new(0), PricingModel::Flat))
///     .await
///     .unwrap();
/// assert_eq!(stored.id, FlightId::new(1));
/// # });
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    flights: BTreeMap<FlightId, FlightSpec>,
    delivery: BTreeMap<(FlightId, NaiveDate), DeliveryRecord>,
    next_flight_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            flights: BTreeMap::new(),
            delivery: BTreeMap::new(),
            next_flight_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the store healthy or unhealthy (used to exercise health reporting).
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn flight_count(&self) -> usize {
        self.data.read().flights.len()
    }

    pub fn delivery_count(&self) -> usize {
        self.data.read().delivery.len()
    }

    fn flight_not_found(operation: &str, flight_id: FlightId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Flight {} not found", flight_id),
            ErrorContext::new(operation)
                .with_entity("flight")
                .with_entity_id(flight_id),
        )
    }
}

#[async_trait]
impl FlightRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn store_flight(&self, flight: &FlightSpec) -> RepositoryResult<FlightSpec> {
        let mut data = self.data.write();

        let id = if flight.id.value() > 0 {
            if data.flights.contains_key(&flight.id) {
                return Err(RepositoryError::validation_with_context(
                    format!("Flight {} already exists", flight.id),
                    ErrorContext::new("store_flight")
                        .with_entity("flight")
                        .with_entity_id(flight.id),
                ));
            }
            flight.id
        } else {
            FlightId::new(data.next_flight_id)
        };
        let next = id.value().checked_add(1).ok_or_else(|| {
            RepositoryError::validation_with_context(
                format!("Flight id {} out of range", id),
                ErrorContext::new("store_flight")
                    .with_entity("flight")
                    .with_entity_id(id),
            )
        })?;
        data.next_flight_id = data.next_flight_id.max(next);

        let mut stored = flight.clone();
        stored.id = id;
        data.flights.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_flight(&self, flight: &FlightSpec) -> RepositoryResult<FlightSpec> {
        let mut data = self.data.write();
        match data.flights.get_mut(&flight.id) {
            Some(existing) => {
                *existing = flight.clone();
                Ok(flight.clone())
            }
            None => Err(Self::flight_not_found("update_flight", flight.id)),
        }
    }

    async fn get_flight(&self, flight_id: FlightId) -> RepositoryResult<FlightSpec> {
        self.data
            .read()
            .flights
            .get(&flight_id)
            .cloned()
            .ok_or_else(|| Self::flight_not_found("get_flight", flight_id))
    }

    async fn list_flights(&self) -> RepositoryResult<Vec<FlightSpec>> {
        Ok(self.data.read().flights.values().cloned().collect())
    }

    async fn delete_flight(&self, flight_id: FlightId) -> RepositoryResult<()> {
        let mut data = self.data.write();
        if data.flights.remove(&flight_id).is_none() {
            return Err(Self::flight_not_found("delete_flight", flight_id));
        }
        data.delivery.retain(|(id, _), _| *id != flight_id);
        Ok(())
    }
}

#[async_trait]
impl DeliveryRepository for LocalRepository {
    async fn upsert_delivery(&self, records: &[DeliveryRecord]) -> RepositoryResult<usize> {
        let mut data = self.data.write();

        if let Some(orphan) = records
            .iter()
            .find(|r| !data.flights.contains_key(&r.flight_id))
        {
            return Err(Self::flight_not_found("upsert_delivery", orphan.flight_id));
        }

        for record in records {
            data.delivery
                .insert((record.flight_id, record.date), record.clone());
        }
        Ok(records.len())
    }

    async fn list_delivery(&self) -> RepositoryResult<Vec<DeliveryRecord>> {
        Ok(self.data.read().delivery.values().cloned().collect())
    }

    async fn list_delivery_for_flight(
        &self,
        flight_id: FlightId,
    ) -> RepositoryResult<Vec<DeliveryRecord>> {
        let data = self.data.read();
        if !data.flights.contains_key(&flight_id) {
            return Err(Self::flight_not_found("list_delivery_for_flight", flight_id));
        }
        Ok(data
            .delivery
            .range((flight_id, NaiveDate::MIN)..=(flight_id, NaiveDate::MAX))
            .map(|(_, r)| r.clone())
            .collect())
    }
}
