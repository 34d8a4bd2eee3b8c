//! Flight repository trait for CRUD operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{FlightId, FlightSpec};

/// Repository trait for flight definitions.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Flight Operations ====================

    /// Store a new flight.
    ///
    /// The flight's `id` is used when it is positive and free; otherwise the
    /// store assigns the next id.
    ///
    /// # Returns
    /// * `Ok(FlightSpec)` - The stored flight, with its final id
    /// * `Err(RepositoryError::ValidationError)` - If the requested id is taken
    async fn store_flight(&self, flight: &FlightSpec) -> RepositoryResult<FlightSpec>;

    /// Replace an existing flight.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no flight has `flight.id`
    async fn update_flight(&self, flight: &FlightSpec) -> RepositoryResult<FlightSpec>;

    /// Retrieve a flight by id.
    async fn get_flight(&self, flight_id: FlightId) -> RepositoryResult<FlightSpec>;

    /// List all flights ordered by id.
    async fn list_flights(&self) -> RepositoryResult<Vec<FlightSpec>>;

    /// Delete a flight together with its delivery records.
    async fn delete_flight(&self, flight_id: FlightId) -> RepositoryResult<()>;
}
