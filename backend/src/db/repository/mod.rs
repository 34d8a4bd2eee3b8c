//! Repository trait definitions for storage operations.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`flight`]: CRUD operations for flight definitions
//! - [`delivery`]: Daily delivery record storage
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn pacing_for<R: FullRepository + ?Sized>(repo: &R, id: FlightId) -> RepositoryResult<()> {
//!     let flight = repo.get_flight(id).await?;
//!     let records = repo.list_delivery_for_flight(id).await?;
//!     Ok(())
//! }
//! ```

pub mod delivery;
pub mod error;
pub mod flight;

pub use delivery::DeliveryRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use flight::FlightRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: FlightRepository + DeliveryRepository {}

// Blanket implementation: any type implementing both traits is a FullRepository
impl<T> FullRepository for T where T: FlightRepository + DeliveryRepository {}
