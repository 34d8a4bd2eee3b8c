//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Pacing and timeline payloads are re-exported from the routes module since
//! they already derive Serialize/Deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::api::{
    // Flights
    DeliveryRecord, DeliveryTotals, FlightId, FlightInfo, FlightSpec,
    // Pacing
    FlightPacing, PacingOverview,
    // Timeline
    TimelineBar, TimelineData, TimelineGroup,
};

use super::error::AppError;
use crate::models::Clock;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}

/// Flight list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightListResponse {
    pub flights: Vec<FlightInfo>,
    pub total: usize,
}

/// Request body for a delivery batch upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub records: Vec<DeliveryRecord>,
}

/// Response for a delivery batch upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResponse {
    /// Rows inserted or replaced
    pub written: usize,
    /// Distinct flights touched by the batch
    pub flights: usize,
}

/// Stored delivery of one flight together with its summed counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDeliveryResponse {
    pub flight_id: FlightId,
    pub records: Vec<DeliveryRecord>,
    pub totals: DeliveryTotals,
}

/// Response for a flight deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub flight_id: FlightId,
    pub deleted: bool,
}

/// Query parameters accepted by pacing and timeline endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NowQuery {
    /// RFC 3339 instant to evaluate pacing at instead of the server clock
    #[serde(default)]
    pub now: Option<String>,
}

impl NowQuery {
    /// The pinned instant, if one was supplied.
    pub fn pinned(&self) -> Result<Option<DateTime<Utc>>, AppError> {
        match self.now.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| {
                    AppError::BadRequest(format!("Invalid 'now' parameter '{}': {}", raw, e))
                }),
        }
    }

    /// The pinned instant, falling back to `clock`.
    pub fn resolve(&self, clock: &dyn Clock) -> Result<DateTime<Utc>, AppError> {
        Ok(self.pinned()?.unwrap_or_else(|| clock.now()))
    }
}
