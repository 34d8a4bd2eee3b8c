//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for validation, storage and pacing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::BTreeSet;

use super::dto::{
    DeleteResponse, DeliveryRequest, DeliveryResponse, FlightDeliveryResponse,
    FlightListResponse, HealthResponse, NowQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{FlightId, FlightPacing, FlightSpec, PacingOverview, TimelineData};
use crate::db::services as db_services;
use crate::services::aggregate_delivery;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Flight CRUD
// =============================================================================

/// GET /v1/flights
pub async fn list_flights(State(state): State<AppState>) -> HandlerResult<FlightListResponse> {
    let flights = db_services::list_flight_infos(state.repository.as_ref()).await?;
    let total = flights.len();
    Ok(Json(FlightListResponse { flights, total }))
}

/// POST /v1/flights
///
/// Store a new flight. An id of zero asks the store to assign one.
pub async fn create_flight(
    State(state): State<AppState>,
    Json(flight): Json<FlightSpec>,
) -> Result<(StatusCode, Json<FlightSpec>), AppError> {
    let stored = db_services::store_flight(state.repository.as_ref(), &flight).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /v1/flights/{flight_id}
pub async fn get_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
) -> HandlerResult<FlightSpec> {
    let flight = db_services::get_flight(state.repository.as_ref(), FlightId::new(flight_id)).await?;
    Ok(Json(flight))
}

/// PUT /v1/flights/{flight_id}
///
/// Replace a flight definition. The body id must be zero or match the path.
pub async fn update_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
    Json(mut flight): Json<FlightSpec>,
) -> HandlerResult<FlightSpec> {
    let flight_id = FlightId::new(flight_id);
    if flight.id.value() != 0 && flight.id != flight_id {
        return Err(AppError::BadRequest(format!(
            "Body flight id {} does not match path id {}",
            flight.id, flight_id
        )));
    }
    flight.id = flight_id;

    let updated =
        db_services::update_flight(state.repository.as_ref(), &state.cache, &flight).await?;
    Ok(Json(updated))
}

/// DELETE /v1/flights/{flight_id}
///
/// Delete a flight together with its delivery.
pub async fn delete_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
) -> HandlerResult<DeleteResponse> {
    let flight_id = FlightId::new(flight_id);
    db_services::delete_flight(state.repository.as_ref(), &state.cache, flight_id).await?;
    Ok(Json(DeleteResponse {
        flight_id,
        deleted: true,
    }))
}

// =============================================================================
// Delivery
// =============================================================================

/// POST /v1/delivery
///
/// Upsert a batch of daily delivery rows. A later row for the same flight
/// and day replaces the stored one.
pub async fn record_delivery(
    State(state): State<AppState>,
    Json(request): Json<DeliveryRequest>,
) -> HandlerResult<DeliveryResponse> {
    if request.records.is_empty() {
        return Err(AppError::BadRequest("Delivery batch is empty".to_string()));
    }

    let written =
        db_services::record_delivery(state.repository.as_ref(), &state.cache, &request.records)
            .await?;
    let flights = request
        .records
        .iter()
        .map(|r| r.flight_id)
        .collect::<BTreeSet<_>>()
        .len();

    Ok(Json(DeliveryResponse { written, flights }))
}

/// GET /v1/flights/{flight_id}/delivery
pub async fn get_flight_delivery(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
) -> HandlerResult<FlightDeliveryResponse> {
    let flight_id = FlightId::new(flight_id);
    let records = db_services::get_flight_delivery(state.repository.as_ref(), flight_id).await?;
    let totals = aggregate_delivery(flight_id, &records);

    Ok(Json(FlightDeliveryResponse {
        flight_id,
        records,
        totals,
    }))
}

// =============================================================================
// Pacing & Timeline
// =============================================================================

/// GET /v1/flights/{flight_id}/pacing
///
/// Clock-driven requests are served through the pacing cache; a pinned
/// `?now=` bypasses it.
pub async fn get_flight_pacing(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
    Query(query): Query<NowQuery>,
) -> HandlerResult<FlightPacing> {
    let flight_id = FlightId::new(flight_id);
    let repo = state.repository.as_ref();

    let pacing = match query.pinned()? {
        Some(now) => db_services::get_flight_pacing(repo, flight_id, now).await?,
        None => {
            let now = state.clock.now();
            db_services::get_flight_pacing_cached(repo, &state.cache, flight_id, now).await?
        }
    };
    Ok(Json(pacing))
}

/// GET /v1/pacing
pub async fn list_pacing(
    State(state): State<AppState>,
    Query(query): Query<NowQuery>,
) -> HandlerResult<PacingOverview> {
    let now = query.resolve(state.clock.as_ref())?;
    let overview = db_services::list_pacing(state.repository.as_ref(), now).await?;
    Ok(Json(overview))
}

/// GET /v1/timeline
pub async fn get_timeline(
    State(state): State<AppState>,
    Query(query): Query<NowQuery>,
) -> HandlerResult<TimelineData> {
    let now = query.resolve(state.clock.as_ref())?;
    let data = db_services::get_timeline(state.repository.as_ref(), now).await?;
    Ok(Json(data))
}
