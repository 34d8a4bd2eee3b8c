use serde::{Deserialize, Serialize};

use crate::models::{FlightId, FlightSpec, HealthTier, PacingResult, PricingModel};

// =========================================================
// Pacing readout types
// =========================================================

/// Pacing result with the flight context a readout needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPacing {
    pub flight_id: FlightId,
    pub name: String,
    pub pricing_model: PricingModel,
    #[serde(flatten)]
    pub pacing: PacingResult,
    pub color: String,
    pub label: String,
}

impl FlightPacing {
    pub fn new(flight: &FlightSpec, pacing: PacingResult) -> Self {
        Self {
            flight_id: flight.id,
            name: flight.name.clone(),
            pricing_model: flight.pricing_model,
            color: pacing.health.color().to_string(),
            label: pacing.health.label().to_string(),
            pacing,
        }
    }

    pub fn health(&self) -> HealthTier {
        self.pacing.health
    }
}

/// Pacing of every flight in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingOverview {
    pub flights: Vec<FlightPacing>,
    pub total: usize,
}
