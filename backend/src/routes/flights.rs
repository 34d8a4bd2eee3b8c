use crate::models::{CampaignId, FlightId, FlightSpec, PricingModel};
use serde::{Deserialize, Serialize};

/// Lightweight flight listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightInfo {
    pub flight_id: FlightId,
    pub flight_name: String,
    pub campaign_id: Option<CampaignId>,
    pub pricing_model: PricingModel,
    pub delivery_days: usize,
}

impl FlightInfo {
    pub fn new(flight: &FlightSpec, delivery_days: usize) -> Self {
        Self {
            flight_id: flight.id,
            flight_name: flight.name.clone(),
            campaign_id: flight.campaign_id,
            pricing_model: flight.pricing_model,
            delivery_days,
        }
    }
}
