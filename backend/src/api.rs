//! Public API surface for the pacing backend.
//!
//! This file consolidates the domain and DTO types used across the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::{
    CampaignId, DeliveryRecord, DeliveryTotals, FlightId, FlightSpec, GoalType, HealthTier,
    PacingResult, PricingModel,
};
pub use crate::routes::flights::FlightInfo;
pub use crate::routes::pacing::FlightPacing;
pub use crate::routes::pacing::PacingOverview;
pub use crate::routes::timeline::TierCounts;
pub use crate::routes::timeline::TimelineBar;
pub use crate::routes::timeline::TimelineData;
pub use crate::routes::timeline::TimelineGroup;
