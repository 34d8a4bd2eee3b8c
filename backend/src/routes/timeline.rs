use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CampaignId, FlightId, HealthTier, PricingModel};

// =========================================================
// Flight timeline types
// =========================================================

/// One Gantt bar: a flight's window plus its pacing readout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBar {
    pub flight_id: FlightId,
    pub name: String,
    pub pricing_model: PricingModel,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Always-on flight with no end date; the bar runs to the right edge.
    pub open_ended: bool,
    pub health: HealthTier,
    pub color: String,
    pub label: String,
    pub percentage: f64,
    pub delivered: f64,
    pub expected: f64,
    /// Progress fill in percent, clamped to [0, 100].
    pub fill: f64,
}

/// Bars of one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineGroup {
    /// Stable identifier of the group, unique within one dataset even when
    /// campaign names repeat.
    pub key: String,
    pub campaign_id: Option<CampaignId>,
    pub name: String,
    pub worst_health: Option<HealthTier>,
    pub bars: Vec<TimelineBar>,
}

/// Flight count per health tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub green: usize,
    pub amber: usize,
    pub red: usize,
}

impl TierCounts {
    pub fn add(&mut self, tier: HealthTier) {
        match tier {
            HealthTier::Green => self.green += 1,
            HealthTier::Amber => self.amber += 1,
            HealthTier::Red => self.red += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.green + self.amber + self.red
    }
}

/// Flight timeline dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    pub generated_at: DateTime<Utc>,
    pub range_start: Option<NaiveDate>,
    pub range_end: Option<NaiveDate>,
    pub total_count: usize,
    pub counts: TierCounts,
    pub groups: Vec<TimelineGroup>,
}
