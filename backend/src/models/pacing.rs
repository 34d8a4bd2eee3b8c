//! Pacing output types.

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the GREEN tier, in percent.
pub const GREEN_THRESHOLD: f64 = 95.0;
/// Lower bound (inclusive) of the AMBER tier, in percent.
pub const AMBER_THRESHOLD: f64 = 80.0;

/// Coarse three-level delivery health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthTier {
    Green,
    Amber,
    Red,
}

impl HealthTier {
    /// Classify a pacing percentage. Lower bounds are inclusive; NaN is RED.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= GREEN_THRESHOLD {
            HealthTier::Green
        } else if percentage >= AMBER_THRESHOLD {
            HealthTier::Amber
        } else {
            HealthTier::Red
        }
    }

    /// Fixed display colour used for timeline bars and badges.
    pub fn color(&self) -> &'static str {
        match self {
            HealthTier::Green => "#22c55e",
            HealthTier::Amber => "#f59e0b",
            HealthTier::Red => "#ef4444",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthTier::Green => "On pace",
            HealthTier::Amber => "At risk",
            HealthTier::Red => "Behind",
        }
    }

    pub fn all() -> [HealthTier; 3] {
        [HealthTier::Green, HealthTier::Amber, HealthTier::Red]
    }
}

impl std::fmt::Display for HealthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HealthTier::Green => "GREEN",
            HealthTier::Amber => "AMBER",
            HealthTier::Red => "RED",
        };
        f.write_str(s)
    }
}

/// Delivery health verdict for one flight at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacingResult {
    pub health: HealthTier,
    pub percentage: f64,
    pub delivered: f64,
    pub expected: f64,
}

impl PacingResult {
    /// Result for a flight with no delivery history.
    pub fn unknown() -> Self {
        Self {
            health: HealthTier::Amber,
            percentage: 0.0,
            delivered: 0.0,
            expected: 0.0,
        }
    }

    /// Build a result from delivered/expected, deriving percentage and tier.
    pub fn from_delivery(delivered: f64, expected: f64) -> Self {
        let percentage = if expected > 0.0 {
            (delivered / expected) * 100.0
        } else {
            0.0
        };
        Self {
            health: HealthTier::from_percentage(percentage),
            percentage,
            delivered,
            expected,
        }
    }
}

/// Summed delivery counters for one flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTotals {
    pub impressions: f64,
    pub clicks: f64,
    pub spend: f64,
    pub conversions: f64,
    pub days: usize,
}
