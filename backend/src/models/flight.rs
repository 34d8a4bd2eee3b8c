//! Flight and delivery domain types.
//!
//! A flight is the unit of ad delivery that gets paced: it carries a pricing
//! model, an optional goal, and an optional date window. Delivery arrives as
//! one [`DeliveryRecord`] per flight per calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, FlightId);
crate::define_id_type!(i64, CampaignId);

/// Unit basis a flight is charged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PricingModel {
    /// Cost per thousand impressions.
    Cpm,
    /// Cost per click.
    Cpc,
    /// Cost per acquisition (conversion).
    Cpa,
    /// Fixed fee regardless of volume.
    Flat,
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::Cpm => "CPM",
            PricingModel::Cpc => "CPC",
            PricingModel::Cpa => "CPA",
            PricingModel::Flat => "FLAT",
        }
    }

    /// Goal type whose amount is taken as a flat target for this model, if any.
    pub fn native_goal(&self) -> Option<GoalType> {
        match self {
            PricingModel::Cpm => Some(GoalType::Impressions),
            PricingModel::Cpc => Some(GoalType::Clicks),
            PricingModel::Cpa => Some(GoalType::Conversions),
            PricingModel::Flat => None,
        }
    }
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric a flight's delivery target is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalType {
    Impressions,
    Clicks,
    Conversions,
    Spend,
    #[default]
    None,
}

/// Flight definition as seen by the pacing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSpec {
    pub id: FlightId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    #[serde(default)]
    pub campaign_name: Option<String>,
    pub pricing_model: PricingModel,
    #[serde(default)]
    pub goal_type: GoalType,
    #[serde(default)]
    pub goal_amount: Option<f64>,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub always_on: bool,
}

impl FlightSpec {
    /// Minimal flight with no goal, no dates and a zero rate.
    pub fn new(id: FlightId, pricing_model: PricingModel) -> Self {
        Self {
            id,
            name: String::new(),
            campaign_id: None,
            campaign_name: None,
            pricing_model,
            goal_type: GoalType::None,
            goal_amount: None,
            rate: 0.0,
            start_date: None,
            end_date: None,
            always_on: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_campaign(mut self, id: CampaignId, name: impl Into<String>) -> Self {
        self.campaign_id = Some(id);
        self.campaign_name = Some(name.into());
        self
    }

    pub fn with_goal(mut self, goal_type: GoalType, amount: f64) -> Self {
        self.goal_type = goal_type;
        self.goal_amount = Some(amount);
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn always_on(mut self) -> Self {
        self.always_on = true;
        self
    }

    /// True when the flight has no end date and is marked always-on.
    pub fn is_open_ended(&self) -> bool {
        self.always_on && self.end_date.is_none()
    }
}

/// One day of delivery counters for a flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub flight_id: FlightId,
    pub date: NaiveDate,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub clicks: f64,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub conversions: f64,
}

impl DeliveryRecord {
    /// Record with all counters at zero.
    pub fn empty(flight_id: FlightId, date: NaiveDate) -> Self {
        Self {
            flight_id,
            date,
            impressions: 0.0,
            clicks: 0.0,
            spend: 0.0,
            conversions: 0.0,
        }
    }
}
