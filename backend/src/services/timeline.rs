//! Gantt timeline projection of flights and their pacing.
//!
//! Turns flights plus delivery into bar rows grouped by campaign, each bar
//! carrying the colour and fill of its pacing tier. [`TimelineState`] holds
//! the selection/expansion state a timeline view keeps in sync with its
//! flight list.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{CampaignId, DeliveryRecord, FlightId, FlightSpec, HealthTier};
use crate::routes::timeline::{TierCounts, TimelineBar, TimelineData, TimelineGroup};
use crate::services::pacing::compute_pacing_batch;

/// Group label for flights not attached to a campaign.
pub const UNASSIGNED_GROUP: &str = "Unassigned";

/// Progress-bar fill for a pacing percentage, clamped to `[0, 100]`.
pub fn bar_fill(percentage: f64) -> f64 {
    if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    }
}

/// Key identifying a timeline group by campaign id and display name.
///
/// Campaigns sharing a name stay distinct, and a campaign literally named
/// "Unassigned" never merges with flights that have no campaign.
pub fn group_key(name: &str, campaign_id: Option<CampaignId>) -> String {
    match campaign_id {
        Some(id) => format!("{}:{}", id, name),
        None => format!("-:{}", name),
    }
}

fn group_of(flight: &FlightSpec) -> (String, Option<CampaignId>) {
    let name = flight
        .campaign_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .or_else(|| flight.campaign_id.map(|id| format!("Campaign {}", id)))
        .unwrap_or_else(|| UNASSIGNED_GROUP.to_string());
    (name, flight.campaign_id)
}

/// Build the timeline dataset for `flights` at instant `now`.
pub fn build_timeline(
    flights: &[FlightSpec],
    all_records: &[DeliveryRecord],
    now: DateTime<Utc>,
) -> TimelineData {
    let pacing = compute_pacing_batch(flights, all_records, now);
    let today = now.date_naive();

    let mut counts = TierCounts::default();
    let mut range_start: Option<NaiveDate> = None;
    let mut range_end: Option<NaiveDate> = None;
    let mut groups: BTreeMap<(String, Option<CampaignId>), Vec<TimelineBar>> = BTreeMap::new();

    for (flight, (_, result)) in flights.iter().zip(pacing) {
        counts.add(result.health);

        if let Some(start) = flight.start_date {
            range_start = Some(range_start.map_or(start, |s| s.min(start)));
        }
        let bar_end = if flight.is_open_ended() {
            Some(today)
        } else {
            flight.end_date
        };
        if let Some(end) = bar_end {
            range_end = Some(range_end.map_or(end, |e| e.max(end)));
        }

        groups.entry(group_of(flight)).or_default().push(TimelineBar {
            flight_id: flight.id,
            name: flight.name.clone(),
            pricing_model: flight.pricing_model,
            start_date: flight.start_date,
            end_date: flight.end_date,
            open_ended: flight.is_open_ended(),
            health: result.health,
            color: result.health.color().to_string(),
            label: result.health.label().to_string(),
            percentage: result.percentage,
            delivered: result.delivered,
            expected: result.expected,
            fill: bar_fill(result.percentage),
        });
    }

    let groups: Vec<TimelineGroup> = groups
        .into_iter()
        .map(|((name, campaign_id), mut bars)| {
            bars.sort_by(|a, b| {
                // Undated bars sort last.
                let a_key = (a.start_date.is_none(), a.start_date, a.flight_id);
                let b_key = (b.start_date.is_none(), b.start_date, b.flight_id);
                a_key.cmp(&b_key)
            });
            let worst = bars.iter().map(|b| b.health).max_by_key(|h| tier_rank(*h));
            TimelineGroup {
                key: group_key(&name, campaign_id),
                campaign_id,
                name,
                worst_health: worst,
                bars,
            }
        })
        .collect();

    TimelineData {
        generated_at: now,
        range_start,
        range_end,
        total_count: flights.len(),
        counts,
        groups,
    }
}

fn tier_rank(tier: HealthTier) -> u8 {
    match tier {
        HealthTier::Green => 0,
        HealthTier::Amber => 1,
        HealthTier::Red => 2,
    }
}

/// Selection and expansion state of a timeline view.
///
/// Groups are addressed by [`TimelineGroup::key`]. Selecting a flight expands
/// the group that holds it; collapsing that group drops the selection, so the
/// list and the chart never disagree about what is highlighted.
#[derive(Debug, Clone, Default)]
pub struct TimelineState {
    selected: Option<FlightId>,
    expanded: HashSet<String>,
    flight_groups: BTreeMap<FlightId, String>,
}

impl TimelineState {
    /// State for `data`, with every group collapsed.
    pub fn new(data: &TimelineData) -> Self {
        let flight_groups = data
            .groups
            .iter()
            .flat_map(|g| g.bars.iter().map(move |b| (b.flight_id, g.key.clone())))
            .collect();
        Self {
            selected: None,
            expanded: HashSet::new(),
            flight_groups,
        }
    }

    pub fn selected(&self) -> Option<FlightId> {
        self.selected
    }

    pub fn is_expanded(&self, group: &str) -> bool {
        self.expanded.contains(group)
    }

    /// Select a flight, expanding its group. Unknown flights are ignored.
    pub fn select(&mut self, flight_id: FlightId) -> bool {
        let Some(group) = self.flight_groups.get(&flight_id) else {
            return false;
        };
        self.expanded.insert(group.clone());
        self.selected = Some(flight_id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn expand(&mut self, group: &str) {
        self.expanded.insert(group.to_string());
    }

    /// Collapse a group; clears the selection if it lives in that group.
    pub fn collapse(&mut self, group: &str) {
        self.expanded.remove(group);
        if let Some(selected) = self.selected {
            if self.flight_groups.get(&selected).map(String::as_str) == Some(group) {
                self.selected = None;
            }
        }
    }

    /// Flip a group's expansion; returns the new state.
    pub fn toggle(&mut self, group: &str) -> bool {
        if self.is_expanded(group) {
            self.collapse(group);
            false
        } else {
            self.expand(group);
            true
        }
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod timeline_tests;
