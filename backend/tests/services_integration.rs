//! Service-layer integration tests against the in-memory store.
//!
//! These walk a small media plan through storage, delivery ingestion,
//! pacing and the timeline, the way the HTTP handlers do.

use adops_pacing::db::repositories::LocalRepository;
use adops_pacing::db::services;
use adops_pacing::models::{
    date_start, CampaignId, DeliveryRecord, FlightId, FlightSpec, GoalType, HealthTier,
    PricingModel,
};
use adops_pacing::services::{PacingCache, TimelineState};
use chrono::NaiveDate;

fn d(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn delivery(flight: FlightId, date: NaiveDate) -> DeliveryRecord {
    DeliveryRecord::empty(flight, date)
}

/// Three flights across two campaigns plus one unassigned.
async fn seed(repo: &LocalRepository, cache: &PacingCache) -> Vec<FlightId> {
    let spring = CampaignId::new(1);
    let plan = [
        FlightSpec::new(FlightId::new(0), PricingModel::Cpm)
            .with_name("Display")
            .with_campaign(spring, "Spring")
            .with_goal(GoalType::Spend, 30_000.0)
            .with_dates(Some(d(3, 1)), Some(d(3, 31))),
        FlightSpec::new(FlightId::new(0), PricingModel::Cpc)
            .with_name("Search")
            .with_campaign(spring, "Spring")
            .with_goal(GoalType::Clicks, 2_000.0)
            .with_dates(Some(d(3, 1)), Some(d(3, 31))),
        FlightSpec::new(FlightId::new(0), PricingModel::Flat)
            .with_name("Sponsorship")
            .with_rate(5_000.0)
            .with_dates(Some(d(2, 1)), None)
            .always_on(),
    ];

    let mut ids = Vec::new();
    for flight in &plan {
        ids.push(services::store_flight(repo, flight).await.unwrap().id);
    }

    let mut records = Vec::new();
    for day in 1..=10 {
        records.push(DeliveryRecord {
            impressions: 1_000.0,
            ..delivery(ids[0], d(3, day))
        });
        records.push(DeliveryRecord {
            clicks: 100.0,
            ..delivery(ids[1], d(3, day))
        });
    }
    records.push(DeliveryRecord {
        spend: 4_500.0,
        ..delivery(ids[2], d(2, 15))
    });
    services::record_delivery(repo, cache, &records).await.unwrap();
    ids
}

#[tokio::test]
async fn media_plan_pacing_overview() {
    let repo = LocalRepository::new();
    let cache = PacingCache::default();
    let ids = seed(&repo, &cache).await;
    let now = date_start(d(3, 11));

    let overview = services::list_pacing(&repo, now).await.unwrap();
    assert_eq!(overview.total, 3);

    // 10 of 30 days elapsed: expected 10_000, delivered 10_000.
    let display = &overview.flights[0];
    assert_eq!(display.flight_id, ids[0]);
    assert_eq!(display.pacing.expected, 10_000.0);
    assert_eq!(display.health(), HealthTier::Green);

    // 1_000 of 2_000 clicks.
    assert_eq!(overview.flights[1].pacing.percentage, 50.0);
    assert_eq!(overview.flights[1].health(), HealthTier::Red);

    // 4_500 of a 5_000 flat fee.
    assert_eq!(overview.flights[2].pacing.percentage, 90.0);
    assert_eq!(overview.flights[2].health(), HealthTier::Amber);
}

#[tokio::test]
async fn timeline_and_selection_flow() {
    let repo = LocalRepository::new();
    let cache = PacingCache::default();
    let ids = seed(&repo, &cache).await;

    let data = services::get_timeline(&repo, date_start(d(3, 11)))
        .await
        .unwrap();
    assert_eq!(data.total_count, 3);
    assert_eq!(data.counts.total(), 3);
    assert_eq!(data.range_start, Some(d(2, 1)));
    assert_eq!(data.range_end, Some(d(3, 31)));

    let spring = data.groups.iter().find(|g| g.name == "Spring").unwrap();
    assert_eq!(spring.bars.len(), 2);
    assert_eq!(spring.worst_health, Some(HealthTier::Red));

    let unassigned = data.groups.iter().find(|g| g.name == "Unassigned").unwrap();
    assert!(unassigned.bars[0].open_ended);

    let mut state = TimelineState::new(&data);
    assert!(state.select(ids[1]));
    assert!(state.is_expanded(&spring.key));
    state.collapse(&spring.key);
    assert_eq!(state.selected(), None);
    assert!(!state.select(FlightId::new(999)));
}

#[tokio::test]
async fn late_delivery_correction_changes_tier() {
    let repo = LocalRepository::new();
    let cache = PacingCache::new(3600);
    let ids = seed(&repo, &cache).await;
    let now = date_start(d(3, 11));

    let before = services::get_flight_pacing_cached(&repo, &cache, ids[2], now)
        .await
        .unwrap();
    assert_eq!(before.health(), HealthTier::Amber);

    let correction = DeliveryRecord {
        spend: 5_000.0,
        ..delivery(ids[2], d(2, 15))
    };
    services::record_delivery(&repo, &cache, &[correction])
        .await
        .unwrap();

    let after = services::get_flight_pacing_cached(&repo, &cache, ids[2], now)
        .await
        .unwrap();
    assert_eq!(after.health(), HealthTier::Green);
    assert_eq!(
        services::get_flight_delivery(&repo, ids[2]).await.unwrap().len(),
        1
    );
}
