#[cfg(test)]
mod tests {
    use crate::models::*;
    use crate::services::timeline::*;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn spend(flight: i64, date: NaiveDate, amount: f64) -> DeliveryRecord {
        DeliveryRecord {
            spend: amount,
            ..DeliveryRecord::empty(FlightId::new(flight), date)
        }
    }

    fn fixture() -> (Vec<FlightSpec>, Vec<DeliveryRecord>) {
        let flights = vec![
            FlightSpec::new(FlightId::new(1), PricingModel::Flat)
                .with_name("Spring homepage")
                .with_campaign(CampaignId::new(10), "Spring")
                .with_rate(1000.0)
                .with_dates(Some(d(3, 10)), Some(d(4, 10))),
            FlightSpec::new(FlightId::new(2), PricingModel::Flat)
                .with_name("Spring sports")
                .with_campaign(CampaignId::new(10), "Spring")
                .with_rate(1000.0)
                .with_dates(Some(d(3, 1)), Some(d(3, 31))),
            FlightSpec::new(FlightId::new(3), PricingModel::Flat)
                .with_name("Newsletter")
                .with_rate(500.0)
                .with_dates(Some(d(2, 1)), None)
                .always_on(),
            FlightSpec::new(FlightId::new(4), PricingModel::Cpc)
                .with_name("Autumn search")
                .with_campaign(CampaignId::new(20), "Autumn"),
        ];
        let records = vec![
            spend(1, d(3, 11), 1200.0),
            spend(2, d(3, 2), 850.0),
            spend(3, d(2, 2), 100.0),
        ];
        (flights, records)
    }

    #[test]
    fn test_bar_fill_clamps() {
        assert_eq!(bar_fill(-5.0), 0.0);
        assert_eq!(bar_fill(42.5), 42.5);
        assert_eq!(bar_fill(180.0), 100.0);
        assert_eq!(bar_fill(f64::NAN), 0.0);
    }

    #[test]
    fn test_groups_sorted_by_name_with_unassigned() {
        let (flights, records) = fixture();
        let data = build_timeline(&flights, &records, date_start(d(3, 20)));

        let names: Vec<_> = data.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Autumn", "Spring", UNASSIGNED_GROUP]);
        assert_eq!(data.total_count, 4);
    }

    #[test]
    fn test_bars_ordered_by_start_and_colored_by_health() {
        let (flights, records) = fixture();
        let data = build_timeline(&flights, &records, date_start(d(3, 20)));

        let spring = data.groups.iter().find(|g| g.name == "Spring").unwrap();
        let ids: Vec<_> = spring.bars.iter().map(|b| b.flight_id.value()).collect();
        assert_eq!(ids, vec![2, 1]);

        let overdelivered = &spring.bars[1];
        assert_eq!(overdelivered.health, HealthTier::Green);
        assert_eq!(overdelivered.fill, 100.0);
        assert_eq!(overdelivered.color, HealthTier::Green.color());

        let at_risk = &spring.bars[0];
        assert_eq!(at_risk.health, HealthTier::Amber);
        assert!((at_risk.fill - 85.0).abs() < 1e-9);
        assert_eq!(spring.worst_health, Some(HealthTier::Amber));
    }

    #[test]
    fn test_counts_include_unknown_flights() {
        let (flights, records) = fixture();
        let data = build_timeline(&flights, &records, date_start(d(3, 20)));
        // 1 green (flight 1), 2 amber (flight 2 at 85%, flight 4 with no delivery), 1 red (flight 3 at 20%)
        assert_eq!(data.counts.green, 1);
        assert_eq!(data.counts.amber, 2);
        assert_eq!(data.counts.red, 1);
        assert_eq!(data.counts.total(), data.total_count);
    }

    #[test]
    fn test_range_extends_to_now_for_open_ended() {
        let (flights, records) = fixture();
        let data = build_timeline(&flights, &records, date_start(d(5, 1)));
        assert_eq!(data.range_start, Some(d(2, 1)));
        assert_eq!(data.range_end, Some(d(5, 1)));

        let newsletter = data
            .groups
            .iter()
            .flat_map(|g| g.bars.iter())
            .find(|b| b.flight_id == FlightId::new(3))
            .unwrap();
        assert!(newsletter.open_ended);
        assert_eq!(newsletter.end_date, None);
    }

    #[test]
    fn test_empty_timeline() {
        let data = build_timeline(&[], &[], date_start(d(1, 1)));
        assert!(data.groups.is_empty());
        assert_eq!(data.range_start, None);
        assert_eq!(data.range_end, None);
        assert_eq!(data.counts.total(), 0);
    }

    fn spring_key() -> String {
        group_key("Spring", Some(CampaignId::new(10)))
    }

    #[test]
    fn test_group_keys_are_stable() {
        let (flights, records) = fixture();
        let data = build_timeline(&flights, &records, date_start(d(3, 20)));
        let keys: Vec<_> = data.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["20:Autumn", "10:Spring", "-:Unassigned"]);
    }

    #[test]
    fn test_select_expands_group() {
        let (flights, records) = fixture();
        let data = build_timeline(&flights, &records, date_start(d(3, 20)));
        let mut state = TimelineState::new(&data);

        assert!(!state.is_expanded(&spring_key()));
        assert!(state.select(FlightId::new(1)));
        assert_eq!(state.selected(), Some(FlightId::new(1)));
        assert!(state.is_expanded(&spring_key()));
    }

    #[test]
    fn test_select_unknown_flight_ignored() {
        let (flights, records) = fixture();
        let data = build_timeline(&flights, &records, date_start(d(3, 20)));
        let mut state = TimelineState::new(&data);
        assert!(!state.select(FlightId::new(99)));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_collapse_clears_selection_in_group_only() {
        let (flights, records) = fixture();
        let data = build_timeline(&flights, &records, date_start(d(3, 20)));
        let mut state = TimelineState::new(&data);

        state.select(FlightId::new(1));
        state.collapse(&group_key("Autumn", Some(CampaignId::new(20))));
        assert_eq!(state.selected(), Some(FlightId::new(1)));

        assert!(!state.toggle(&spring_key()));
        assert_eq!(state.selected(), None);
        assert!(state.toggle(&spring_key()));
        assert!(state.is_expanded(&spring_key()));
    }

    #[test]
    fn test_same_named_campaigns_keep_separate_state() {
        let flights = vec![
            FlightSpec::new(FlightId::new(1), PricingModel::Flat)
                .with_campaign(CampaignId::new(1), "Spring")
                .with_rate(100.0),
            FlightSpec::new(FlightId::new(2), PricingModel::Flat)
                .with_campaign(CampaignId::new(2), "Spring")
                .with_rate(100.0),
        ];
        let data = build_timeline(&flights, &[], date_start(d(3, 20)));
        assert_eq!(data.groups.len(), 2);
        assert_ne!(data.groups[0].key, data.groups[1].key);

        let first = group_key("Spring", Some(CampaignId::new(1)));
        let second = group_key("Spring", Some(CampaignId::new(2)));
        let mut state = TimelineState::new(&data);
        assert!(state.select(FlightId::new(1)));

        state.collapse(&second);
        assert_eq!(state.selected(), Some(FlightId::new(1)));
        assert!(state.is_expanded(&first));
        assert!(!state.is_expanded(&second));
    }

    #[test]
    fn test_campaign_named_unassigned_is_its_own_group() {
        let flights = vec![
            FlightSpec::new(FlightId::new(1), PricingModel::Flat)
                .with_campaign(CampaignId::new(5), UNASSIGNED_GROUP)
                .with_rate(100.0),
            FlightSpec::new(FlightId::new(2), PricingModel::Flat).with_rate(100.0),
        ];
        let data = build_timeline(&flights, &[], date_start(d(3, 20)));
        assert_eq!(data.groups.len(), 2);

        let mut state = TimelineState::new(&data);
        assert!(state.select(FlightId::new(2)));
        state.collapse(&group_key(UNASSIGNED_GROUP, Some(CampaignId::new(5))));
        assert_eq!(state.selected(), Some(FlightId::new(2)));
        assert!(state.is_expanded(&group_key(UNASSIGNED_GROUP, None)));
    }
}
