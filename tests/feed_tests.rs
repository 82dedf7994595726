use chrono::NaiveDate;
use techcal::feed::{DateRange, Difficulty, EventFilters, FeedEventType, FeedService, Platform};

fn ids(events: &[techcal::feed::FeedEvent]) -> Vec<&str> {
    events.iter().map(|e| e.id.as_str()).collect()
}

fn feed() -> FeedService {
    FeedService::with_mock_feed().unwrap()
}

#[test]
fn test_unfiltered_feed_is_date_ordered() {
    let feed = feed();
    assert_eq!(feed.events().len(), 7);
    assert_eq!(
        ids(&feed.event_feed(&EventFilters::default())),
        vec!["mu1", "web1", "he1", "gh1", "eb1", "loc1", "dev1"]
    );
}

#[test]
fn test_filters_combine() {
    let feed = feed();

    let online = EventFilters {
        is_online: Some(true),
        ..Default::default()
    };
    assert_eq!(ids(&feed.event_feed(&online)), vec!["web1", "he1", "gh1"]);

    let hackathons = EventFilters {
        types: vec![FeedEventType::Hackathon],
        ..Default::default()
    };
    assert_eq!(ids(&feed.event_feed(&hackathons)), vec!["he1", "dev1"]);

    let online_hackathons = EventFilters {
        types: vec![FeedEventType::Hackathon],
        is_online: Some(true),
        ..Default::default()
    };
    assert_eq!(ids(&feed.event_feed(&online_hackathons)), vec!["he1"]);

    let paid = EventFilters {
        is_free: Some(false),
        ..Default::default()
    };
    assert_eq!(ids(&feed.event_feed(&paid)), vec!["eb1", "loc1"]);

    let advanced_local = EventFilters {
        difficulties: vec![Difficulty::Advanced],
        platforms: vec![Platform::Local],
        ..Default::default()
    };
    assert_eq!(ids(&feed.event_feed(&advanced_local)), vec!["loc1"]);
}

#[test]
fn test_tag_location_and_date_filters() {
    let feed = feed();

    let script = EventFilters {
        tags: vec!["SCRIPT".to_string()],
        ..Default::default()
    };
    assert_eq!(ids(&feed.event_feed(&script)), vec!["mu1", "he1"]);

    let ny = EventFilters {
        location: Some("ny".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&feed.event_feed(&ny)), vec!["loc1"]);

    let window = EventFilters {
        date_range: Some(DateRange {
            start: NaiveDate::from_ymd_opt(2024, 7, 25).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 7, 28).unwrap(),
        }),
        ..Default::default()
    };
    assert_eq!(ids(&feed.event_feed(&window)), vec!["mu1", "web1", "he1"]);
}

#[test]
fn test_trending_and_recommended() {
    let feed = feed();
    assert_eq!(
        ids(&feed.trending()),
        vec!["eb1", "dev1", "gh1", "he1", "loc1"]
    );
    assert_eq!(
        ids(&feed.recommended(&["react".to_string()])),
        vec!["he1", "mu1"]
    );
    assert!(feed.recommended(&[]).is_empty());
}

#[test]
fn test_catalog_helpers() {
    let feed = feed();

    let tags = feed.all_tags();
    assert_eq!(tags.len(), 31);
    assert_eq!(tags[0], "AI");
    assert!(tags.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(
        feed.all_platforms(),
        vec![
            Platform::Devpost,
            Platform::Eventbrite,
            Platform::Github,
            Platform::Hackerearth,
            Platform::Local,
            Platform::Meetup,
        ]
    );

    assert_eq!(feed.by_id("dev1").unwrap().prize.as_deref(), Some("$50,000"));
    assert!(feed.by_id("nope").is_none());
}

#[test]
fn test_undated_events_sort_last() {
    let mut events = feed().events().to_vec();
    let meetup = events.iter_mut().find(|e| e.id == "mu1").unwrap();
    meetup.date = "soon".to_string();
    let service = FeedService::new(events);
    let ordered = service.event_feed(&EventFilters::default());
    assert_eq!(ordered.last().unwrap().id, "mu1");
    assert_eq!(ordered[0].id, "web1");
}
