use chrono::NaiveDate;
use techcal::context::TestContext;
use techcal::feed::FeedService;
use techcal::model::{EventSource, EventType};
use techcal::store::EventStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_add_manual_requires_title_and_date() {
    let mut store = EventStore::new();

    assert!(
        store
            .add_manual("  ", "2024-07-25", "14:00", EventType::Seminar, "")
            .is_err()
    );
    assert!(
        store
            .add_manual("DevOps Seminar", "", "14:00", EventType::Seminar, "")
            .is_err()
    );
    assert!(store.events.is_empty());

    let event = store
        .add_manual(
            "DevOps Seminar",
            "2024-07-25",
            "14:00",
            EventType::Seminar,
            "CI/CD deep dive",
        )
        .unwrap();
    assert_eq!(event.source, EventSource::Manual);
    assert_eq!(event.confidence, None);
    assert_eq!(store.get(&event.uid).unwrap().description, "CI/CD deep dive");
}

#[test]
fn test_add_from_input_stores_parser_draft() {
    let mut store = EventStore::new();
    let today = date(2026, 10, 14);

    assert!(store.add_from_input("   ", EventSource::Voice, today).is_err());

    let event = store
        .add_from_input("AI Summit tomorrow at 2 PM", EventSource::Voice, today)
        .unwrap();
    assert_eq!(event.event_type, EventType::Conference);
    assert_eq!(event.date, "2026-10-15");
    assert_eq!(event.time, "14:00");
    assert_eq!(event.source, EventSource::Voice);
    assert!(event.confidence.is_some());
    assert_eq!(store.events.len(), 1);
}

#[test]
fn test_unique_ids_and_remove() {
    let mut store = EventStore::new();
    let a = store
        .add_manual("First talk", "2024-07-25", "10:00", EventType::Talk, "")
        .unwrap();
    let b = store
        .add_manual("First talk", "2024-07-25", "10:00", EventType::Talk, "")
        .unwrap();
    assert_ne!(a.uid, b.uid);

    let removed = store.remove(&a.uid).unwrap();
    assert_eq!(removed.uid, a.uid);
    assert!(store.get(&a.uid).is_none());
    assert!(store.remove(&a.uid).is_none());
    assert_eq!(store.events.len(), 1);
}

#[test]
fn test_day_and_month_queries() {
    let mut store = EventStore::new();
    store
        .add_manual("Late", "2024-07-25", "18:30", EventType::Meetup, "")
        .unwrap();
    store
        .add_manual("Early", "2024-07-25", "09:00", EventType::Talk, "")
        .unwrap();
    store
        .add_manual("Next month", "2024-08-01", "09:00", EventType::Talk, "")
        .unwrap();
    store
        .add_manual("Someday", "next monday", "09:00", EventType::Talk, "")
        .unwrap();

    let day: Vec<&str> = store
        .events_for_date(date(2024, 7, 25))
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(day, vec!["Early", "Late"]);

    assert_eq!(store.events_in_month(2024, 7).len(), 2);
    assert_eq!(store.events_in_month(2024, 8)[0].title, "Next month");
    assert_eq!(store.undated().len(), 1);
}

#[test]
fn test_add_from_feed_maps_type() {
    let feed = FeedService::with_mock_feed().unwrap();
    let mut store = EventStore::new();

    let workshop = store.add_from_feed(feed.by_id("gh1").unwrap());
    assert_eq!(workshop.event_type, EventType::Seminar);
    assert_eq!(workshop.source, EventSource::Feed);
    assert_eq!(workshop.location, "Online");
    assert!(workshop.is_online());

    let meetup = store.add_from_feed(feed.by_id("mu1").unwrap());
    assert_eq!(meetup.event_type, EventType::Meetup);
    assert_eq!(meetup.date, "2024-07-25");
}

#[test]
fn test_save_and_reload() {
    let ctx = TestContext::new();
    let mut store = EventStore::load(&ctx).unwrap();
    assert!(store.events.is_empty());

    store
        .add_from_input(
            "Rust meetup 07/15/2024 at 6:30 pm in Berlin Hall",
            EventSource::QuickInput,
            date(2026, 10, 14),
        )
        .unwrap();
    store.save(&ctx).unwrap();

    let reloaded = EventStore::load(&ctx).unwrap();
    assert_eq!(reloaded.events, store.events);
    assert_eq!(reloaded.events[0].location, "berlin hall");
}
