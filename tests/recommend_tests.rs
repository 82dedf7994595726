use techcal::feed::FeedService;
use techcal::recommend::{
    Interactions, SkillLevel, default_profile, personalized, score_event, update_profile,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_meetup_score_breakdown() {
    let feed = FeedService::with_mock_feed().unwrap();
    let profile = default_profile("u1");
    let rec = score_event(feed.by_id("mu1").unwrap(), &profile);

    assert_eq!(rec.event_id, "mu1");
    assert!(close(rec.score, 0.53), "score was {}", rec.score);
    assert!(close(rec.confidence, 0.79), "confidence was {}", rec.confidence);
    assert_eq!(
        rec.reasons,
        vec![
            "Matches your interests: JavaScript, React".to_string(),
            "Good skill level fit (beginner)".to_string(),
            "In-person event".to_string(),
            "Weekday event matches your preference".to_string(),
            "Evening time matches your preference".to_string(),
        ]
    );
}

#[test]
fn test_online_preference_and_favorite_organizer() {
    let feed = FeedService::with_mock_feed().unwrap();
    let mut profile = default_profile("u1");
    profile.prefer_online = true;
    profile.favorite_organizers = vec!["GitHub Education".to_string()];

    let rec = score_event(feed.by_id("gh1").unwrap(), &profile);
    assert!(
        rec.reasons
            .contains(&"Online event matches your preference".to_string())
    );
    assert!(
        rec.reasons
            .contains(&"Organized by GitHub Education (your favorite organizer)".to_string())
    );
    assert!(
        rec.reasons
            .contains(&"Matches your preferred event type: workshop".to_string())
    );

    // An in-person event now reads as a mismatch.
    let rec = score_event(feed.by_id("loc1").unwrap(), &profile);
    assert!(
        rec.reasons
            .contains(&"In-person event (you prefer online)".to_string())
    );
    assert!(
        rec.reasons
            .contains(&"Good skill level fit (advanced)".to_string())
    );
}

#[test]
fn test_preferred_location_match() {
    let feed = FeedService::with_mock_feed().unwrap();
    let mut profile = default_profile("u1");
    profile.location = Some("seattle".to_string());

    let rec = score_event(feed.by_id("mu1").unwrap(), &profile);
    assert!(
        rec.reasons
            .contains(&"Event is in your preferred location".to_string())
    );
    assert!(close(rec.score, 0.57));
}

#[test]
fn test_scores_are_bounded() {
    let feed = FeedService::with_mock_feed().unwrap();
    let mut profile = default_profile("u1");
    profile.interests.clear();

    let mut bare = feed.events()[0].clone();
    bare.tags.clear();
    bare.time = "whenever".to_string();
    bare.date = "tbd".to_string();

    let rec = score_event(&bare, &profile);
    assert!(rec.score.is_finite());
    assert!(rec.score >= 0.0 && rec.score <= 1.0);
    assert!(rec.confidence >= 0.0 && rec.confidence <= 1.0);

    for event in feed.events() {
        let rec = score_event(event, &default_profile("u1"));
        assert!(rec.score <= 1.0 && rec.confidence <= 1.0);
    }
}

#[test]
fn test_personalized_ordering_and_limit() {
    let feed = FeedService::with_mock_feed().unwrap();
    let profile = default_profile("u1");

    let ranked = personalized(feed.events(), &profile, 10);
    assert_eq!(ranked.len(), 7);
    for pair in ranked.windows(2) {
        let (a, b) = (&pair[0].1, &pair[1].1);
        let (ba, bb) = ((a.score * 10.0).floor(), (b.score * 10.0).floor());
        assert!(ba >= bb);
        if ba == bb {
            assert!(a.confidence >= b.confidence);
        }
    }

    assert_eq!(personalized(feed.events(), &profile, 3).len(), 3);
    assert!(personalized(&[], &profile, 3).is_empty());
}

#[test]
fn test_update_profile_dedupes_history() {
    let mut profile = default_profile("u1");
    profile.past_events = vec!["dev1".to_string()];

    let updated = update_profile(
        &profile,
        &Interactions {
            viewed_events: vec!["he1".to_string(), "dev1".to_string(), "he1".to_string()],
            ..Default::default()
        },
    );
    assert_eq!(updated.past_events, vec!["dev1", "he1"]);
    assert_eq!(updated.interests, profile.interests);
}

#[test]
fn test_default_profile() {
    let profile = default_profile("abc");
    assert_eq!(profile.id, "abc");
    assert_eq!(
        profile.interests,
        vec!["JavaScript", "React", "AI", "Web Development"]
    );
    assert_eq!(profile.skill_level, SkillLevel::Intermediate);
    assert_eq!(profile.preferred_event_types.len(), 3);
    assert!(!profile.prefer_online);
    assert!(!profile.time_preferences.mornings);
    assert!(profile.time_preferences.evenings);
}
