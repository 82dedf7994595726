use chrono::NaiveDate;
use techcal::model::parser::{
    DEFAULT_TIME, UNKNOWN_LOCATION, classify_event_type, extract_dates, extract_location,
    extract_times, extract_title, format_date, format_time,
};
use strum::IntoEnumIterator;
use techcal::model::{EventType, parse_event_input, parse_event_input_at};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_summit_tomorrow_afternoon() {
    let parsed = parse_event_input_at("AI Summit tomorrow at 2 PM", today());

    assert_eq!(parsed.event_type, EventType::Conference);
    assert_eq!(parsed.date, "2026-10-15");
    assert_eq!(parsed.time, "14:00");
    assert_eq!(parsed.location, UNKNOWN_LOCATION);
    assert_eq!(parsed.title, "AI Summit tomorrow");
    assert!(close(parsed.confidence, 1.0));
    assert_eq!(
        parsed.description,
        "Auto-created conference focusing on AI from: \"AI Summit tomorrow at 2 PM\" (High confidence: 95%)"
    );
}

#[test]
fn test_online_workshop_keeps_relative_date() {
    let input = "React workshop next Monday morning online";
    let parsed = parse_event_input_at(input, today());

    assert_eq!(parsed.event_type, EventType::Seminar);
    assert_eq!(parsed.date, "next monday");
    assert_eq!(parsed.time, "09:00");
    assert_eq!(parsed.location, "online");
    assert_eq!(parsed.title, input);
    assert!(close(parsed.confidence, 1.0));
    assert!(parsed.description.contains("focusing on REACT"));
    assert!(parsed.description.ends_with("(High confidence: 90%)"));
}

#[test]
fn test_empty_input_defaults() {
    let parsed = parse_event_input_at("", today());

    assert_eq!(parsed.event_type, EventType::Hackathon);
    assert!(close(parsed.confidence, 0.3));
    assert_eq!(parsed.date, "");
    assert_eq!(parsed.time, DEFAULT_TIME);
    assert_eq!(parsed.location, "TBD");
    assert_eq!(parsed.title, "");
    assert_eq!(parsed.description, "Auto-created hackathon from: \"\"");
    assert!(parsed.needs_review(0.6));
}

#[test]
fn test_tech_boosts_stack() {
    let parsed = parse_event_input_at("AI hackathon with blockchain integration", today());
    assert_eq!(parsed.event_type, EventType::Hackathon);
    assert!(parsed.description.contains("focusing on AI, BLOCKCHAIN"));
    assert!(close(parsed.confidence, 1.0));
    assert_eq!(parsed.location, "TBD");

    // Below the cap the two boosts are visible.
    let m = classify_event_type("ai blockchain talk");
    assert_eq!(m.event_type, EventType::Talk);
    assert!(close(m.confidence, 0.9));
}

#[test]
fn test_iso_date_wins() {
    let parsed = parse_event_input_at("2024-07-15 conference", today());
    assert_eq!(parsed.date, "2024-07-15");
    assert_eq!(parsed.event_type, EventType::Conference);
    assert!(close(parsed.confidence, 0.95));
    assert_eq!(parsed.time, "09:00");
}

#[test]
fn test_full_sentence_with_place() {
    let parsed = parse_event_input_at(
        "Rust meetup 07/15/2024 at 6:30 pm in Berlin Hall",
        today(),
    );
    assert_eq!(parsed.event_type, EventType::Meetup);
    assert_eq!(parsed.date, "2024-07-15");
    assert_eq!(parsed.time, "18:30");
    assert_eq!(parsed.location, "berlin hall");
    assert_eq!(parsed.title, "Rust meetup 07/15/2024");
    assert!(close(parsed.confidence, 1.0));
}

#[test]
fn test_short_month_uses_reference_year() {
    let parsed = parse_event_input_at("Hack night on Jul 4", today());
    assert_eq!(parsed.title, "Hack night");
    assert_eq!(parsed.date, "2026-07-04");
    assert_eq!(parsed.time, "20:00");
    assert_eq!(parsed.location, "TBD");
}

#[test]
fn test_low_confidence_draft() {
    let parsed = parse_event_input_at("Meeting in Vienna", today());
    assert_eq!(parsed.event_type, EventType::Hackathon);
    assert_eq!(parsed.location, "vienna");
    assert_eq!(parsed.title, "Meeting");
    assert!(close(parsed.confidence, 0.35));
    assert!(parsed.needs_review(0.6));
    assert_eq!(parsed.confidence_percent(), 35);
}

#[test]
fn test_classifier_tie_break_and_fallback() {
    // Hackathon outranks conference when both appear.
    assert_eq!(
        classify_event_type("hackathon at the conference").event_type,
        EventType::Hackathon
    );
    assert_eq!(
        classify_event_type("conference keynote").event_type,
        EventType::Conference
    );
    let fallback = classify_event_type("lunch with bob");
    assert_eq!(fallback.event_type, EventType::Hackathon);
    assert!(close(fallback.confidence, 0.3));
}

#[test]
fn test_short_title_is_synthesized() {
    assert_eq!(
        extract_title("AI - summit next week", EventType::Conference),
        "AI conference"
    );
    assert_eq!(extract_title("Demo", EventType::Talk), "Demo");
}

#[test]
fn test_date_extraction_order() {
    let dates = extract_dates("tomorrow or 2024-07-15");
    assert_eq!(dates, vec!["2024-07-15".to_string(), "tomorrow".to_string()]);
}

#[test]
fn test_format_date_variants() {
    let t = today();
    assert_eq!(format_date("today", t), "2026-10-14");
    assert_eq!(format_date("7/15/24", t), "2024-07-15");
    assert_eq!(format_date("25/12/2024", t), "2024-12-25");
    assert_eq!(format_date("july 15, 2024", t), "2024-07-15");
    assert_eq!(format_date("dec 3", t), "2026-12-03");
    assert_eq!(format_date("friday", t), "friday");
    assert_eq!(format_date("next month", t), "next month");
    assert_eq!(format_date("2024-02-30", t), "2024-02-30");
}

#[test]
fn test_format_time_variants() {
    assert_eq!(format_time("12 am"), "00:00");
    assert_eq!(format_time("12pm"), "12:00");
    assert_eq!(format_time("9:05 am"), "09:05");
    assert_eq!(format_time("7:45"), "07:45");
    assert_eq!(format_time("afternoon"), "14:00");
    assert_eq!(format_time("evening"), "18:00");
    assert_eq!(format_time("13 pm"), "13 pm");
    assert_eq!(format_time("25:00"), "25:00");
}

#[test]
fn test_online_keywords_need_word_boundaries() {
    assert_eq!(extract_location("team meeting in lisbon"), "lisbon");
    assert_eq!(extract_location("talk on zoom"), "zoom");
    assert_eq!(extract_location("@ moscone center"), "moscone center");
    assert_eq!(extract_location("nothing here"), "");
}

#[test]
fn test_place_names_containing_date_or_time_words() {
    let cases = [
        ("hackathon at knight hall", "knight hall"),
        ("workshop at midnight labs", "midnight labs"),
        ("talk at the morningside campus", "the morningside campus"),
        ("meetup at tomorrowland stage", "tomorrowland stage"),
        ("rust meetup in berlin", "berlin"),
    ];
    for (input, expected) in cases {
        let parsed = parse_event_input_at(input, today());
        assert_eq!(parsed.location, expected, "input: {input}");
    }
}

#[test]
fn test_place_is_still_cut_at_whole_word_dates() {
    assert_eq!(
        extract_location("hackathon at knight hall tomorrow night"),
        "knight hall"
    );
    assert_eq!(
        extract_location("meetup at the pier monday evening"),
        "the pier"
    );
}

fn is_hh_mm(time: &str) -> bool {
    let bytes = time.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}

#[test]
fn test_arbitrary_input_never_panics() {
    let long = "a".repeat(5000);
    let inputs = [
        "",
        "   ",
        "@@@",
        "at at at",
        "in 12:99 pm",
        "13 pm at the knight hall",
        "🎉 party at 🏠",
        "99/99/9999 and 00:00",
        "Ünïcödé conference in Zürich",
        "ß tomorrow at ŉight",
        long.as_str(),
    ];
    for input in inputs {
        let parsed = parse_event_input(input);
        assert!(parsed.confidence >= 0.3 - 1e-9 && parsed.confidence <= 1.0);
        assert!(!parsed.location.is_empty());
        assert!(EventType::iter().any(|t| t == parsed.event_type));

        // Either normalized HH:MM or the raw token that failed to normalize.
        let lowered = input.to_lowercase();
        let times = extract_times(lowered.trim());
        match times.first() {
            Some(raw) if !is_hh_mm(&parsed.time) => assert_eq!(&parsed.time, raw),
            Some(_) => {}
            None => assert_eq!(parsed.time, DEFAULT_TIME),
        }
        assert!(is_hh_mm(&parsed.time) || !times.is_empty(), "input: {input}");
    }
}
