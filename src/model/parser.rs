// File: ./src/model/parser.rs
//! Free-text event parsing.
//!
//! Turns an unstructured sentence such as `"AI Summit tomorrow at 2 PM"` into
//! a [`ParsedEvent`]. Every stage has a fallback, so parsing never fails: a
//! weak input yields a low-confidence draft rather than an error.
use crate::model::keywords::{
    EVENT_TYPE_KEYWORDS, FALLBACK_CONFIDENCE, FALLBACK_TYPE, MONTH_ABBREVIATIONS, MONTH_NAMES,
    ONLINE_KEYWORDS, TECH_BOOST, TECH_KEYWORDS, WEEKDAY_NAMES, month_number,
};
use crate::model::{EventType, ParsedEvent};
use chrono::{Datelike, Duration, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_TIME: &str = "09:00";
pub const UNKNOWN_LOCATION: &str = "TBD";

const TITLE_SEPARATORS: &[&str] = &[" on ", " at ", " in ", " - ", " | "];
const MIN_TITLE_CHARS: usize = 5;
const HIGH_CONFIDENCE: f64 = 0.8;

const DATE_BOOST: f64 = 0.1;
const TIME_BOOST: f64 = 0.1;
const LOCATION_BOOST: f64 = 0.05;

// Trailing words left behind when a place phrase is cut before a date/time.
const DANGLING_CONNECTIVES: &[&str] = &["at", "in", "on", "from", "by", "@"];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// Date pattern families, highest priority first.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let next_weekdays: Vec<String> = WEEKDAY_NAMES
        .iter()
        .map(|d| format!(r"next\s+{}", d))
        .collect();
    vec![
        // ISO: 2024-07-15
        compile(r"\d{4}-\d{1,2}-\d{1,2}"),
        // US: 07/15/2024 or 7/15/24
        compile(r"\d{1,2}/\d{1,2}/\d{2,4}"),
        // European: 15/07/2024
        compile(r"\d{1,2}/\d{1,2}/\d{4}"),
        // July 15, 2024
        compile(&format!(
            r"(?:{})\s+\d{{1,2}},?\s+\d{{4}}",
            MONTH_NAMES.join("|")
        )),
        // Jul 15
        compile(&format!(r"(?:{})\s+\d{{1,2}}", MONTH_ABBREVIATIONS.join("|"))),
        compile(r"today|tomorrow|next\s+week|next\s+month|this\s+week|this\s+month"),
        compile(&format!(
            "{}|{}",
            WEEKDAY_NAMES.join("|"),
            next_weekdays.join("|")
        )),
    ]
});

static TWENTY_FOUR_HOUR: Lazy<Regex> = Lazy::new(|| compile(r"\d{1,2}:\d{2}"));
static TWELVE_HOUR: Lazy<Regex> = Lazy::new(|| compile(r"\b\d{1,2}(?::\d{2})?\s*[ap]m\b"));
static NATURAL_TIME: Lazy<Regex> = Lazy::new(|| compile(r"morning|afternoon|evening|night"));
static MERIDIEM_SUFFIX: Lazy<Regex> = Lazy::new(|| compile(r"^\s*[ap]m\b"));

static ISO_PARTS: Lazy<Regex> = Lazy::new(|| compile(r"^(\d{4})-(\d{1,2})-(\d{1,2})$"));
static SLASH_PARTS: Lazy<Regex> = Lazy::new(|| compile(r"^(\d{1,2})/(\d{1,2})/(\d{2}|\d{4})$"));
static LONG_MONTH_PARTS: Lazy<Regex> =
    Lazy::new(|| compile(r"^([a-z]+)\s+(\d{1,2}),?\s+(\d{4})$"));
static SHORT_MONTH_PARTS: Lazy<Regex> = Lazy::new(|| compile(r"^([a-z]+)\s+(\d{1,2})$"));
static TWELVE_HOUR_PARTS: Lazy<Regex> =
    Lazy::new(|| compile(r"^(\d{1,2})(?::(\d{2}))?\s*([ap]m)$"));
static TWENTY_FOUR_HOUR_PARTS: Lazy<Regex> = Lazy::new(|| compile(r"^(\d{1,2}):(\d{2})$"));

static ONLINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"\b(?:{})\b", ONLINE_KEYWORDS.join("|"))));
static PLACE_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"\b(?:at|in)\s+[\w\s,]+|@\s*[\w\s,]+"));
static PLACE_PREFIX: Lazy<Regex> = Lazy::new(|| compile(r"^(?:at|in|@)\s*"));

/// Classified category plus the confidence backing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeMatch {
    pub event_type: EventType,
    pub confidence: f64,
}

/// Parses free text relative to today's local date.
pub fn parse_event_input(input: &str) -> ParsedEvent {
    parse_event_input_at(input, Local::now().date_naive())
}

/// Parses free text, resolving relative dates against `today`.
pub fn parse_event_input_at(input: &str, today: NaiveDate) -> ParsedEvent {
    let lowered = input.to_lowercase();
    let text = lowered.trim();

    let type_match = classify_event_type(text);
    let dates = extract_dates(text);
    let times = extract_times(text);
    let location = extract_location(text);
    let title = extract_title(input, type_match.event_type);
    let description = generate_description(input, &type_match);
    let confidence = calculate_confidence(&type_match, &dates, &times, &location);

    ParsedEvent {
        title: if title.is_empty() {
            input.to_string()
        } else {
            title
        },
        event_type: type_match.event_type,
        date: dates
            .first()
            .map(|d| format_date(d, today))
            .unwrap_or_default(),
        time: times
            .first()
            .map(|t| format_time(t))
            .unwrap_or_else(|| DEFAULT_TIME.to_string()),
        description,
        location: if location.is_empty() {
            UNKNOWN_LOCATION.to_string()
        } else {
            location
        },
        confidence,
    }
}

/// Picks the highest-confidence category whose keyword occurs in `text`.
///
/// Ties keep the earlier table entry. Each tech category with a hit adds
/// its own boost, so several topics stack (capped at 1.0).
pub fn classify_event_type(text: &str) -> TypeMatch {
    let mut best = TypeMatch {
        event_type: FALLBACK_TYPE,
        confidence: FALLBACK_CONFIDENCE,
    };

    for entry in EVENT_TYPE_KEYWORDS {
        if entry.keywords.iter().any(|kw| text.contains(kw)) && entry.confidence > best.confidence
        {
            best = TypeMatch {
                event_type: entry.event_type,
                confidence: entry.confidence,
            };
        }
    }

    for category in TECH_KEYWORDS {
        if category.first_match(text).is_some() {
            best.confidence = (best.confidence + TECH_BOOST).min(1.0);
        }
    }

    best
}

/// All date-like substrings, grouped by pattern family in priority order.
pub fn extract_dates(text: &str) -> Vec<String> {
    DATE_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}

/// All time-like substrings: 24-hour, then 12-hour, then natural words.
pub fn extract_times(text: &str) -> Vec<String> {
    let mut times: Vec<String> = TWENTY_FOUR_HOUR
        .find_iter(text)
        .filter(|m| !MERIDIEM_SUFFIX.is_match(&text[m.end()..]))
        .map(|m| m.as_str().to_string())
        .collect();
    times.extend(TWELVE_HOUR.find_iter(text).map(|m| m.as_str().to_string()));
    times.extend(NATURAL_TIME.find_iter(text).map(|m| m.as_str().to_string()));
    times
}

/// Online keyword, else the first usable `at …` / `in …` / `@…` phrase.
/// Returns "" when nothing qualifies.
///
/// Online keywords only count as whole words, unlike a plain substring
/// scan: "meetup" is not "meet", and "meeting in lisbon" gives "lisbon".
pub fn extract_location(text: &str) -> String {
    if let Some(m) = ONLINE_PATTERN.find(text) {
        return m.as_str().trim().to_string();
    }

    let mut pos = 0;
    while pos < text.len() {
        let Some(m) = PLACE_PATTERN.find_at(text, pos) else {
            break;
        };
        let place = place_body(text, m.start(), m.end());
        if !place.is_empty() {
            return place;
        }
        // Step one character past this start and retry.
        pos = m.start()
            + text[m.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }
    String::new()
}

/// Strips the preposition and cuts the phrase where a date or time begins.
fn place_body(text: &str, start: usize, end: usize) -> String {
    let matched = &text[start..end];
    let body_start = start + PLACE_PREFIX.find(matched).map_or(0, |p| p.end());

    let cut = DATE_PATTERNS
        .iter()
        .chain([&*TWENTY_FOUR_HOUR, &*TWELVE_HOUR, &*NATURAL_TIME])
        .filter_map(|re| {
            re.find_iter(text)
                .skip_while(|m| m.start() < body_start)
                .take_while(|m| m.start() < end)
                .find(|m| is_whole_word(text, m.start(), m.end()))
        })
        .map(|m| m.start())
        .min()
        .unwrap_or(end);

    strip_dangling_connectives(&text[body_start..cut]).to_string()
}

// "night" inside "knight" or "tomorrow" inside "tomorrowland" is not a cut point.
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric());
    let after = text[end..]
        .chars()
        .next()
        .is_none_or(|c| !c.is_alphanumeric());
    before && after
}

fn strip_dangling_connectives(body: &str) -> &str {
    let trim = |s: &str| -> usize {
        s.trim_end_matches(|c: char| c == ',' || c.is_whitespace())
            .len()
    };
    let mut s = body.trim_start();
    s = &s[..trim(s)];
    loop {
        let (head, last) = s.rsplit_once(char::is_whitespace).unwrap_or(("", s));
        if last.is_empty() || !DANGLING_CONNECTIVES.contains(&last) {
            return s;
        }
        s = &head[..trim(head)];
    }
}

/// Text before the first separator (in priority order), or the whole input.
/// Titles shorter than five characters become `"<TECH> <type>"` when a tech
/// keyword is present.
pub fn extract_title(input: &str, event_type: EventType) -> String {
    let mut title = input.to_string();

    for separator in TITLE_SEPARATORS {
        if let Some((head, _)) = input.split_once(separator) {
            title = head.trim().to_string();
            break;
        }
    }

    if title.chars().count() < MIN_TITLE_CHARS
        && let Some(first) = find_tech_keywords(&input.to_lowercase()).first()
    {
        title = format!("{} {}", first, event_type);
    }

    title
}

/// One upper-cased keyword per tech category with a hit, in table order.
pub fn find_tech_keywords(text: &str) -> Vec<String> {
    TECH_KEYWORDS
        .iter()
        .filter_map(|category| category.first_match(text))
        .map(str::to_uppercase)
        .collect()
}

pub fn generate_description(input: &str, type_match: &TypeMatch) -> String {
    let tech = find_tech_keywords(&input.to_lowercase());
    let tech_part = if tech.is_empty() {
        String::new()
    } else {
        format!(" focusing on {}", tech.join(", "))
    };

    let base = format!(
        "Auto-created {}{} from: \"{}\"",
        type_match.event_type, tech_part, input
    );

    if type_match.confidence > HIGH_CONFIDENCE {
        format!(
            "{} (High confidence: {}%)",
            base,
            (type_match.confidence * 100.0).round() as u32
        )
    } else {
        base
    }
}

pub fn calculate_confidence(
    type_match: &TypeMatch,
    dates: &[String],
    times: &[String],
    location: &str,
) -> f64 {
    let mut confidence = type_match.confidence;
    if !dates.is_empty() {
        confidence += DATE_BOOST;
    }
    if !times.is_empty() {
        confidence += TIME_BOOST;
    }
    if !location.is_empty() {
        confidence += LOCATION_BOOST;
    }
    confidence.min(1.0)
}

/// Normalizes a matched date phrase to ISO `YYYY-MM-DD`.
///
/// Weekday names and `next/this week|month` are not resolved and come
/// back unchanged, like anything else that does not parse.
pub fn format_date(raw: &str, today: NaiveDate) -> String {
    if let Some(date) = parse_generic_date(raw, today) {
        return date.format("%Y-%m-%d").to_string();
    }
    if raw.contains("today") {
        return today.format("%Y-%m-%d").to_string();
    }
    if raw.contains("tomorrow") {
        return (today + Duration::days(1)).format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

fn parse_generic_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = raw.trim().to_lowercase();

    if let Some(caps) = ISO_PARTS.captures(&s) {
        return NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
    }

    if let Some(caps) = SLASH_PARTS.captures(&s) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year = expand_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, first, second).or_else(|| {
            if first > 12 {
                NaiveDate::from_ymd_opt(year, second, first)
            } else {
                None
            }
        });
    }

    if let Some(caps) = LONG_MONTH_PARTS.captures(&s) {
        return NaiveDate::from_ymd_opt(
            caps[3].parse().ok()?,
            month_number(&caps[1])?,
            caps[2].parse().ok()?,
        );
    }

    if let Some(caps) = SHORT_MONTH_PARTS.captures(&s) {
        return NaiveDate::from_ymd_opt(
            today.year(),
            month_number(&caps[1])?,
            caps[2].parse().ok()?,
        );
    }

    None
}

/// Two-digit years: 00-49 → 20xx, 50-99 → 19xx.
fn expand_year(digits: &str) -> Option<i32> {
    let year: i32 = digits.parse().ok()?;
    match digits.len() {
        2 if year < 50 => Some(2000 + year),
        2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

/// Normalizes a matched time token to 24-hour `HH:MM`.
pub fn format_time(raw: &str) -> String {
    let time = raw.trim().to_lowercase();

    if time.contains("morning") {
        return "09:00".to_string();
    }
    if time.contains("afternoon") {
        return "14:00".to_string();
    }
    if time.contains("evening") {
        return "18:00".to_string();
    }
    if time.contains("night") {
        return "20:00".to_string();
    }

    if let Some(caps) = TWELVE_HOUR_PARTS.captures(&time) {
        let hours: u32 = caps[1].parse().unwrap_or(0);
        let minutes: u32 = caps
            .get(2)
            .map_or(Some(0), |m| m.as_str().parse::<u32>().ok())
            .unwrap_or(60);
        if (1..=12).contains(&hours) && minutes < 60 {
            let is_pm = &caps[3] == "pm";
            let hours = match (hours, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            };
            return format!("{:02}:{:02}", hours, minutes);
        }
        return raw.to_string();
    }

    if let Some(caps) = TWENTY_FOUR_HOUR_PARTS.captures(&time) {
        let hours: u32 = caps[1].parse().unwrap_or(24);
        let minutes: u32 = caps[2].parse().unwrap_or(60);
        if hours < 24 && minutes < 60 {
            return format!("{:02}:{:02}", hours, minutes);
        }
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_connectives() {
        assert_eq!(strip_dangling_connectives("moscone center at "), "moscone center");
        assert_eq!(strip_dangling_connectives(" hall b, "), "hall b");
        assert_eq!(strip_dangling_connectives("at"), "");
        assert_eq!(strip_dangling_connectives(""), "");
    }

    #[test]
    fn test_expand_year() {
        assert_eq!(expand_year("24"), Some(2024));
        assert_eq!(expand_year("99"), Some(1999));
        assert_eq!(expand_year("2031"), Some(2031));
        assert_eq!(expand_year("202"), None);
    }

    #[test]
    fn test_meridiem_excludes_24h_match() {
        let times = extract_times("standup 2:30 pm");
        assert_eq!(times, vec!["2:30 pm".to_string()]);
        assert_eq!(format_time(&times[0]), "14:30");
    }

    #[test]
    fn test_place_skips_time_phrase() {
        assert_eq!(extract_location("demo at 2 pm in berlin"), "berlin");
    }
}
