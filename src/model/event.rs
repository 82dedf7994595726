// File: ./src/model/event.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

fn default_uid() -> String {
    Uuid::new_v4().to_string()
}

/// Category assigned to a calendar entry by the free-text parser.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventType {
    #[default]
    Hackathon,
    Conference,
    Seminar,
    Meetup,
    Talk,
}

/// Result of parsing one free-text input (typed, transcribed or OCR'd).
///
/// A plain value: the calendar copies what it needs into a `CalendarEvent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// ISO `YYYY-MM-DD` when resolvable, otherwise the raw matched phrase or "".
    pub date: String,
    /// `HH:MM` (24h) or the raw matched token.
    pub time: String,
    pub description: String,
    pub location: String,
    pub confidence: f64,
}

impl ParsedEvent {
    /// Callers flag drafts below this threshold instead of rejecting them.
    pub fn needs_review(&self, threshold: f64) -> bool {
        self.confidence < threshold
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// The resolved date, if the parser produced an ISO date.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// How an entry got into the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventSource {
    #[default]
    Manual,
    QuickInput,
    Voice,
    Image,
    Feed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default = "default_uid")]
    pub uid: String,
    pub title: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub source: EventSource,
}

impl CalendarEvent {
    pub fn new(title: &str, date: &str, time: &str, event_type: EventType) -> Self {
        Self {
            uid: default_uid(),
            title: title.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            event_type,
            description: String::new(),
            location: String::new(),
            confidence: None,
            source: EventSource::Manual,
        }
    }

    pub fn from_parsed(parsed: ParsedEvent, source: EventSource) -> Self {
        Self {
            uid: default_uid(),
            title: parsed.title,
            date: parsed.date,
            time: parsed.time,
            event_type: parsed.event_type,
            description: parsed.description,
            location: parsed.location,
            confidence: Some(parsed.confidence),
            source,
        }
    }

    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn is_online(&self) -> bool {
        let loc = self.location.to_lowercase();
        loc == "online" || loc == "virtual" || loc == "remote"
    }
}
