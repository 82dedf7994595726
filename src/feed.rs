// File: ./src/feed.rs
// Curated listing of upcoming tech events from external platforms.
use crate::model::{CalendarEvent, EventSource, EventType};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, Display, EnumIter, EnumString};

const BUNDLED_FEED: &str = include_str!("../assets/feed.json");
const TRENDING_MIN_RATING: f64 = 4.5;
const TRENDING_LIMIT: usize = 5;
const RECOMMENDED_LIMIT: usize = 6;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FeedEventType {
    Hackathon,
    Conference,
    Seminar,
    Workshop,
    Meetup,
    Webinar,
}

impl FeedEventType {
    /// Calendar entries know fewer categories than the feed does.
    pub fn calendar_type(self) -> EventType {
        match self {
            FeedEventType::Hackathon => EventType::Hackathon,
            FeedEventType::Conference => EventType::Conference,
            FeedEventType::Seminar | FeedEventType::Workshop | FeedEventType::Webinar => {
                EventType::Seminar
            }
            FeedEventType::Meetup => EventType::Meetup,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    Devpost,
    Hackerearth,
    Eventbrite,
    Meetup,
    Github,
    Local,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: FeedEventType,
    pub platform: Platform,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub organizer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    pub is_online: bool,
    pub is_free: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl FeedEvent {
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn has_tag_like(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    pub fn to_calendar_event(&self) -> CalendarEvent {
        let mut event = CalendarEvent::new(
            &self.title,
            &self.date,
            &self.time,
            self.event_type.calendar_type(),
        );
        event.description = self.description.clone();
        event.location = self.location.clone();
        event.source = EventSource::Feed;
        event
    }
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Empty lists and `None` mean "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilters {
    pub types: Vec<FeedEventType>,
    pub platforms: Vec<Platform>,
    pub difficulties: Vec<Difficulty>,
    pub is_online: Option<bool>,
    pub is_free: Option<bool>,
    pub tags: Vec<String>,
    pub date_range: Option<DateRange>,
    pub location: Option<String>,
}

impl EventFilters {
    pub fn matches(&self, event: &FeedEvent) -> bool {
        if !self.types.is_empty() && !self.types.contains(&event.event_type) {
            return false;
        }
        if !self.platforms.is_empty() && !self.platforms.contains(&event.platform) {
            return false;
        }
        if !self.difficulties.is_empty() && !self.difficulties.contains(&event.difficulty) {
            return false;
        }
        if let Some(online) = self.is_online
            && event.is_online != online
        {
            return false;
        }
        if let Some(free) = self.is_free
            && event.is_free != free
        {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|t| event.has_tag_like(t)) {
            return false;
        }
        if let Some(range) = self.date_range {
            match event.naive_date() {
                Some(d) if d >= range.start && d <= range.end => {}
                _ => return false,
            }
        }
        if let Some(loc) = &self.location
            && !event.location.to_lowercase().contains(&loc.to_lowercase())
        {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedService {
    events: Vec<FeedEvent>,
}

impl FeedService {
    pub fn new(events: Vec<FeedEvent>) -> Self {
        Self { events }
    }

    /// The listing bundled with the binary.
    pub fn with_mock_feed() -> Result<Self> {
        let events: Vec<FeedEvent> =
            serde_json::from_str(BUNDLED_FEED).context("Bundled event feed is malformed")?;
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[FeedEvent] {
        &self.events
    }

    /// Filtered events, soonest first. Undated entries sort last.
    pub fn event_feed(&self, filters: &EventFilters) -> Vec<FeedEvent> {
        let mut out: Vec<FeedEvent> = self
            .events
            .iter()
            .filter(|e| filters.matches(e))
            .cloned()
            .collect();
        out.sort_by_key(|e| e.naive_date().unwrap_or(NaiveDate::MAX));
        out
    }

    pub fn trending(&self) -> Vec<FeedEvent> {
        let mut out: Vec<FeedEvent> = self
            .events
            .iter()
            .filter(|e| e.rating.is_some_and(|r| r >= TRENDING_MIN_RATING))
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .partial_cmp(&a.rating.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal)
        });
        out.truncate(TRENDING_LIMIT);
        out
    }

    pub fn recommended(&self, interests: &[String]) -> Vec<FeedEvent> {
        self.events
            .iter()
            .filter(|e| interests.iter().any(|i| e.has_tag_like(i)))
            .take(RECOMMENDED_LIMIT)
            .cloned()
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&FeedEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.events.iter().flat_map(|e| e.tags.clone()).collect();
        tags.sort();
        tags.dedup();
        tags
    }

    pub fn all_platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<Platform> = self.events.iter().map(|e| e.platform).collect();
        platforms.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
        platforms.dedup();
        platforms
    }
}
