// File: src/store.rs
use crate::context::AppContext;
use crate::feed::FeedEvent;
use crate::model::ocr::OcrDraft;
use crate::model::{CalendarEvent, EventSource, EventType, parse_event_input_at};
use crate::storage::LocalStorage;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};

/// In-memory calendar, persisted through `LocalStorage`.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    pub events: Vec<CalendarEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        Ok(Self {
            events: LocalStorage::load_events(ctx)?,
        })
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        LocalStorage::save_events(ctx, &self.events)
    }

    fn push(&mut self, event: CalendarEvent) -> CalendarEvent {
        log::debug!(
            "Adding {} '{}' on {} ({})",
            event.event_type,
            event.title,
            event.date,
            event.source
        );
        self.events.push(event.clone());
        event
    }

    pub fn add_manual(
        &mut self,
        title: &str,
        date: &str,
        time: &str,
        event_type: EventType,
        description: &str,
    ) -> Result<CalendarEvent> {
        let title = title.trim();
        let date = date.trim();
        if title.is_empty() || date.is_empty() {
            anyhow::bail!("An event needs at least a title and a date");
        }
        let mut event = CalendarEvent::new(title, date, time.trim(), event_type);
        event.description = description.to_string();
        Ok(self.push(event))
    }

    /// Parses free text and stores the resulting draft as-is.
    pub fn add_from_input(
        &mut self,
        input: &str,
        source: EventSource,
        today: NaiveDate,
    ) -> Result<CalendarEvent> {
        if input.trim().is_empty() {
            anyhow::bail!("Nothing to parse: input is empty");
        }
        let parsed = parse_event_input_at(input, today);
        log::info!(
            "Parsed '{}' as {} ({}% confidence)",
            input.trim(),
            parsed.event_type,
            parsed.confidence_percent()
        );
        Ok(self.push(CalendarEvent::from_parsed(parsed, source)))
    }

    pub fn add_from_draft(&mut self, draft: OcrDraft) -> CalendarEvent {
        self.push(draft.into_calendar_event())
    }

    pub fn add_from_feed(&mut self, feed_event: &FeedEvent) -> CalendarEvent {
        self.push(feed_event.to_calendar_event())
    }

    pub fn remove(&mut self, uid: &str) -> Option<CalendarEvent> {
        let idx = self.events.iter().position(|e| e.uid == uid)?;
        Some(self.events.remove(idx))
    }

    pub fn get(&self, uid: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.uid == uid)
    }

    /// Events on a given day, earliest time first.
    pub fn events_for_date(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let mut out: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|e| e.naive_date() == Some(date))
            .collect();
        out.sort_by(|a, b| a.time.cmp(&b.time));
        out
    }

    /// Events whose ISO date falls in the month, by date then time.
    /// Entries with unresolved dates are never part of a month.
    pub fn events_in_month(&self, year: i32, month: u32) -> Vec<&CalendarEvent> {
        let mut out: Vec<(NaiveDate, &CalendarEvent)> = self
            .events
            .iter()
            .filter_map(|e| e.naive_date().map(|d| (d, e)))
            .filter(|(d, _)| d.year() == year && d.month() == month)
            .collect();
        out.sort_by(|(da, a), (db, b)| da.cmp(db).then_with(|| a.time.cmp(&b.time)));
        out.into_iter().map(|(_, e)| e).collect()
    }

    /// Events whose date did not resolve to a calendar day.
    pub fn undated(&self) -> Vec<&CalendarEvent> {
        self.events
            .iter()
            .filter(|e| e.naive_date().is_none())
            .collect()
    }
}
