// File: ./src/notifications.rs
// Reminder and deadline scheduling for calendar events, plus the in-app inbox.
use crate::model::{CalendarEvent, EventType};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    Reminder,
    Deadline,
    Recommendation,
    Update,
    Achievement,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    View,
    Register,
    Dismiss,
    Snooze,
    AddToCalendar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub id: String,
    pub label: String,
    pub action: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NotificationAction {
    fn new(id: &str, label: &str, action: ActionKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            action,
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub event_id: Option<String>,
    pub priority: NotificationPriority,
    /// Local wall-clock time the notification is due.
    pub scheduled_for: NaiveDateTime,
    pub is_read: bool,
    pub is_delivered: bool,
    #[serde(default)]
    pub actions: Vec<NotificationAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_before: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
}

// --- PREFERENCES ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationTypes {
    pub reminders: bool,
    pub deadlines: bool,
    pub recommendations: bool,
    pub updates: bool,
    pub achievements: bool,
}

impl Default for NotificationTypes {
    fn default() -> Self {
        Self {
            reminders: true,
            deadlines: true,
            recommendations: true,
            updates: true,
            achievements: true,
        }
    }
}

impl NotificationTypes {
    pub fn allows(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Reminder => self.reminders,
            NotificationKind::Deadline => self.deadlines,
            NotificationKind::Recommendation => self.recommendations,
            NotificationKind::Update => self.updates,
            NotificationKind::Achievement => self.achievements,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuietHours {
    pub enabled: bool,
    pub start: String, // Format "HH:MM"
    pub end: String,   // Format "HH:MM"
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            enabled: true,
            start: "22:00".to_string(),
            end: "08:00".to_string(),
        }
    }
}

fn minutes_of(hhmm: &str) -> Option<u32> {
    let t = NaiveTime::parse_from_str(hhmm, "%H:%M").ok()?;
    Some(t.hour() * 60 + t.minute())
}

impl QuietHours {
    /// Both bounds are inclusive; a window whose start is after its end wraps
    /// past midnight. Unparseable bounds never silence anything.
    pub fn contains(&self, time: NaiveTime) -> bool {
        if !self.enabled {
            return false;
        }
        let (Some(start), Some(end)) = (minutes_of(&self.start), minutes_of(&self.end)) else {
            log::warn!(
                "Ignoring malformed quiet hours {}-{}",
                self.start,
                self.end
            );
            return false;
        };
        let current = time.hour() * 60 + time.minute();

        if start < end {
            current >= start && current <= end
        } else {
            current >= start || current <= end
        }
    }

    /// First minute after the quiet window ends, strictly after `now`.
    pub fn next_available(&self, now: NaiveDateTime) -> NaiveDateTime {
        let Ok(end) = NaiveTime::parse_from_str(&self.end, "%H:%M") else {
            return now;
        };
        let candidate = now.date().and_time(end) + Duration::minutes(1);
        if candidate <= now {
            candidate + Duration::days(1)
        } else {
            candidate
        }
    }
}

fn default_before_event() -> Vec<f64> {
    vec![24.0, 2.0, 0.5]
}

fn default_before_deadline() -> Vec<f64> {
    vec![72.0, 24.0, 6.0, 1.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Hours before an event start to remind.
    #[serde(default = "default_before_event")]
    pub before_event_hours: Vec<f64>,
    /// Hours before a registration deadline to remind.
    #[serde(default = "default_before_deadline")]
    pub before_deadline_hours: Vec<f64>,
    #[serde(default)]
    pub types: NotificationTypes,
    #[serde(default)]
    pub quiet_hours: QuietHours,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            before_event_hours: default_before_event(),
            before_deadline_hours: default_before_deadline(),
            types: NotificationTypes::default(),
            quiet_hours: QuietHours::default(),
        }
    }
}

// --- FORMATTING ---

pub fn format_time_remaining(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} minutes", (hours * 60.0).round() as i64)
    } else if hours < 24.0 {
        format!("{} hour{}", hours, if hours != 1.0 { "s" } else { "" })
    } else {
        let days = (hours / 24.0).round() as i64;
        format!("{} day{}", days, if days != 1 { "s" } else { "" })
    }
}

pub fn reminder_message(title: &str, hours_before: f64) -> String {
    let remaining = format_time_remaining(hours_before);
    if hours_before == 24.0 {
        format!(
            "Don't forget! \"{}\" starts in {}. Time to prepare! 🚀",
            title, remaining
        )
    } else if hours_before == 2.0 {
        format!(
            "Starting soon! \"{}\" begins in {}. Get ready! ⏰",
            title, remaining
        )
    } else if hours_before == 0.5 {
        format!(
            "Last call! \"{}\" starts in {}. Join now! 🔥",
            title, remaining
        )
    } else {
        format!("\"{}\" starts in {}", title, remaining)
    }
}

pub fn priority_for_lead(hours_before: f64) -> NotificationPriority {
    if hours_before <= 0.5 {
        NotificationPriority::Urgent
    } else if hours_before <= 2.0 {
        NotificationPriority::High
    } else if hours_before <= 24.0 {
        NotificationPriority::Medium
    } else {
        NotificationPriority::Low
    }
}

fn lead_time(hours: f64) -> Duration {
    Duration::minutes((hours * 60.0).round() as i64)
}

/// Start of an event as local wall-clock time, if its date and time parse.
pub fn event_start(event: &CalendarEvent) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(&event.date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(&event.time, "%H:%M").ok()?;
    Some(date.and_time(time))
}

// --- SERVICE ---

/// Outcome of a delivery attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Delivered,
    /// Notifications are off globally or for this kind; the entry was dropped.
    Suppressed,
    /// Inside quiet hours; moved to the end of the window.
    Rescheduled(NaiveDateTime),
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationService {
    notifications: Vec<Notification>,
    preferences: NotificationPreferences,
}

impl NotificationService {
    pub fn new(preferences: NotificationPreferences) -> Self {
        Self {
            notifications: Vec::new(),
            preferences,
        }
    }

    pub fn preferences(&self) -> &NotificationPreferences {
        &self.preferences
    }

    pub fn update_preferences(&mut self, preferences: NotificationPreferences) {
        self.preferences = preferences;
    }

    // Same id replaces the older entry so rescheduling an event is idempotent.
    fn upsert(&mut self, notification: Notification) {
        if let Some(existing) = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification.id)
        {
            *existing = notification;
        } else {
            self.notifications.push(notification);
        }
    }

    /// Queues the before-event reminders that are still in the future.
    /// Returns how many were queued.
    pub fn schedule_event_notifications(
        &mut self,
        event: &CalendarEvent,
        now: NaiveDateTime,
    ) -> usize {
        if !self.preferences.enabled {
            return 0;
        }
        let Some(start) = event_start(event) else {
            log::debug!(
                "Not scheduling reminders for '{}': no concrete start ({} {})",
                event.title,
                event.date,
                event.time
            );
            return 0;
        };

        let mut count = 0;
        for hours in self.preferences.before_event_hours.clone() {
            let at = start - lead_time(hours);
            if at <= now {
                continue;
            }
            self.upsert(Notification {
                id: format!("reminder-{}-{}h", event.uid, hours),
                kind: NotificationKind::Reminder,
                title: format!("Upcoming: {}", event.title),
                message: reminder_message(&event.title, hours),
                event_id: Some(event.uid.clone()),
                priority: priority_for_lead(hours),
                scheduled_for: at,
                is_read: false,
                is_delivered: false,
                actions: vec![
                    NotificationAction::new("view", "View Event", ActionKind::View),
                    NotificationAction::new("snooze", "Remind in 1h", ActionKind::Snooze),
                ],
                hours_before: Some(hours),
                event_type: Some(event.event_type),
            });
            count += 1;
        }
        count
    }

    pub fn schedule_deadline_notifications(
        &mut self,
        event: &CalendarEvent,
        deadline: NaiveDateTime,
        registration_url: Option<&str>,
        now: NaiveDateTime,
    ) -> usize {
        if !self.preferences.enabled {
            return 0;
        }

        let mut count = 0;
        for hours in self.preferences.before_deadline_hours.clone() {
            let at = deadline - lead_time(hours);
            if at <= now {
                continue;
            }
            let mut register =
                NotificationAction::new("register", "Register Now", ActionKind::Register);
            register.url = registration_url.map(str::to_string);
            self.upsert(Notification {
                id: format!("deadline-{}-{}h", event.uid, hours),
                kind: NotificationKind::Deadline,
                title: "Registration Deadline Approaching".to_string(),
                message: format!(
                    "Registration for \"{}\" closes in {}",
                    event.title,
                    format_time_remaining(hours)
                ),
                event_id: Some(event.uid.clone()),
                priority: NotificationPriority::High,
                scheduled_for: at,
                is_read: false,
                is_delivered: false,
                actions: vec![register],
                hours_before: Some(hours),
                event_type: Some(event.event_type),
            });
            count += 1;
        }
        count
    }

    pub fn deliver(&mut self, id: &str, now: NaiveDateTime) -> Delivery {
        let Some(idx) = self.notifications.iter().position(|n| n.id == id) else {
            return Delivery::NotFound;
        };

        let kind = self.notifications[idx].kind;
        if !self.preferences.enabled || !self.preferences.types.allows(kind) {
            self.notifications.remove(idx);
            return Delivery::Suppressed;
        }

        if self.preferences.quiet_hours.contains(now.time()) {
            let next = self.preferences.quiet_hours.next_available(now);
            self.notifications[idx].scheduled_for = next;
            return Delivery::Rescheduled(next);
        }

        self.notifications[idx].is_delivered = true;
        Delivery::Delivered
    }

    /// Delivers everything due at `now`; returns the ones actually delivered.
    pub fn deliver_due(&mut self, now: NaiveDateTime) -> Vec<Notification> {
        let due: Vec<String> = self.due(now).iter().map(|n| n.id.clone()).collect();
        let mut delivered = Vec::new();
        for id in due {
            if self.deliver(&id, now) == Delivery::Delivered
                && let Some(n) = self.get(&id)
            {
                delivered.push(n.clone());
            }
        }
        delivered
    }

    pub fn due(&self, now: NaiveDateTime) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| !n.is_delivered && n.scheduled_for <= now)
            .collect()
    }

    /// Earliest pending delivery time.
    pub fn next_due_time(&self) -> Option<NaiveDateTime> {
        self.notifications
            .iter()
            .filter(|n| !n.is_delivered)
            .map(|n| n.scheduled_for)
            .min()
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn notifications(&self, unread_only: bool) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| !unread_only || !n.is_read)
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    pub fn mark_as_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.is_read = true;
        }
    }

    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    /// Drops every notification attached to an event.
    pub fn remove_for_event(&mut self, event_uid: &str) {
        self.notifications
            .retain(|n| n.event_id.as_deref() != Some(event_uid));
    }

    pub fn snooze(&mut self, id: &str, minutes: i64, now: NaiveDateTime) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.scheduled_for = now + Duration::minutes(minutes);
                n.is_delivered = false;
                true
            }
            None => false,
        }
    }

    /// Creates an achievement entry and delivers it right away.
    pub fn achievement(
        &mut self,
        achievement: &str,
        description: &str,
        now: NaiveDateTime,
    ) -> Delivery {
        let id = format!("achievement-{}", now.and_utc().timestamp_millis());
        self.upsert(Notification {
            id: id.clone(),
            kind: NotificationKind::Achievement,
            title: "🏆 Achievement Unlocked!".to_string(),
            message: format!("{}: {}", achievement, description),
            event_id: None,
            priority: NotificationPriority::Medium,
            scheduled_for: now,
            is_read: false,
            is_delivered: false,
            actions: vec![NotificationAction::new(
                "view",
                "View Achievements",
                ActionKind::View,
            )],
            hours_before: None,
            event_type: None,
        });
        self.deliver(&id, now)
    }
}
