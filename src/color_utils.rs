//techcal/src/color_utils.rs

// Display accents for event types, platforms and notifications.
// No terminal or GUI dependencies so it can be used from core logic and tests.

use crate::feed::{FeedEventType, Platform};
use crate::model::EventType;
use crate::notifications::{NotificationKind, NotificationPriority};

pub const FALLBACK_COLOR: &str = "#666";
pub const FALLBACK_ICON: &str = "📅";

pub fn feed_type_color(event_type: FeedEventType) -> &'static str {
    match event_type {
        FeedEventType::Hackathon => "#ff9800",
        FeedEventType::Conference => "#2196f3",
        FeedEventType::Seminar => "#4caf50",
        FeedEventType::Workshop => "#9c27b0",
        FeedEventType::Meetup => "#ff5722",
        FeedEventType::Webinar => "#607d8b",
    }
}

/// Calendar types share the feed palette; `talk` has no feed counterpart.
pub fn event_type_color(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Hackathon => feed_type_color(FeedEventType::Hackathon),
        EventType::Conference => feed_type_color(FeedEventType::Conference),
        EventType::Seminar => feed_type_color(FeedEventType::Seminar),
        EventType::Meetup => feed_type_color(FeedEventType::Meetup),
        EventType::Talk => FALLBACK_COLOR,
    }
}

/// Looks a type up by name, as stored in exported data.
pub fn type_color_by_name(name: &str) -> &'static str {
    name.parse::<FeedEventType>()
        .map(feed_type_color)
        .unwrap_or(FALLBACK_COLOR)
}

pub fn platform_icon(platform: Platform) -> &'static str {
    match platform {
        Platform::Devpost => "🏆",
        Platform::Hackerearth => "🌍",
        Platform::Eventbrite => "🎫",
        Platform::Meetup => "👥",
        Platform::Github => "🐙",
        Platform::Local => "📍",
    }
}

pub fn platform_icon_by_name(name: &str) -> &'static str {
    name.parse::<Platform>()
        .map(platform_icon)
        .unwrap_or(FALLBACK_ICON)
}

pub fn notification_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Reminder => "⏰",
        NotificationKind::Deadline => "⚠️",
        NotificationKind::Recommendation => "💡",
        NotificationKind::Update => "📢",
        NotificationKind::Achievement => "🏆",
    }
}

pub fn priority_color(priority: NotificationPriority) -> &'static str {
    match priority {
        NotificationPriority::Low => "#4caf50",
        NotificationPriority::Medium => "#ff9800",
        NotificationPriority::High => "#ff5722",
        NotificationPriority::Urgent => "#f44336",
    }
}

/// Parse a hex color string like "#RRGGBB" or "RRGGBB" into u8 tuple.
/// Short "#RGB" forms are expanded.
pub fn parse_hex_to_u8(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let full: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let r = u8::from_str_radix(&full[0..2], 16).ok()?;
    let g = u8::from_str_radix(&full[2..4], 16).ok()?;
    let b = u8::from_str_radix(&full[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Determines if text on top of this color should be black or white.
pub fn is_dark(hex: &str) -> bool {
    let Some((r, g, b)) = parse_hex_to_u8(hex) else {
        return false;
    };
    // Perceptual luminance approximation
    let brightness = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    brightness < 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_by_name_fall_back() {
        assert_eq!(type_color_by_name("Workshop"), "#9c27b0");
        assert_eq!(type_color_by_name("party"), FALLBACK_COLOR);
        assert_eq!(platform_icon_by_name("github"), "🐙");
        assert_eq!(platform_icon_by_name("myspace"), FALLBACK_ICON);
    }

    #[test]
    fn test_calendar_and_priority_colors() {
        assert_eq!(event_type_color(EventType::Meetup), "#ff5722");
        assert_eq!(event_type_color(EventType::Talk), FALLBACK_COLOR);
        assert_eq!(priority_color(NotificationPriority::Urgent), "#f44336");
        assert_eq!(notification_icon(NotificationKind::Deadline), "⚠️");
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(parse_hex_to_u8("#ff9800"), Some((255, 152, 0)));
        assert_eq!(parse_hex_to_u8("666"), Some((102, 102, 102)));
        assert_eq!(parse_hex_to_u8("#12345"), None);
        assert_eq!(parse_hex_to_u8(FALLBACK_COLOR), Some((102, 102, 102)));
        assert!(is_dark(FALLBACK_COLOR));
        assert!(!is_dark("#ff9800"));
    }
}
