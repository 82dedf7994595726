// File: ./src/recommend.rs
// Scores feed events against a user profile.
use crate::feed::{Difficulty, FeedEvent, FeedEventType};
use chrono::{Datelike, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const INTEREST_WEIGHT: f64 = 0.4;
const SKILL_WEIGHT: f64 = 0.2;
const TYPE_WEIGHT: f64 = 0.15;
const LOCATION_WEIGHT: f64 = 0.1;
const TIME_WEIGHT: f64 = 0.1;
const ORGANIZER_WEIGHT: f64 = 0.05;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    fn rank(self) -> i32 {
        match self {
            SkillLevel::Beginner => 1,
            SkillLevel::Intermediate => 2,
            SkillLevel::Advanced => 3,
        }
    }
}

impl From<Difficulty> for SkillLevel {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Beginner => SkillLevel::Beginner,
            Difficulty::Intermediate => SkillLevel::Intermediate,
            Difficulty::Advanced => SkillLevel::Advanced,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePreferences {
    pub weekdays: bool,
    pub weekends: bool,
    pub mornings: bool,
    pub afternoons: bool,
    pub evenings: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub interests: Vec<String>,
    pub skill_level: SkillLevel,
    pub preferred_event_types: Vec<FeedEventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub prefer_online: bool,
    #[serde(default)]
    pub past_events: Vec<String>,
    #[serde(default)]
    pub favorite_organizers: Vec<String>,
    pub time_preferences: TimePreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationScore {
    pub event_id: String,
    pub score: f64,
    pub reasons: Vec<String>,
    pub confidence: f64,
}

/// One weighted component of the overall score.
struct SubScore {
    score: f64,
    reasons: Vec<String>,
    confidence: f64,
}

fn interest_score(event: &FeedEvent, profile: &UserProfile) -> SubScore {
    let matching: Vec<&str> = event
        .tags
        .iter()
        .filter(|tag| {
            let tag = tag.to_lowercase();
            profile.interests.iter().any(|interest| {
                let interest = interest.to_lowercase();
                tag.contains(&interest) || interest.contains(&tag)
            })
        })
        .map(String::as_str)
        .collect();

    let denom = event.tags.len().max(profile.interests.len());
    let score = if denom == 0 {
        0.0
    } else {
        matching.len() as f64 / denom as f64
    };

    if matching.is_empty() {
        SubScore {
            score,
            reasons: vec![],
            confidence: 0.1,
        }
    } else {
        SubScore {
            score,
            reasons: vec![format!("Matches your interests: {}", matching.join(", "))],
            confidence: 0.9,
        }
    }
}

fn skill_score(event: &FeedEvent, profile: &UserProfile) -> SubScore {
    let gap = (profile.skill_level.rank() - SkillLevel::from(event.difficulty).rank()).abs();
    let (score, reason) = match gap {
        0 => (1.0, format!("Perfect skill level match ({})", event.difficulty)),
        1 => (0.7, format!("Good skill level fit ({})", event.difficulty)),
        _ => (0.3, format!("Different skill level ({})", event.difficulty)),
    };
    SubScore {
        score,
        reasons: vec![reason],
        confidence: 0.8,
    }
}

fn type_score(event: &FeedEvent, profile: &UserProfile) -> SubScore {
    let preferred = profile.preferred_event_types.contains(&event.event_type);
    SubScore {
        score: if preferred { 1.0 } else { 0.3 },
        reasons: if preferred {
            vec![format!(
                "Matches your preferred event type: {}",
                event.event_type
            )]
        } else {
            vec![]
        },
        confidence: 0.9,
    }
}

fn location_score(event: &FeedEvent, profile: &UserProfile) -> SubScore {
    let (score, reason) = match (event.is_online, profile.prefer_online) {
        (true, true) => (1.0, "Online event matches your preference"),
        (false, false) => {
            let local = profile.location.as_ref().is_some_and(|loc| {
                event
                    .location
                    .to_lowercase()
                    .contains(&loc.to_lowercase())
            });
            if local {
                (1.0, "Event is in your preferred location")
            } else {
                (0.6, "In-person event")
            }
        }
        (true, false) => (0.7, "Online event (you prefer in-person)"),
        (false, true) => (0.4, "In-person event (you prefer online)"),
    };
    SubScore {
        score,
        reasons: vec![reason.to_string()],
        confidence: 0.7,
    }
}

fn event_hour(time: &str) -> Option<u32> {
    if let Ok(t) = NaiveTime::parse_from_str(time, "%H:%M") {
        return Some(t.hour());
    }
    time.split(':').next()?.trim().parse().ok()
}

fn time_score(event: &FeedEvent, profile: &UserProfile) -> SubScore {
    let prefs = &profile.time_preferences;
    let mut score: f64 = 0.5;
    let mut reasons = Vec::new();

    if let Some(date) = event.naive_date() {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        if weekend && prefs.weekends {
            score += 0.3;
            reasons.push("Weekend event matches your preference".to_string());
        } else if !weekend && prefs.weekdays {
            score += 0.3;
            reasons.push("Weekday event matches your preference".to_string());
        }
    }

    if let Some(hour) = event_hour(&event.time) {
        if hour < 12 && prefs.mornings {
            score += 0.2;
            reasons.push("Morning time matches your preference".to_string());
        } else if (12..17).contains(&hour) && prefs.afternoons {
            score += 0.2;
            reasons.push("Afternoon time matches your preference".to_string());
        } else if hour >= 17 && prefs.evenings {
            score += 0.2;
            reasons.push("Evening time matches your preference".to_string());
        }
    }

    SubScore {
        score: score.min(1.0),
        reasons,
        confidence: 0.6,
    }
}

fn organizer_score(event: &FeedEvent, profile: &UserProfile) -> SubScore {
    if profile.favorite_organizers.contains(&event.organizer) {
        SubScore {
            score: 1.0,
            reasons: vec![format!(
                "Organized by {} (your favorite organizer)",
                event.organizer
            )],
            confidence: 0.9,
        }
    } else {
        SubScore {
            score: 0.5,
            reasons: vec![],
            confidence: 0.1,
        }
    }
}

pub fn score_event(event: &FeedEvent, profile: &UserProfile) -> RecommendationScore {
    let parts = [
        (interest_score(event, profile), INTEREST_WEIGHT),
        (skill_score(event, profile), SKILL_WEIGHT),
        (type_score(event, profile), TYPE_WEIGHT),
        (location_score(event, profile), LOCATION_WEIGHT),
        (time_score(event, profile), TIME_WEIGHT),
        (organizer_score(event, profile), ORGANIZER_WEIGHT),
    ];

    let mut score = 0.0;
    let mut confidence = 0.0;
    let mut reasons = Vec::new();
    for (part, weight) in parts {
        score += part.score * weight;
        confidence += part.confidence * weight;
        reasons.extend(part.reasons.into_iter().filter(|r| !r.is_empty()));
    }

    RecommendationScore {
        event_id: event.id.clone(),
        score: score.min(1.0),
        reasons,
        confidence: confidence.min(1.0),
    }
}

// Scores within the same tenth are ranked by confidence first.
fn score_bucket(score: f64) -> i64 {
    (score * 10.0).floor() as i64
}

pub fn personalized<'a>(
    events: &'a [FeedEvent],
    profile: &UserProfile,
    limit: usize,
) -> Vec<(&'a FeedEvent, RecommendationScore)> {
    let mut ranked: Vec<(&FeedEvent, RecommendationScore)> = events
        .iter()
        .map(|e| (e, score_event(e, profile)))
        .collect();

    ranked.sort_by(|(_, a), (_, b)| {
        score_bucket(b.score)
            .cmp(&score_bucket(a.score))
            .then_with(|| b.confidence.total_cmp(&a.confidence))
            .then_with(|| b.score.total_cmp(&a.score))
    });
    ranked.truncate(limit);
    ranked
}

/// Interactions observed since the profile was last updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interactions {
    pub added_events: Vec<String>,
    pub viewed_events: Vec<String>,
    pub registered_events: Vec<String>,
}

pub fn update_profile(profile: &UserProfile, interactions: &Interactions) -> UserProfile {
    let mut updated = profile.clone();
    let mut seen: HashSet<String> = updated.past_events.iter().cloned().collect();
    for id in &interactions.viewed_events {
        if seen.insert(id.clone()) {
            updated.past_events.push(id.clone());
        }
    }
    updated
}

pub fn default_profile(user_id: &str) -> UserProfile {
    UserProfile {
        id: user_id.to_string(),
        interests: ["JavaScript", "React", "AI", "Web Development"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        skill_level: SkillLevel::Intermediate,
        preferred_event_types: vec![
            FeedEventType::Hackathon,
            FeedEventType::Conference,
            FeedEventType::Workshop,
        ],
        location: None,
        prefer_online: false,
        past_events: Vec::new(),
        favorite_organizers: Vec::new(),
        time_preferences: TimePreferences {
            weekdays: true,
            weekends: true,
            mornings: false,
            afternoons: true,
            evenings: true,
        },
    }
}
