// File: ./src/model/keywords.rs
// Keyword tables driving classification and tech-topic detection.
// Declaration order is significant: scans walk these slices front to back.
use crate::model::EventType;

pub struct TypeKeywords {
    pub event_type: EventType,
    pub keywords: &'static [&'static str],
    pub confidence: f64,
}

pub const EVENT_TYPE_KEYWORDS: &[TypeKeywords] = &[
    TypeKeywords {
        event_type: EventType::Hackathon,
        keywords: &[
            "hackathon",
            "hack",
            "coding competition",
            "dev challenge",
            "programming contest",
            "buildathon",
        ],
        confidence: 0.9,
    },
    TypeKeywords {
        event_type: EventType::Conference,
        keywords: &[
            "conference",
            "conf",
            "summit",
            "symposium",
            "convention",
            "expo",
            "forum",
        ],
        confidence: 0.85,
    },
    TypeKeywords {
        event_type: EventType::Seminar,
        keywords: &[
            "seminar", "workshop", "webinar", "training", "session", "class", "tutorial",
            "bootcamp",
        ],
        confidence: 0.8,
    },
    TypeKeywords {
        event_type: EventType::Meetup,
        keywords: &["meetup", "gathering", "networking", "social", "community"],
        confidence: 0.75,
    },
    TypeKeywords {
        event_type: EventType::Talk,
        keywords: &["talk", "presentation", "lecture", "keynote", "speech"],
        confidence: 0.7,
    },
];

/// Returned when no type keyword is present.
pub const FALLBACK_TYPE: EventType = EventType::Hackathon;
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

pub struct TechCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

pub const TECH_KEYWORDS: &[TechCategory] = &[
    TechCategory {
        name: "ai",
        keywords: &[
            "ai",
            "artificial intelligence",
            "machine learning",
            "ml",
            "deep learning",
            "neural network",
        ],
    },
    TechCategory {
        name: "web",
        keywords: &[
            "web",
            "frontend",
            "backend",
            "fullstack",
            "javascript",
            "react",
            "vue",
            "angular",
            "node",
        ],
    },
    TechCategory {
        name: "mobile",
        keywords: &[
            "mobile",
            "ios",
            "android",
            "flutter",
            "react native",
            "swift",
            "kotlin",
        ],
    },
    TechCategory {
        name: "blockchain",
        keywords: &[
            "blockchain",
            "crypto",
            "bitcoin",
            "ethereum",
            "web3",
            "defi",
            "nft",
        ],
    },
    TechCategory {
        name: "cloud",
        keywords: &["cloud", "aws", "azure", "gcp", "docker", "kubernetes", "devops"],
    },
    TechCategory {
        name: "data",
        keywords: &[
            "data",
            "analytics",
            "big data",
            "database",
            "sql",
            "nosql",
            "data science",
        ],
    },
];

pub const TECH_BOOST: f64 = 0.1;

impl TechCategory {
    /// First keyword of this category (in table order) contained in `text`.
    pub fn first_match(&self, text: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|kw| text.contains(kw))
    }
}

pub const ONLINE_KEYWORDS: &[&str] = &[
    "online", "virtual", "remote", "zoom", "teams", "meet", "webinar",
];

pub const MONTH_NAMES: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub const MONTH_ABBREVIATIONS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

pub const WEEKDAY_NAMES: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// 1-based month number for a full or abbreviated English month name.
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .or_else(|| MONTH_ABBREVIATIONS.iter().position(|m| *m == name))
        .map(|idx| idx as u32 + 1)
}
