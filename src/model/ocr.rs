// File: ./src/model/ocr.rs
// Turns recognized poster text into a calendar draft.
// Recognition itself is delegated to an `OcrEngine`; none ships with the crate.
use crate::model::keywords::{MONTH_ABBREVIATIONS, MONTH_NAMES};
use crate::model::parser::{format_date, format_time, parse_event_input_at};
use crate::model::{CalendarEvent, EventSource, EventType};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
const DESCRIPTION_LIMIT: usize = 200;
const PREVIEW_LIMIT: usize = 100;

const LOCATION_KEYWORDS: &[&str] = &[
    "at",
    "venue",
    "location",
    "address",
    "hall",
    "center",
    "university",
    "college",
];

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\d{4}[/-]\d{1,2}[/-]\d{1,2}").expect("valid pattern"),
        Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").expect("valid pattern"),
        Regex::new(&format!(
            r"(?:{})\s+\d{{1,2}},?\s+\d{{4}}",
            MONTH_NAMES.join("|")
        ))
        .expect("valid pattern"),
        Regex::new(&format!(r"(?:{})\s+\d{{1,2}}", MONTH_ABBREVIATIONS.join("|")))
            .expect("valid pattern"),
    ]
});

static TIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b\d{1,2}(?::\d{2})?\s*[ap]m\b").expect("valid pattern"),
        Regex::new(r"\d{1,2}:\d{2}").expect("valid pattern"),
        Regex::new(r"morning|afternoon|evening|night").expect("valid pattern"),
    ]
});

static LOCATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", LOCATION_KEYWORDS.join("|"))).expect("valid pattern")
});

static ONLINE_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:online|virtual|zoom|meet)\b").expect("valid pattern"));

/// Raw output of a recognition pass. `confidence` is in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrResult {
    pub text: String,
    pub confidence: f64,
}

/// Seam for an external text-recognition engine.
pub trait OcrEngine {
    fn recognize(&self, image: &[u8]) -> Result<OcrResult>;
}

/// Field guesses pulled straight from OCR text, before parser enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OcrExtraction {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// OCR guesses merged with a parser run over them.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub event_type: EventType,
    pub description: String,
    pub ocr_confidence: f64,
    pub parse_confidence: f64,
}

impl OcrDraft {
    pub fn into_calendar_event(self) -> CalendarEvent {
        let mut event = CalendarEvent::new(&self.title, &self.date, &self.time, self.event_type);
        event.description = self.description;
        event.location = self.location;
        event.confidence = Some(self.parse_confidence);
        event.source = EventSource::Image;
        event
    }
}

pub fn validate_image(mime: &str, size: u64) -> Result<()> {
    if !mime.starts_with("image/") {
        anyhow::bail!("Please select a valid image file");
    }
    if size > MAX_IMAGE_BYTES {
        anyhow::bail!("Image file is too large. Please select a file smaller than 10MB");
    }
    Ok(())
}

/// Normalizes recognizer output line by line.
///
/// Runs of whitespace collapse to one space, `|` and `\` artifacts are
/// dropped, and `0`/`1` read inside mostly-alphabetic words become `O`/`I`.
pub fn clean_ocr_text(text: &str) -> String {
    text.lines()
        .map(|line| {
            line.replace(['|', '\\'], "")
                .split_whitespace()
                .map(fix_misread_digits)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn fix_misread_digits(word: &str) -> String {
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    let digits = word.chars().filter(|c| c.is_ascii_digit()).count();
    if digits > 0 && letters > digits {
        word.replace('0', "O").replace('1', "I")
    } else {
        word.to_string()
    }
}

fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}

pub fn extract_event_from_ocr(ocr_text: &str) -> OcrExtraction {
    let text = ocr_text.to_lowercase();
    let lines: Vec<&str> = ocr_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut extracted = OcrExtraction {
        title: lines.first().map(|l| l.to_string()),
        date: first_match(&DATE_PATTERNS, &text),
        time: first_match(&TIME_PATTERNS, &text),
        location: lines
            .iter()
            .find(|l| LOCATION_LINE.is_match(&l.to_lowercase()))
            .map(|l| l.to_string()),
        description: None,
    };

    if ONLINE_HINT.is_match(&text) {
        extracted.location = Some("Online".to_string());
    }

    let used: Vec<String> = [
        &extracted.title,
        &extracted.date,
        &extracted.time,
        &extracted.location,
    ]
    .into_iter()
    .flatten()
    .map(|u| u.to_lowercase())
    .collect();

    let remaining: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| {
            let lower = line.to_lowercase();
            !used.iter().any(|u| lower.contains(u.as_str()))
        })
        .collect();

    if !remaining.is_empty() {
        let joined = remaining.join(" ");
        extracted.description = Some(format!(
            "{}...",
            joined.chars().take(DESCRIPTION_LIMIT).collect::<String>()
        ));
    }

    extracted
}

// Slash/dash dates are handed to the parser as `M/D/Y`, ISO-ish ones as `Y-M-D`.
fn canonical_date(raw: &str) -> String {
    let year_first = raw
        .get(..4)
        .is_some_and(|head| head.chars().all(|c| c.is_ascii_digit()));
    if year_first {
        raw.replace('/', "-")
    } else {
        raw.replace('-', "/")
    }
}

/// OCR fields win; the parser fills gaps and always decides the type.
pub fn draft_from_ocr(result: &OcrResult, today: NaiveDate) -> OcrDraft {
    let extracted = extract_event_from_ocr(&result.text);
    let combined = format!(
        "{} {} {} {}",
        extracted.title.as_deref().unwrap_or(""),
        extracted.date.as_deref().unwrap_or(""),
        extracted.time.as_deref().unwrap_or(""),
        extracted.location.as_deref().unwrap_or("")
    );
    let parsed = parse_event_input_at(combined.trim(), today);

    OcrDraft {
        title: extracted.title.unwrap_or(parsed.title),
        date: extracted
            .date
            .map(|d| format_date(&canonical_date(&d), today))
            .unwrap_or(parsed.date),
        time: extracted
            .time
            .map(|t| format_time(&t))
            .unwrap_or(parsed.time),
        location: extracted.location.unwrap_or(parsed.location),
        event_type: parsed.event_type,
        description: extracted.description.unwrap_or_else(|| {
            format!(
                "Extracted from image: {}...",
                result.text.chars().take(PREVIEW_LIMIT).collect::<String>()
            )
        }),
        ocr_confidence: result.confidence,
        parse_confidence: parsed.confidence,
    }
}

/// Validate → recognize → clean → draft.
pub struct PosterImporter<E: OcrEngine> {
    engine: E,
}

impl<E: OcrEngine> PosterImporter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn import(&self, mime: &str, image: &[u8], today: NaiveDate) -> Result<OcrDraft> {
        validate_image(mime, image.len() as u64)?;

        let raw = self
            .engine
            .recognize(image)
            .context("Failed to process image. Please try again.")?;

        let cleaned = OcrResult {
            text: clean_ocr_text(&raw.text),
            confidence: raw.confidence.clamp(0.0, 1.0),
        };
        log::debug!(
            "OCR produced {} lines (confidence {:.2})",
            cleaned.text.lines().count(),
            cleaned.confidence
        );

        Ok(draft_from_ocr(&cleaned, today))
    }
}
