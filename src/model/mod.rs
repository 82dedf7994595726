// File: ./src/model/mod.rs
pub mod event;
pub mod keywords;
pub mod ocr;
pub mod parser;

pub use event::{CalendarEvent, EventSource, EventType, ParsedEvent};
pub use parser::{parse_event_input, parse_event_input_at};
