use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Travel,
    Illness,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Travel => "travel",
            EventType::Illness => "illness",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single day of a travel or illness block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRow {
    pub date: NaiveDate,
    pub event_type: EventType,
    pub intensity: u8,
    pub note: String,
}
