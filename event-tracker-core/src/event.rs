//! Event types.
//!
//! An event is a single dated entry with a title and a location. Events are
//! kept in memory only; see [`crate::store::EventStore`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of an event, unique within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub location: String,
    /// Calendar day of the event. Events carry no time of day.
    pub date: NaiveDate,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.title, self.location)
    }
}

/// Title and location as typed into the event form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub location: String,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, location: impl Into<String>) -> Self {
        EventDraft {
            title: title.into(),
            location: location.into(),
        }
    }
}
