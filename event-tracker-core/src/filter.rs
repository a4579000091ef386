//! Past/upcoming classification and event filtering.
//!
//! Classification compares calendar days only: an event dated today is
//! upcoming regardless of the current time of day.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::event::Event;

/// Whether an event lies before today or on/after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    Past,
    Upcoming,
}

impl Timing {
    pub fn as_str(self) -> &'static str {
        match self {
            Timing::Past => "past",
            Timing::Upcoming => "upcoming",
        }
    }
}

/// Reference point for classification. Accepts a plain date or a date-time,
/// whose time of day is dropped.
pub trait Today {
    fn day(&self) -> NaiveDate;
}

impl Today for NaiveDate {
    fn day(&self) -> NaiveDate {
        *self
    }
}

impl Today for NaiveDateTime {
    fn day(&self) -> NaiveDate {
        self.date()
    }
}

pub fn classify(date: NaiveDate, today: &impl Today) -> Timing {
    if date < today.day() {
        Timing::Past
    } else {
        Timing::Upcoming
    }
}

pub fn is_past(date: NaiveDate, today: &impl Today) -> bool {
    classify(date, today) == Timing::Past
}

pub fn is_upcoming(date: NaiveDate, today: &impl Today) -> bool {
    classify(date, today) == Timing::Upcoming
}

/// The event list filter selected in the header.
///
/// Deserializes through `FromStr`, so config values are case-insensitive too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Filter {
    #[default]
    All,
    Past,
    Upcoming,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Past, Filter::Upcoming];

    pub fn matches(self, event: &Event, today: &impl Today) -> bool {
        match self {
            Filter::All => true,
            Filter::Past => is_past(event.date, today),
            Filter::Upcoming => is_upcoming(event.date, today),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Filter::All => "All",
            Filter::Past => "Past",
            Filter::Upcoming => "Upcoming",
        };
        f.write_str(name)
    }
}

impl FromStr for Filter {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "past" => Ok(Filter::Past),
            "upcoming" => Ok(Filter::Upcoming),
            _ => Err(TrackerError::InvalidFilter(s.to_string())),
        }
    }
}

impl TryFrom<String> for Filter {
    type Error = TrackerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Events passing `filter`, in their original order.
pub fn apply<'a>(
    filter: Filter,
    events: impl IntoIterator<Item = &'a Event>,
    today: &impl Today,
) -> Vec<&'a Event> {
    events
        .into_iter()
        .filter(|event| filter.matches(event, today))
        .collect()
}
