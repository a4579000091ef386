//! Month grid generation.
//!
//! A month is always laid out as six Sunday-first weeks (42 cells): the tail
//! of the previous month, every day of the month itself, then the head of
//! the next month.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

pub const GRID_DAYS: usize = 42;
pub const WEEK_DAYS: usize = 7;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A calendar month whose whole 42-day grid is representable.
///
/// Every constructor checks that the Sunday before the first of the month
/// and the 41 days after it are valid dates, so a grid can always be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
    grid_start: NaiveDate,
}

impl YearMonth {
    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> TrackerResult<Self> {
        let out_of_range = || TrackerError::InvalidDate(format!("{}-{:02}", year, month));
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let leading = first.weekday().num_days_from_sunday() as u64;
        let grid_start = first
            .checked_sub_days(Days::new(leading))
            .filter(|start| start.checked_add_days(Days::new(GRID_DAYS as u64 - 1)).is_some())
            .ok_or_else(out_of_range)?;
        Ok(YearMonth { first, grid_start })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> TrackerResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> TrackerResult<Self> {
        let invalid = || TrackerError::InvalidDate(format!("'{}'. Expected YYYY-MM", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        (29..=31)
            .rev()
            .find(|&day| NaiveDate::from_ymd_opt(self.year(), self.month(), day).is_some())
            .unwrap_or(28)
    }

    /// Move by `delta` months, crossing year boundaries as needed. Fails
    /// when the target month's grid would leave chrono's date range.
    pub fn offset(&self, delta: i32) -> TrackerResult<Self> {
        let out_of_range =
            || TrackerError::InvalidDate(format!("{} moved by {} months", self, delta));
        let index = self
            .year()
            .checked_mul(12)
            .and_then(|i| i.checked_add(self.month() as i32 - 1))
            .and_then(|i| i.checked_add(delta))
            .ok_or_else(out_of_range)?;
        Self::new(index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
            .map_err(|_| out_of_range())
    }

    pub fn prev(&self) -> TrackerResult<Self> {
        self.offset(-1)
    }

    pub fn next(&self) -> TrackerResult<Self> {
        self.offset(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Month heading, e.g. "August 2025"
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month() as usize - 1], self.year())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month())
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDay {
    pub date: NaiveDate,
    /// Day of month shown in the cell
    pub day: u32,
    /// False for the leading and trailing days of adjacent months
    pub in_current_month: bool,
}

/// The 42-cell grid for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    days: Vec<GridDay>,
}

impl MonthGrid {
    pub fn for_month(month: YearMonth) -> Self {
        // `YearMonth` guarantees all 42 days from `grid_start` exist.
        let days = month
            .grid_start
            .iter_days()
            .take(GRID_DAYS)
            .map(|date| GridDay {
                date,
                day: date.day(),
                in_current_month: month.contains(date),
            })
            .collect();

        MonthGrid { month, days }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn days(&self) -> &[GridDay] {
        &self.days
    }

    /// Six rows of seven cells, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridDay]> {
        self.days.chunks(WEEK_DAYS)
    }

    /// The cell for `date`, if the grid shows it.
    pub fn cell(&self, date: NaiveDate) -> Option<&GridDay> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn first_date(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.days[GRID_DAYS - 1].date
    }
}
