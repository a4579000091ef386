//! Core types for the event tracker calendar.
//!
//! This crate holds everything that doesn't depend on a particular front end:
//! - `event` and `store` for the in-memory event list
//! - `validation` for the create/edit form rules
//! - `filter` for past/upcoming classification
//! - `grid` for the 42-day month grid
//! - `widget` for the calendar view's state machine

pub mod error;
pub mod event;
pub mod filter;
pub mod grid;
pub mod store;
pub mod validation;
pub mod widget;

pub use error::{TrackerError, TrackerResult};
pub use event::{Event, EventDraft, EventId};
pub use filter::{Filter, Timing};
pub use grid::{GridDay, MonthGrid, YearMonth};
pub use store::EventStore;
pub use widget::{CalendarWidget, DateClick, Dialog, EventForm};
