//! Error types for the event tracker.

use thiserror::Error;

use crate::event::EventId;
use crate::validation::FormErrors;

/// Errors that can occur in event tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid event: {0}")]
    Validation(FormErrors),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown filter '{0}'. Expected All, Past or Upcoming")]
    InvalidFilter(String),

    #[error("No dialog is open")]
    NoDialog,

    #[error("Expected the {expected} dialog, but the {actual} dialog is open")]
    WrongDialog {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Result type alias for event tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
