//! Event form validation.
//!
//! Both fields are trimmed before their length is checked, and lengths are
//! counted in characters rather than bytes.

use std::fmt;

use thiserror::Error;

use crate::event::EventDraft;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 100;
pub const LOCATION_MIN_LEN: usize = 2;
pub const LOCATION_MAX_LEN: usize = 200;

/// Which form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Location,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Title => "Event title",
            Field::Location => "Event location",
        }
    }

    fn min_len(self) -> usize {
        match self {
            Field::Title => TITLE_MIN_LEN,
            Field::Location => LOCATION_MIN_LEN,
        }
    }

    fn max_len(self) -> usize {
        match self {
            Field::Title => TITLE_MAX_LEN,
            Field::Location => LOCATION_MAX_LEN,
        }
    }
}

/// A single field's validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(Field),

    #[error("{} must be at least {} characters long", .0.label(), .0.min_len())]
    TooShort(Field),

    #[error("{} must be less than {} characters", .0.label(), .0.max_len())]
    TooLong(Field),
}

/// Validation results for both form fields at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub title: Option<FieldError>,
    pub location: Option<FieldError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.location.is_none()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = [&self.title, &self.location]
            .into_iter()
            .flatten()
            .map(|e| e.to_string())
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

fn validate_field(field: Field, input: &str) -> Result<(), FieldError> {
    let trimmed_len = input.trim().chars().count();
    if trimmed_len == 0 {
        return Err(FieldError::Required(field));
    }
    if trimmed_len < field.min_len() {
        return Err(FieldError::TooShort(field));
    }
    if trimmed_len > field.max_len() {
        return Err(FieldError::TooLong(field));
    }
    Ok(())
}

pub fn validate_title(input: &str) -> Result<(), FieldError> {
    validate_field(Field::Title, input)
}

pub fn validate_location(input: &str) -> Result<(), FieldError> {
    validate_field(Field::Location, input)
}

/// Validate both fields of a draft, collecting every error.
pub fn validate_draft(draft: &EventDraft) -> Result<(), FormErrors> {
    let errors = FormErrors {
        title: validate_title(&draft.title).err(),
        location: validate_location(&draft.location).err(),
    };

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_required() {
        assert_eq!(validate_title(""), Err(FieldError::Required(Field::Title)));
        assert_eq!(validate_title("   "), Err(FieldError::Required(Field::Title)));
    }

    #[test]
    fn title_length_bounds() {
        assert_eq!(validate_title("ab"), Err(FieldError::TooShort(Field::Title)));
        assert_eq!(validate_title("abc"), Ok(()));
        assert_eq!(validate_title(&"x".repeat(100)), Ok(()));
        assert_eq!(
            validate_title(&"x".repeat(101)),
            Err(FieldError::TooLong(Field::Title))
        );
    }

    #[test]
    fn title_is_trimmed_before_counting() {
        assert_eq!(validate_title("  ab  "), Err(FieldError::TooShort(Field::Title)));
        assert_eq!(validate_title("  abc  "), Ok(()));
    }

    #[test]
    fn location_length_bounds() {
        assert_eq!(validate_location("a"), Err(FieldError::TooShort(Field::Location)));
        assert_eq!(validate_location("ab"), Ok(()));
        assert_eq!(validate_location(&"y".repeat(200)), Ok(()));
        assert_eq!(
            validate_location(&"y".repeat(201)),
            Err(FieldError::TooLong(Field::Location))
        );
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // three characters, nine bytes
        assert_eq!(validate_title("日本語"), Ok(()));
        assert_eq!(validate_location(&"é".repeat(200)), Ok(()));
    }

    #[test]
    fn messages_match_form_text() {
        assert_eq!(
            FieldError::Required(Field::Title).to_string(),
            "Event title is required"
        );
        assert_eq!(
            FieldError::TooShort(Field::Title).to_string(),
            "Event title must be at least 3 characters long"
        );
        assert_eq!(
            FieldError::TooLong(Field::Title).to_string(),
            "Event title must be less than 100 characters"
        );
        assert_eq!(
            FieldError::Required(Field::Location).to_string(),
            "Event location is required"
        );
        assert_eq!(
            FieldError::TooShort(Field::Location).to_string(),
            "Event location must be at least 2 characters long"
        );
        assert_eq!(
            FieldError::TooLong(Field::Location).to_string(),
            "Event location must be less than 200 characters"
        );
    }

    #[test]
    fn draft_reports_both_fields() {
        let errors = validate_draft(&EventDraft::new("x", "")).unwrap_err();
        assert_eq!(errors.title, Some(FieldError::TooShort(Field::Title)));
        assert_eq!(errors.location, Some(FieldError::Required(Field::Location)));
        assert_eq!(
            errors.to_string(),
            "Event title must be at least 3 characters long; Event location is required"
        );
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate_draft(&EventDraft::new("Team lunch", "Cafe")).is_ok());
    }

    #[test]
    fn field_errors_box_as_std_errors() {
        let err: Box<dyn std::error::Error> = Box::new(FieldError::TooLong(Field::Location));
        assert_eq!(err.to_string(), "Event location must be less than 200 characters");
        assert!(err.source().is_none());
    }
}
