//! Parsing of dates typed on the command line or at a prompt.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use event_tracker_core::YearMonth;

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| full.to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse `YYYY-MM-DD`, falling back to natural language ("tomorrow",
/// "aug 30", "next friday"). Natural language is resolved against the
/// system clock.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}

/// Parse a day typed while a month is displayed: a bare day number refers
/// to that month, anything else goes through [`parse_date`].
pub fn parse_day_input(input: &str, month: YearMonth) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(day) = trimmed.parse::<u32>() {
        return NaiveDate::from_ymd_opt(month.year(), month.month(), day).with_context(|| {
            format!("{} has no day {}", month.title(), day)
        });
    }
    parse_date(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn august() -> YearMonth {
        YearMonth::new(2025, 8).unwrap()
    }

    #[test]
    fn iso_dates_parse_directly() {
        assert_eq!(
            parse_date("2025-08-30").unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 30).unwrap()
        );
        assert_eq!(
            parse_date("  2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn natural_language_dates() {
        let tomorrow = parse_date("tomorrow").unwrap();
        let today = chrono::Local::now().date_naive();
        assert_eq!((tomorrow - today).num_days(), 1);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_date("not a date at all xyz").is_err());
    }

    #[test]
    fn day_numbers_refer_to_displayed_month() {
        assert_eq!(
            parse_day_input("12", august()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 12).unwrap()
        );
        assert!(parse_day_input("32", august()).is_err());
        assert!(parse_day_input("0", august()).is_err());
        assert_eq!(
            parse_day_input("2025-09-01", august()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
        );
    }

    #[test]
    fn expand_preserves_non_abbreviations() {
        assert_eq!(expand_abbreviations("aug 30"), "august 30");
        assert_eq!(expand_abbreviations("next fri"), "next friday");
        assert_eq!(expand_abbreviations("tomorrow"), "tomorrow");
    }
}
