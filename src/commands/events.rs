use anyhow::{Context, Result};
use chrono::NaiveDate;
use event_tracker_core::{CalendarWidget, Event, Filter, Timing};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::render::render_event_line;

/// An event as printed by `events --json`.
#[derive(Serialize)]
struct EventEntry<'a> {
    #[serde(flatten)]
    event: &'a Event,
    timing: Timing,
}

pub fn run(mut widget: CalendarWidget, filter: Option<Filter>, json: bool) -> Result<()> {
    if let Some(filter) = filter {
        widget.set_filter(filter);
    }

    let mut events = widget.visible_events();
    // Stable sort keeps insertion order within a day
    events.sort_by_key(|e| e.date);

    if json {
        let entries: Vec<EventEntry> = events
            .iter()
            .map(|&event| EventEntry {
                event,
                timing: widget.timing(event),
            })
            .collect();
        let out = serde_json::to_string_pretty(&entries).context("Failed to serialize events")?;
        println!("{}", out);
        return Ok(());
    }

    if events.is_empty() {
        println!(
            "{}",
            "No events found".if_supports_color(Stream::Stdout, |t| t.dimmed())
        );
        return Ok(());
    }

    let mut current_date: Option<NaiveDate> = None;

    for event in &events {
        if current_date != Some(event.date) {
            if current_date.is_some() {
                println!();
            }
            let label = format_date_label(event.date, widget.today());
            println!("{}", label.if_supports_color(Stream::Stdout, |t| t.bold()));
            current_date = Some(event.date);
        }

        println!("{}", render_event_line(event, widget.timing(event)));
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Aug 20, 2025")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        -1 => "Yesterday".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_tracker_core::EventId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn relative_labels_near_today() {
        let today = date(2025, 8, 28);
        assert_eq!(format_date_label(date(2025, 8, 27), today), "Yesterday");
        assert_eq!(format_date_label(today, today), "Today");
        assert_eq!(format_date_label(date(2025, 8, 29), today), "Tomorrow");
        assert_eq!(format_date_label(date(2025, 8, 20), today), "Wed Aug 20, 2025");
    }

    #[test]
    fn json_entry_flattens_event() {
        let event = Event {
            id: EventId(3),
            title: "Upcoming Event".into(),
            location: "Future Location".into(),
            date: date(2025, 8, 30),
        };
        let entry = EventEntry {
            event: &event,
            timing: Timing::Upcoming,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 3,
                "title": "Upcoming Event",
                "location": "Future Location",
                "date": "2025-08-30",
                "timing": "upcoming"
            })
        );
    }
}
