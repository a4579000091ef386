//! Terminal rendering for the calendar.
//!
//! Colors go through `paint`, which respects terminal detection and the
//! global `owo_colors::set_override` switch used by `--no-color`.

use event_tracker_core::grid::DAY_NAMES;
use event_tracker_core::{CalendarWidget, Event, EventForm, Filter, Timing};
use owo_colors::{OwoColorize, Stream, Style};

/// Width of one day column, including the leading space.
const CELL_WIDTH: usize = 12;

/// Event titles shown per cell before collapsing into "+N more".
const MAX_CELL_EVENTS: usize = 2;

fn paint(text: &str, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.style(style))
        .to_string()
}

fn timing_style(timing: Timing) -> Style {
    match timing {
        Timing::Past => Style::new().red(),
        Timing::Upcoming => Style::new().green(),
    }
}

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Timing {
    fn render(&self) -> String {
        paint(self.as_str(), timing_style(*self))
    }
}

/// Render the filter buttons, highlighting the active one.
pub fn render_filters(active: Filter) -> String {
    Filter::ALL
        .iter()
        .map(|filter| {
            let label = format!("[{}]", filter);
            let style = match filter {
                _ if *filter != active => Style::new().dimmed(),
                Filter::All => Style::new().blue().bold(),
                Filter::Past => Style::new().red().bold(),
                Filter::Upcoming => Style::new().green().bold(),
            };
            paint(&label, style)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shorten `text` to `width` characters, marking the cut with "…".
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn render_cell_event(event: &Event, timing: Timing) -> String {
    let label = pad(&truncate(&event.title, CELL_WIDTH - 1), CELL_WIDTH - 1);
    paint(&label, timing_style(timing))
}

/// The month view: heading, filter buttons, weekday header and six weeks.
pub fn render_month(widget: &CalendarWidget) -> String {
    let grid = widget.grid();
    let today = widget.today();
    let mut lines = Vec::new();

    lines.push(format!(
        "{}   {}",
        paint(&widget.month().title(), Style::new().bold()),
        render_filters(widget.filter())
    ));
    lines.push(String::new());

    let header: String = DAY_NAMES
        .iter()
        .map(|name| format!(" {}", pad(name, CELL_WIDTH - 1)))
        .collect();
    lines.push(paint(&header, Style::new().bold()));

    for week in grid.weeks() {
        let cells: Vec<Vec<&Event>> = week.iter().map(|d| widget.events_on(d.date)).collect();
        let rows = cells
            .iter()
            .map(|events| events.len().min(MAX_CELL_EVENTS + 1))
            .max()
            .unwrap_or(0);

        let mut number_line = String::new();
        for day in week {
            let number = pad(&day.day.to_string(), CELL_WIDTH - 1);
            let styled = if day.date == today {
                paint(&number, Style::new().reversed().bold())
            } else if !day.in_current_month {
                paint(&number, Style::new().dimmed())
            } else {
                number
            };
            number_line.push(' ');
            number_line.push_str(&styled);
        }
        lines.push(number_line);

        for row in 0..rows {
            let mut line = String::new();
            for events in &cells {
                line.push(' ');
                let text = if row < MAX_CELL_EVENTS {
                    events
                        .get(row)
                        .map(|e| render_cell_event(e, widget.timing(e)))
                } else if events.len() > MAX_CELL_EVENTS {
                    let more = format!("+{} more", events.len() - MAX_CELL_EVENTS);
                    Some(paint(&pad(&more, CELL_WIDTH - 1), Style::new().dimmed()))
                } else {
                    None
                };
                line.push_str(&text.unwrap_or_else(|| " ".repeat(CELL_WIDTH - 1)));
            }
            lines.push(line.trim_end().to_string());
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

/// The View dialog body.
pub fn render_event_details(event: &Event, timing: Timing) -> String {
    let dim = Style::new().dimmed();
    [
        format!(
            "{} {}",
            paint(&event.title, Style::new().bold()),
            paint(&format!("#{}", event.id), dim)
        ),
        format!("  {} {}", paint("Date:", dim), event.date.format("%a %b %-d, %Y")),
        format!("  {} {}", paint("Location:", dim), event.location),
        format!("  {} {}", paint("Status:", dim), timing.render()),
    ]
    .join("\n")
}

/// Inline form errors, one per line.
pub fn render_form_errors(form: &EventForm) -> Vec<String> {
    [&form.title_error, &form.location_error]
        .into_iter()
        .flatten()
        .map(|e| format!("  {}", paint(&e.to_string(), Style::new().red())))
        .collect()
}

/// One line per event for listings.
pub fn render_event_line(event: &Event, timing: Timing) -> String {
    let dim = Style::new().dimmed();
    format!(
        "  {} {} {}",
        paint(&format!("#{:<4}", event.id), dim),
        paint(&event.title, timing_style(timing)),
        paint(&format!("@ {}", event.location), dim)
    )
}
