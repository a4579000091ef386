//! Interactive calendar session.
//!
//! The month view is redrawn after every action. Day cells, event buttons
//! and the create/view/edit dialogs become prompts; all state changes go
//! through `CalendarWidget`.

use anyhow::Result;
use dialoguer::{Input, Select};
use event_tracker_core::{CalendarWidget, DateClick, Dialog, EventId, Filter};
use owo_colors::{OwoColorize, Stream};

use crate::dates::parse_day_input;
use crate::render::{render_event_details, render_form_errors, render_month};

#[derive(Clone, Copy)]
enum Action {
    OpenDay,
    OpenEvent,
    PrevMonth,
    NextMonth,
    Today,
    Filter,
    Quit,
}

impl Action {
    const ALL: [Action; 7] = [
        Action::OpenDay,
        Action::OpenEvent,
        Action::PrevMonth,
        Action::NextMonth,
        Action::Today,
        Action::Filter,
        Action::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::OpenDay => "Open a day",
            Action::OpenEvent => "Open an event by id",
            Action::PrevMonth => "← Prev",
            Action::NextMonth => "Next →",
            Action::Today => "Today",
            Action::Filter => "Filter",
            Action::Quit => "Quit",
        }
    }
}

pub fn run(mut widget: CalendarWidget) -> Result<()> {
    let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();

    loop {
        println!();
        println!("{}", render_month(&widget));

        let selection = Select::new()
            .with_prompt("  Action")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[selection] {
            Action::OpenDay => open_day(&mut widget)?,
            Action::OpenEvent => open_event(&mut widget)?,
            Action::PrevMonth => navigate(&mut widget, -1),
            Action::NextMonth => navigate(&mut widget, 1),
            Action::Today => widget.go_to_today(),
            Action::Filter => choose_filter(&mut widget)?,
            Action::Quit => return Ok(()),
        }
    }
}

fn print_error(message: &str) {
    eprintln!(
        "  {}",
        message.if_supports_color(Stream::Stderr, |t| t.red())
    );
}

fn print_success(message: &str) {
    println!(
        "{}",
        format!("  {}", message).if_supports_color(Stream::Stdout, |t| t.green())
    );
}

fn navigate(widget: &mut CalendarWidget, delta: i32) {
    if let Err(e) = widget.navigate_month(delta) {
        print_error(&e.to_string());
    }
}

fn choose_filter(widget: &mut CalendarWidget) -> Result<()> {
    let names: Vec<String> = Filter::ALL.iter().map(|f| f.to_string()).collect();
    let current = Filter::ALL
        .iter()
        .position(|f| *f == widget.filter())
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("  Show")
        .items(&names)
        .default(current)
        .interact()?;

    widget.set_filter(Filter::ALL[selection]);
    Ok(())
}

fn open_day(widget: &mut CalendarWidget) -> Result<()> {
    let month = widget.month();
    let date = loop {
        let input: String = Input::new()
            .with_prompt(format!("  Day ({}, or a date)", month.title()))
            .interact_text()?;
        match parse_day_input(&input, month) {
            Ok(date) => break date,
            Err(e) => print_error(&e.to_string()),
        }
    };

    match widget.click_date(date) {
        DateClick::Ignored => {
            print_error(&format!(
                "{} is not in {}",
                date.format("%Y-%m-%d"),
                month.title()
            ));
            Ok(())
        }
        DateClick::OpenedEvent(_) => view_dialog(widget),
        DateClick::OpenedCreate(_) => form_dialog(widget),
    }
}

fn open_event(widget: &mut CalendarWidget) -> Result<()> {
    let id: u64 = Input::new().with_prompt("  Event id").interact_text()?;

    match widget.click_event(EventId(id)) {
        Ok(()) => view_dialog(widget),
        Err(e) => {
            print_error(&e.to_string());
            Ok(())
        }
    }
}

fn view_dialog(widget: &mut CalendarWidget) -> Result<()> {
    let Some(event) = widget.selected_event().cloned() else {
        widget.close();
        return Ok(());
    };
    println!();
    println!("{}", render_event_details(&event, widget.timing(&event)));

    let selection = Select::new()
        .with_prompt("  Event")
        .items(&["Edit", "Delete", "Close"])
        .default(2)
        .interact()?;

    match selection {
        0 => {
            widget.begin_edit()?;
            form_dialog(widget)
        }
        1 => {
            let removed = widget.delete_selected()?;
            print_success(&format!("Deleted: {}", removed));
            Ok(())
        }
        _ => {
            widget.close();
            Ok(())
        }
    }
}

/// The create or edit form. The widget validates each field as it is set and
/// its inline errors are shown before the Save / Edit again choice.
fn form_dialog(widget: &mut CalendarWidget) -> Result<()> {
    let heading = match widget.dialog() {
        Dialog::Create { date } => format!("Create event on {}", date.format("%a %b %-d, %Y")),
        Dialog::Edit { .. } => "Edit event".to_string(),
        _ => return Ok(()),
    };
    println!();
    println!("  {}", heading.if_supports_color(Stream::Stdout, |t| t.bold()));

    loop {
        let title: String = Input::new()
            .with_prompt("  Event Title")
            .with_initial_text(widget.form().title.clone())
            .allow_empty(true)
            .interact_text()?;
        widget.set_title(title);

        let location: String = Input::new()
            .with_prompt("  Event Location")
            .with_initial_text(widget.form().location.clone())
            .allow_empty(true)
            .interact_text()?;
        widget.set_location(location);

        for line in render_form_errors(widget.form()) {
            eprintln!("{}", line);
        }

        let save_enabled = widget.can_save();
        let selection = Select::new()
            .with_prompt("  ")
            .items(form_choices(save_enabled))
            .default(0)
            .interact()?;

        if selection == 1 {
            widget.close();
            return Ok(());
        }
        if !save_enabled {
            continue;
        }

        let creating = matches!(widget.dialog(), Dialog::Create { .. });
        let id = widget.submit()?;
        let verb = if creating { "Created" } else { "Saved" };
        if let Some(event) = widget.store().get(id) {
            print_success(&format!("{}: {}", verb, event));
        }
        return Ok(());
    }
}

fn form_choices(save_enabled: bool) -> &'static [&'static str] {
    if save_enabled {
        &["Save", "Cancel"]
    } else {
        &["Edit again", "Cancel"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use event_tracker_core::EventStore;

    fn widget_with_create_form() -> CalendarWidget {
        let today = NaiveDate::from_ymd_opt(2025, 8, 28).unwrap();
        let mut widget = CalendarWidget::new(EventStore::new(), today).unwrap();
        widget.click_date(NaiveDate::from_ymd_opt(2025, 8, 12).unwrap());
        widget
    }

    #[test]
    fn invalid_fields_offer_edit_again_with_inline_errors() {
        owo_colors::set_override(false);
        let mut widget = widget_with_create_form();
        widget.set_title("ab");
        widget.set_location("");

        assert_eq!(form_choices(widget.can_save()), &["Edit again", "Cancel"]);
        assert_eq!(
            render_form_errors(widget.form()),
            vec![
                "  Event title must be at least 3 characters long".to_string(),
                "  Event location is required".to_string(),
            ]
        );
    }

    #[test]
    fn valid_fields_offer_save() {
        let mut widget = widget_with_create_form();
        widget.set_title("Team offsite");
        widget.set_location("Lake house");

        assert_eq!(form_choices(widget.can_save()), &["Save", "Cancel"]);
        assert!(render_form_errors(widget.form()).is_empty());
    }
}
