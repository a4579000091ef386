//! Calendar widget state.
//!
//! `CalendarWidget` holds everything the calendar view needs between user
//! actions: the event list, the active filter, the displayed month, which
//! dialog is open and the contents of the event form. Front ends call the
//! action methods and redraw from the accessors.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::event::{Event, EventDraft, EventId};
use crate::filter::{Filter, Timing, classify};
use crate::grid::{MonthGrid, YearMonth};
use crate::store::EventStore;
use crate::validation::{FieldError, validate_draft, validate_location, validate_title};

/// The dialog currently shown over the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    Closed,
    /// New event form for a day
    Create { date: NaiveDate },
    /// Read-only event details with Edit and Delete
    View { event_id: EventId },
    /// Edit form for an existing event
    Edit { event_id: EventId },
}

impl Dialog {
    pub fn name(&self) -> &'static str {
        match self {
            Dialog::Closed => "closed",
            Dialog::Create { .. } => "create",
            Dialog::View { .. } => "view",
            Dialog::Edit { .. } => "edit",
        }
    }
}

/// Contents of the create/edit form and its inline errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub location: String,
    pub title_error: Option<FieldError>,
    pub location_error: Option<FieldError>,
}

impl EventForm {
    fn for_event(event: &Event) -> Self {
        EventForm {
            title: event.title.clone(),
            location: event.location.clone(),
            ..Default::default()
        }
    }

    fn draft(&self) -> EventDraft {
        EventDraft::new(self.title.clone(), self.location.clone())
    }

    pub fn has_errors(&self) -> bool {
        self.title_error.is_some() || self.location_error.is_some()
    }
}

/// Outcome of clicking a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateClick {
    /// The day belongs to an adjacent month; nothing happened
    Ignored,
    /// The day had events; the first is shown
    OpenedEvent(EventId),
    /// The day was empty; the create form is open
    OpenedCreate(NaiveDate),
}

/// What a submitted form writes to.
enum FormTarget {
    Create(NaiveDate),
    Edit(EventId),
}

#[derive(Debug, Clone)]
pub struct CalendarWidget {
    store: EventStore,
    filter: Filter,
    month: YearMonth,
    today: NaiveDate,
    today_month: YearMonth,
    dialog: Dialog,
    form: EventForm,
}

impl CalendarWidget {
    /// A widget showing the month of `today` over `store`. Fails when that
    /// month's grid cannot be represented.
    pub fn new(store: EventStore, today: NaiveDate) -> TrackerResult<Self> {
        let today_month = YearMonth::of(today)?;
        Ok(CalendarWidget {
            store,
            filter: Filter::All,
            month: today_month,
            today,
            today_month,
            dialog: Dialog::Closed,
            form: EventForm::default(),
        })
    }

    // --- accessors ---

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::for_month(self.month)
    }

    /// Events shown in the cell for `date` under the active filter.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.store.events_on(date, self.filter, &self.today)
    }

    /// Every event passing the active filter.
    pub fn visible_events(&self) -> Vec<&Event> {
        self.store.filtered(self.filter, &self.today)
    }

    pub fn timing(&self, event: &Event) -> Timing {
        classify(event.date, &self.today)
    }

    /// The event behind a View or Edit dialog.
    pub fn selected_event(&self) -> Option<&Event> {
        match self.dialog {
            Dialog::View { event_id } | Dialog::Edit { event_id } => self.store.get(event_id),
            _ => None,
        }
    }

    // --- header and navigation ---

    pub fn set_filter(&mut self, filter: Filter) {
        debug!(%filter, "filter changed");
        self.filter = filter;
    }

    /// Move the displayed month by `delta`. The month is left unchanged if
    /// the target is out of range.
    pub fn navigate_month(&mut self, delta: i32) -> TrackerResult<()> {
        self.month = self.month.offset(delta)?;
        debug!(month = %self.month, "navigated");
        Ok(())
    }

    pub fn go_to_month(&mut self, month: YearMonth) {
        self.month = month;
        debug!(month = %self.month, "navigated");
    }

    pub fn go_to_today(&mut self) {
        self.go_to_month(self.today_month);
    }

    // --- grid interaction ---

    /// Click on a day cell. Days of adjacent months are not clickable.
    pub fn click_date(&mut self, date: NaiveDate) -> DateClick {
        let in_month = self.grid().cell(date).is_some_and(|cell| cell.in_current_month);
        if !in_month {
            return DateClick::Ignored;
        }

        let first = self.events_on(date).first().map(|e| e.id);
        match first {
            Some(event_id) => {
                self.open(Dialog::View { event_id });
                DateClick::OpenedEvent(event_id)
            }
            None => {
                self.form = EventForm::default();
                self.open(Dialog::Create { date });
                DateClick::OpenedCreate(date)
            }
        }
    }

    /// Click on an event shown in a cell.
    pub fn click_event(&mut self, event_id: EventId) -> TrackerResult<()> {
        if self.store.get(event_id).is_none() {
            return Err(TrackerError::EventNotFound(event_id));
        }
        self.open(Dialog::View { event_id });
        Ok(())
    }

    fn open(&mut self, dialog: Dialog) {
        debug!(dialog = dialog.name(), "dialog opened");
        self.dialog = dialog;
    }

    // --- form ---

    pub fn set_title(&mut self, input: impl Into<String>) {
        self.form.title = input.into();
        self.form.title_error = validate_title(&self.form.title).err();
    }

    pub fn set_location(&mut self, input: impl Into<String>) {
        self.form.location = input.into();
        self.form.location_error = validate_location(&self.form.location).err();
    }

    /// Whether the Save button is enabled.
    pub fn can_save(&self) -> bool {
        !self.form.has_errors()
            && !self.form.title.trim().is_empty()
            && !self.form.location.trim().is_empty()
    }

    /// Save the open create or edit form.
    ///
    /// Fails with `NoDialog` or `WrongDialog` before looking at the form when
    /// no form is open. On validation failure both field errors are stored on
    /// the form and the dialog stays open.
    pub fn submit(&mut self) -> TrackerResult<EventId> {
        let target = self.expect_form()?;

        let draft = self.form.draft();
        if let Err(errors) = validate_draft(&draft) {
            self.form.title_error = errors.title.clone();
            self.form.location_error = errors.location.clone();
            return Err(TrackerError::Validation(errors));
        }

        let id = match target {
            FormTarget::Create(date) => self.store.create(&draft, date)?.id,
            FormTarget::Edit(event_id) => self.store.update(event_id, &draft)?.id,
        };

        self.close();
        Ok(id)
    }

    /// Switch from the View dialog to the Edit form for the same event.
    pub fn begin_edit(&mut self) -> TrackerResult<()> {
        let event_id = self.expect_view()?;
        let event = self
            .store
            .get(event_id)
            .ok_or(TrackerError::EventNotFound(event_id))?;

        self.form = EventForm::for_event(event);
        self.open(Dialog::Edit { event_id });
        Ok(())
    }

    /// Delete the event shown in the View dialog and close it.
    pub fn delete_selected(&mut self) -> TrackerResult<Event> {
        let event_id = self.expect_view()?;
        let removed = self.store.delete(event_id)?;
        self.close();
        Ok(removed)
    }

    /// Close whatever dialog is open and reset the form.
    pub fn close(&mut self) {
        if self.dialog != Dialog::Closed {
            debug!(dialog = self.dialog.name(), "dialog closed");
        }
        self.dialog = Dialog::Closed;
        self.form = EventForm::default();
    }

    fn expect_form(&self) -> TrackerResult<FormTarget> {
        match self.dialog {
            Dialog::Create { date } => Ok(FormTarget::Create(date)),
            Dialog::Edit { event_id } => Ok(FormTarget::Edit(event_id)),
            Dialog::Closed => Err(TrackerError::NoDialog),
            other => Err(TrackerError::WrongDialog {
                expected: "create or edit",
                actual: other.name(),
            }),
        }
    }

    fn expect_view(&self) -> TrackerResult<EventId> {
        match self.dialog {
            Dialog::View { event_id } => Ok(event_id),
            Dialog::Closed => Err(TrackerError::NoDialog),
            other => Err(TrackerError::WrongDialog {
                expected: "view",
                actual: other.name(),
            }),
        }
    }
}
