//! In-memory event list.
//!
//! Events live only as long as the store. Order is insertion order, which is
//! also the order events are listed in a day cell.

use chrono::{Days, NaiveDate};
use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::event::{Event, EventDraft, EventId};
use crate::filter::{Filter, Today};
use crate::validation::validate_draft;

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
    next_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore {
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// A store holding the three sample events shown on first launch:
    /// two in the past and one coming up, all relative to `today`.
    pub fn with_demo_events(today: NaiveDate) -> Self {
        let mut store = Self::new();
        let samples = [
            ("Past Event", "Test Location", today.checked_sub_days(Days::new(8))),
            ("Another Past Event", "Past Location", today.checked_sub_days(Days::new(3))),
            ("Upcoming Event", "Future Location", today.checked_add_days(Days::new(2))),
        ];

        for (title, location, date) in samples {
            if let Some(date) = date {
                store.insert(title.to_string(), location.to_string(), date);
            }
        }

        store
    }

    fn allocate_id(&mut self) -> EventId {
        let id = EventId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    fn insert(&mut self, title: String, location: String, date: NaiveDate) -> &Event {
        let id = self.allocate_id();
        self.events.push(Event {
            id,
            title,
            location,
            date,
        });
        &self.events[self.events.len() - 1]
    }

    /// Validate `draft` and add it as a new event on `date`.
    pub fn create(&mut self, draft: &EventDraft, date: NaiveDate) -> TrackerResult<&Event> {
        validate_draft(draft).map_err(TrackerError::Validation)?;

        let event = self.insert(
            draft.title.trim().to_string(),
            draft.location.trim().to_string(),
            date,
        );
        info!(id = %event.id, date = %event.date, title = %event.title, "created event");
        Ok(event)
    }

    /// Replace the title and location of an existing event.
    /// The event keeps its id and date.
    pub fn update(&mut self, id: EventId, draft: &EventDraft) -> TrackerResult<&Event> {
        validate_draft(draft).map_err(TrackerError::Validation)?;

        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(TrackerError::EventNotFound(id))?;

        event.title = draft.title.trim().to_string();
        event.location = draft.location.trim().to_string();
        info!(id = %event.id, title = %event.title, "updated event");
        Ok(event)
    }

    pub fn delete(&mut self, id: EventId) -> TrackerResult<Event> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(TrackerError::EventNotFound(id))?;

        let removed = self.events.remove(index);
        info!(id = %removed.id, title = %removed.title, "deleted event");
        Ok(removed)
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events passing `filter`, in insertion order.
    pub fn filtered(&self, filter: Filter, today: &impl Today) -> Vec<&Event> {
        crate::filter::apply(filter, &self.events, today)
    }

    /// Events on `date` that pass `filter`, in insertion order.
    pub fn events_on(&self, date: NaiveDate, filter: Filter, today: &impl Today) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.date == date && filter.matches(e, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, FieldError};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn create_trims_and_appends() {
        let mut store = EventStore::new();
        let event = store
            .create(&EventDraft::new("  Dinner  ", " Home "), date(2025, 8, 30))
            .unwrap()
            .clone();

        assert_eq!(event.title, "Dinner");
        assert_eq!(event.location, "Home");
        assert_eq!(event.date, date(2025, 8, 30));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(event.id), Some(&event));
    }

    #[test]
    fn create_rejects_invalid_drafts() {
        let mut store = EventStore::new();
        let err = store
            .create(&EventDraft::new("ab", "x"), date(2025, 8, 30))
            .unwrap_err();

        match err {
            TrackerError::Validation(errors) => {
                assert_eq!(errors.title, Some(FieldError::TooShort(Field::Title)));
                assert_eq!(errors.location, Some(FieldError::TooShort(Field::Location)));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn ids_are_unique_after_deletes() {
        let mut store = EventStore::new();
        let a = store.create(&EventDraft::new("First", "AA"), date(2025, 1, 1)).unwrap().id;
        let b = store.create(&EventDraft::new("Second", "BB"), date(2025, 1, 2)).unwrap().id;
        store.delete(b).unwrap();
        let c = store.create(&EventDraft::new("Third", "CC"), date(2025, 1, 3)).unwrap().id;

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn update_changes_title_and_location_only() {
        let mut store = EventStore::new();
        let id = store
            .create(&EventDraft::new("Gym", "Downtown"), date(2025, 8, 20))
            .unwrap()
            .id;

        let updated = store.update(id, &EventDraft::new(" Yoga class ", "Studio 2")).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.title, "Yoga class");
        assert_eq!(updated.location, "Studio 2");
        assert_eq!(updated.date, date(2025, 8, 20));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_validates_and_leaves_event_untouched_on_error() {
        let mut store = EventStore::new();
        let id = store
            .create(&EventDraft::new("Gym", "Downtown"), date(2025, 8, 20))
            .unwrap()
            .id;

        assert!(store.update(id, &EventDraft::new("", "Downtown")).is_err());
        assert_eq!(store.get(id).unwrap().title, "Gym");
    }

    #[test]
    fn update_and_delete_unknown_id() {
        let mut store = EventStore::new();
        assert!(matches!(
            store.update(EventId(99), &EventDraft::new("Valid", "Valid")),
            Err(TrackerError::EventNotFound(EventId(99)))
        ));
        assert!(matches!(
            store.delete(EventId(99)),
            Err(TrackerError::EventNotFound(EventId(99)))
        ));
    }

    #[test]
    fn delete_removes_only_that_event() {
        let mut store = EventStore::with_demo_events(date(2025, 8, 28));
        let ids: Vec<EventId> = store.iter().map(|e| e.id).collect();

        let removed = store.delete(ids[1]).unwrap();
        assert_eq!(removed.title, "Another Past Event");

        let remaining: Vec<EventId> = store.iter().map(|e| e.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2]]);
    }

    #[test]
    fn demo_events_are_relative_to_today() {
        let today = date(2025, 8, 28);
        let store = EventStore::with_demo_events(today);
        let dates: Vec<NaiveDate> = store.iter().map(|e| e.date).collect();

        assert_eq!(dates, vec![date(2025, 8, 20), date(2025, 8, 25), date(2025, 8, 30)]);
        assert_eq!(store.filtered(Filter::Past, &today).len(), 2);
        assert_eq!(store.filtered(Filter::Upcoming, &today).len(), 1);
        assert_eq!(store.filtered(Filter::All, &today).len(), 3);
    }

    #[test]
    fn events_on_respects_filter_and_order() {
        let today = date(2025, 8, 28);
        let mut store = EventStore::new();
        let day = date(2025, 8, 25);
        store.create(&EventDraft::new("Morning run", "Park"), day).unwrap();
        store.create(&EventDraft::new("Book club", "Library"), day).unwrap();
        store.create(&EventDraft::new("Other day", "Home"), date(2025, 8, 26)).unwrap();

        let titles: Vec<&str> = store
            .events_on(day, Filter::All, &today)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Morning run", "Book club"]);

        assert_eq!(store.events_on(day, Filter::Past, &today).len(), 2);
        assert!(store.events_on(day, Filter::Upcoming, &today).is_empty());
    }
}
