//! Event store
//!
//! Events in insertion order (or date order after a sort), with the id
//! counter owned by the store.

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::types::{Event, EventId, EventUpdate, NewEvent};

use super::sort;

/// Ordered collection of events
#[derive(Debug, Clone)]
pub struct EventStore {
    events: Vec<Event>,
    /// Next id to assign; ids are never reused
    next_id: u32,
}

impl EventStore {
    /// Create an empty store counting ids from 1
    pub fn new() -> Self {
        Self::with_next_id(1)
    }

    /// Create an empty store that hands out `next_id` first
    pub fn with_next_id(next_id: u32) -> Self {
        Self {
            events: Vec::new(),
            next_id: next_id.max(1),
        }
    }

    /// Get the next id (without incrementing)
    pub fn next_id(&self) -> EventId {
        EventId(self.next_id)
    }

    /// Append a new event; every slot starts available
    ///
    /// Fails once the counter has handed out every id below `u32::MAX`.
    pub fn add(&mut self, draft: NewEvent) -> RegistryResult<EventId> {
        let id = EventId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(RegistryError::IdsExhausted("event"))?;

        let event = Event::new(id, draft);
        debug!(event_id = %id, date = %event.date, capacity = event.capacity, "event added");
        self.events.push(event);
        Ok(id)
    }

    /// Put back a persisted event as-is
    ///
    /// Returns the event unchanged when its id is already taken or is
    /// `u32::MAX`. The counter moves past the restored id so new events never
    /// collide with it.
    pub fn restore(&mut self, event: Event) -> Result<(), Event> {
        let Some(after) = event.id.0.checked_add(1) else {
            return Err(event);
        };
        if self.contains(event.id) {
            return Err(event);
        }
        self.next_id = self.next_id.max(after);
        self.events.push(event);
        Ok(())
    }

    pub fn find(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.find(id).is_some()
    }

    /// Unlink and return the event; registrations are not inspected
    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        let pos = self.events.iter().position(|e| e.id == id)?;
        let removed = self.events.remove(pos);
        debug!(event_id = %id, "event removed");
        Some(removed)
    }

    /// Apply a partial edit
    ///
    /// A capacity change shifts `available` by the same amount, floored at
    /// zero. The store does not reconcile against the registration log, so
    /// repeated shrinking can under-count outstanding registrations.
    pub fn edit(&mut self, id: EventId, update: EventUpdate) -> Option<&Event> {
        let event = self.find_mut(id)?;
        event.apply(update);
        debug!(event_id = %id, capacity = event.capacity, available = event.available, "event edited");
        Some(&*event)
    }

    /// Events in current order
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Reorder events by date, earliest first
    pub fn sort_by_date(&mut self) {
        sort::sort_by_date(&mut self.events);
        debug!(count = self.events.len(), "events sorted by date");
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, date: &str, capacity: u32) -> NewEvent {
        NewEvent::new(name, date, capacity)
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut store = EventStore::new();
        let a = store.add(draft("A", "2025-01-01", 1)).unwrap();
        let b = store.add(draft("B", "2025-01-02", 1)).unwrap();

        assert_eq!(a, EventId(1));
        assert_eq!(b, EventId(2));
        assert_eq!(store.next_id(), EventId(3));
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_remove() {
        let mut store = EventStore::new();
        store.add(draft("A", "2025-01-01", 1)).unwrap();
        let b = store.add(draft("B", "2025-01-02", 1)).unwrap();

        assert!(store.remove(b).is_some());
        let c = store.add(draft("C", "2025-01-03", 1)).unwrap();

        assert_eq!(c, EventId(3));
    }

    #[test]
    fn test_remove_missing() {
        let mut store = EventStore::new();
        store.add(draft("A", "2025-01-01", 1)).unwrap();
        assert!(store.remove(EventId(9)).is_none());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut store = EventStore::new();
        for name in ["A", "B", "C"] {
            store.add(draft(name, "2025-01-01", 1)).unwrap();
        }

        store.remove(EventId(1));

        let names: Vec<&str> = store.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_edit_capacity() {
        let mut store = EventStore::new();
        let id = store.add(draft("A", "2025-01-01", 2)).unwrap();

        let edited = store
            .edit(
                id,
                EventUpdate {
                    capacity: Some(4),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(edited.capacity, 4);
        assert_eq!(edited.available, 4);
        assert!(store.edit(EventId(99), EventUpdate::default()).is_none());
    }

    #[test]
    fn test_restore_moves_counter_past_highest_id() {
        let mut store = EventStore::new();
        let mut restored = Event::new(EventId(7), draft("Restored", "2025-05-05", 3));
        restored.available = 1;

        store.restore(restored.clone()).unwrap();
        assert_eq!(store.next_id(), EventId(8));
        assert_eq!(store.find(EventId(7)).unwrap().available, 1);

        assert_eq!(store.restore(restored.clone()), Err(restored));
        assert_eq!(store.add(draft("New", "2025-05-06", 1)).unwrap(), EventId(8));
    }

    #[test]
    fn test_id_counter_stops_at_max() {
        let mut store = EventStore::with_next_id(u32::MAX - 1);
        assert_eq!(store.add(draft("Last", "2025-01-01", 1)).unwrap(), EventId(u32::MAX - 1));

        assert!(matches!(
            store.add(draft("Over", "2025-01-02", 1)),
            Err(RegistryError::IdsExhausted("event"))
        ));
        assert_eq!(store.count(), 1);

        let top = Event::new(EventId(u32::MAX), draft("Top", "2025-01-03", 1));
        assert_eq!(store.restore(top.clone()), Err(top));
    }

    #[test]
    fn test_sort_by_date_keeps_identity() {
        let mut store = EventStore::new();
        let late = store.add(draft("Late", "2025-03-01", 2)).unwrap();
        let early = store.add(draft("Early", "2025-01-10", 1)).unwrap();

        store.sort_by_date();

        let ids: Vec<EventId> = store.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![early, late]);
        assert_eq!(store.find(late).unwrap().name, "Late");
    }
}
