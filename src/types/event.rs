//! Event records

use serde::{Deserialize, Serialize};

use super::{truncate_chars, EventId, DATE_MAX_CHARS};

/// Maximum length (in chars) of an event name
pub const NAME_MAX_CHARS: usize = 99;
/// Maximum length (in chars) of an event description
pub const DESCRIPTION_MAX_CHARS: usize = 499;
/// Maximum length (in chars) of an event category
pub const CATEGORY_MAX_CHARS: usize = 49;

/// Event with capacity bookkeeping
///
/// `available` is the number of unfilled slots and always satisfies
/// `available <= capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
    pub capacity: u32,
    pub available: u32,
}

impl Event {
    /// Build a fresh event with every slot available
    pub fn new(id: EventId, draft: NewEvent) -> Self {
        Self {
            id,
            name: truncate_chars(draft.name, NAME_MAX_CHARS),
            description: truncate_chars(draft.description, DESCRIPTION_MAX_CHARS),
            category: truncate_chars(draft.category, CATEGORY_MAX_CHARS),
            date: truncate_chars(draft.date, DATE_MAX_CHARS),
            capacity: draft.capacity,
            available: draft.capacity,
        }
    }

    /// Number of slots currently taken
    pub fn occupied(&self) -> u32 {
        self.capacity - self.available
    }

    /// Check if at least one slot is free
    pub fn has_vacancy(&self) -> bool {
        self.available > 0
    }

    /// Apply a patch; a capacity change shifts `available` by the same delta,
    /// floored at zero
    pub(crate) fn apply(&mut self, update: EventUpdate) {
        if let Some(name) = update.name {
            self.name = truncate_chars(name, NAME_MAX_CHARS);
        }
        if let Some(description) = update.description {
            self.description = truncate_chars(description, DESCRIPTION_MAX_CHARS);
        }
        if let Some(category) = update.category {
            self.category = truncate_chars(category, CATEGORY_MAX_CHARS);
        }
        if let Some(date) = update.date {
            self.date = truncate_chars(date, DATE_MAX_CHARS);
        }
        if let Some(capacity) = update.capacity {
            let delta = i64::from(capacity) - i64::from(self.capacity);
            let available = (i64::from(self.available) + delta).clamp(0, i64::from(capacity));
            self.capacity = capacity;
            self.available = available as u32;
        }
    }

    /// Give back one slot, never exceeding capacity
    pub(crate) fn release_slot(&mut self) {
        if self.available < self.capacity {
            self.available += 1;
        }
    }

    /// Take one slot; returns false when the event is full
    pub(crate) fn claim_slot(&mut self) -> bool {
        if self.available == 0 {
            return false;
        }
        self.available -= 1;
        true
    }
}

/// Fields supplied when creating an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub capacity: u32,
}

impl NewEvent {
    /// Create a draft with the fields every event needs
    pub fn new(name: impl Into<String>, date: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            capacity,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Partial edit of an event; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub capacity: Option<u32>,
}
