//! Data types for the event registry
//!
//! This module contains the records held by the stores, the drafts and
//! patches used to create and edit them, and the report types.

mod event;
mod participant;
mod registration;
mod stats;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use event::{Event, EventUpdate, NewEvent};
pub use participant::{NewParticipant, Participant, ParticipantUpdate};
pub use registration::{Registration, RegistrationStatus};
pub use stats::{BusiestEvent, Statistics};

/// Maximum length (in chars) of an ISO-8601 calendar date, `YYYY-MM-DD`
pub const DATE_MAX_CHARS: usize = 10;

/// Identity of an event, assigned by the event store and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

/// Identity of a participant, counted independently of event ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u32);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cut `value` down to at most `max_chars` chars, never splitting a char
pub(crate) fn truncate_chars(mut value: String, max_chars: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max_chars) {
        value.truncate(idx);
    }
    value
}
