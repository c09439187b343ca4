//! Registry error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{EventId, ParticipantId};

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors surfaced by the stores, the registration log and persistence.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No event carries this id.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// No participant carries this id.
    #[error("participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    /// The event has no free slot left.
    #[error("event {0} has no available slots")]
    NoCapacity(EventId),

    /// The pair already has a registration that is not cancelled.
    #[error("participant {participant_id} is already registered for event {event_id}")]
    AlreadyRegistered {
        participant_id: ParticipantId,
        event_id: EventId,
    },

    /// Removal refused while registrations still point at the event.
    #[error("event {event_id} still has {active} active registration(s)")]
    EventHasActiveRegistrations { event_id: EventId, active: usize },

    /// Removal refused while registrations still point at the participant.
    #[error("participant {participant_id} still has {active} active registration(s)")]
    ParticipantHasActiveRegistrations {
        participant_id: ParticipantId,
        active: usize,
    },

    /// A persisted row could not be parsed into its record.
    #[error("malformed record in {} at row {row}: {reason}", .file.display())]
    MalformedRecord {
        file: PathBuf,
        row: usize,
        reason: String,
    },

    /// A persisted registration names a participant or event that was not loaded.
    #[error("registration references missing participant {participant_id} or event {event_id}")]
    DanglingReference {
        participant_id: ParticipantId,
        event_id: EventId,
    },

    /// Every id below `u32::MAX` has been handed out for this record type.
    #[error("no {0} ids left")]
    IdsExhausted(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Check if the error is a failed id lookup
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::EventNotFound(_) | RegistryError::ParticipantNotFound(_)
        )
    }
}
