//! Registration log
//!
//! Append-mostly log of registrations. Entries are never removed while the
//! process runs: cancelling flips the status and keeps the entry as a
//! tombstone, so a pair may collect several cancelled entries but at most one
//! active one.

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::types::{
    truncate_chars, EventId, ParticipantId, Registration, RegistrationStatus, DATE_MAX_CHARS,
};

use super::{EventStore, ParticipantStore};

/// Log of every registration made, in insertion order
#[derive(Debug, Clone, Default)]
pub struct RegistrationLog {
    entries: Vec<Registration>,
}

impl RegistrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the pair has a registration that is not cancelled
    pub fn exists(&self, participant_id: ParticipantId, event_id: EventId) -> bool {
        self.entries
            .iter()
            .any(|r| r.matches(participant_id, event_id) && r.status.is_active())
    }

    /// Register a participant for an event, taking one slot
    ///
    /// Lookups, the capacity check, the duplicate check and the slot update
    /// happen under the same `&mut` borrow of the event store, so nothing can
    /// change the event's availability in between.
    pub fn register(
        &mut self,
        events: &mut EventStore,
        participants: &ParticipantStore,
        participant_id: ParticipantId,
        event_id: EventId,
        date: impl Into<String>,
    ) -> RegistryResult<Registration> {
        if !participants.contains(participant_id) {
            return Err(RegistryError::ParticipantNotFound(participant_id));
        }
        let event = events
            .find_mut(event_id)
            .ok_or(RegistryError::EventNotFound(event_id))?;

        if self.exists(participant_id, event_id) {
            // A full event reports its capacity before the duplicate
            return Err(if event.has_vacancy() {
                RegistryError::AlreadyRegistered {
                    participant_id,
                    event_id,
                }
            } else {
                RegistryError::NoCapacity(event_id)
            });
        }
        if !event.claim_slot() {
            return Err(RegistryError::NoCapacity(event_id));
        }

        let registration = Registration {
            participant_id,
            event_id,
            date: truncate_chars(date.into(), DATE_MAX_CHARS),
            status: RegistrationStatus::Confirmed,
        };
        self.entries.push(registration.clone());

        debug!(
            participant_id = %participant_id,
            event_id = %event_id,
            available = event.available,
            "registration confirmed"
        );
        Ok(registration)
    }

    /// Cancel the confirmed registration for the pair and give its slot back
    ///
    /// Returns false when there is nothing to cancel, whether the pair was
    /// never registered or is already cancelled.
    pub fn cancel(
        &mut self,
        events: &mut EventStore,
        participant_id: ParticipantId,
        event_id: EventId,
    ) -> bool {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|r| r.matches(participant_id, event_id) && r.is_confirmed())
        else {
            return false;
        };

        entry.status = RegistrationStatus::Cancelled;
        if let Some(event) = events.find_mut(event_id) {
            event.release_slot();
        }

        debug!(participant_id = %participant_id, event_id = %event_id, "registration cancelled");
        true
    }

    /// Append a persisted entry without touching slot counts
    ///
    /// Returns the entry unchanged when it would give the pair a second active
    /// registration.
    pub fn restore(&mut self, registration: Registration) -> Result<(), Registration> {
        if registration.status.is_active()
            && self.exists(registration.participant_id, registration.event_id)
        {
            return Err(registration);
        }
        self.entries.push(registration);
        Ok(())
    }

    /// Confirmed registrations for an event, in log order
    pub fn list_by_event(&self, event_id: EventId) -> Vec<&Registration> {
        self.entries
            .iter()
            .filter(|r| r.event_id == event_id && r.is_confirmed())
            .collect()
    }

    /// Confirmed registrations of a participant, in log order
    pub fn list_by_participant(&self, participant_id: ParticipantId) -> Vec<&Registration> {
        self.entries
            .iter()
            .filter(|r| r.participant_id == participant_id && r.is_confirmed())
            .collect()
    }

    /// Entries for an event that are not cancelled
    pub fn active_for_event(&self, event_id: EventId) -> usize {
        self.entries
            .iter()
            .filter(|r| r.event_id == event_id && r.status.is_active())
            .count()
    }

    /// Entries for a participant that are not cancelled
    pub fn active_for_participant(&self, participant_id: ParticipantId) -> usize {
        self.entries
            .iter()
            .filter(|r| r.participant_id == participant_id && r.status.is_active())
            .count()
    }

    /// Every entry, tombstones included
    pub fn iter(&self) -> std::slice::Iter<'_, Registration> {
        self.entries.iter()
    }

    /// Total entries, cancelled ones included
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
