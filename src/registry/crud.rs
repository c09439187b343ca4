//! CRUD operations for the registry

use tracing::{debug, info};

use crate::error::{RegistryError, RegistryResult};
use crate::store::RegistryState;
use crate::types::{
    Event, EventId, EventUpdate, NewEvent, NewParticipant, Participant, ParticipantId,
    ParticipantUpdate, Registration,
};
use crate::utils::today;

use super::Registry;

pub fn add_event(registry: &Registry, draft: NewEvent) -> RegistryResult<EventId> {
    registry.state.lock().events.add(draft)
}

pub fn find_event(registry: &Registry, id: EventId) -> Option<Event> {
    registry.state.lock().events.find(id).cloned()
}

/// Apply the provided fields to an event
pub fn edit_event(registry: &Registry, id: EventId, update: EventUpdate) -> RegistryResult<Event> {
    let mut state = registry.state.lock();
    state
        .events
        .edit(id, update)
        .cloned()
        .ok_or(RegistryError::EventNotFound(id))
}

/// Remove an event nobody is still registered for
///
/// Cancelled entries do not block removal.
pub fn remove_event(registry: &Registry, id: EventId) -> RegistryResult<Event> {
    let mut state = registry.state.lock();
    if !state.events.contains(id) {
        return Err(RegistryError::EventNotFound(id));
    }

    let active = state.registrations.active_for_event(id);
    if active > 0 {
        return Err(RegistryError::EventHasActiveRegistrations {
            event_id: id,
            active,
        });
    }

    let removed = state
        .events
        .remove(id)
        .ok_or(RegistryError::EventNotFound(id))?;
    info!(event_id = %id, "event removed");
    Ok(removed)
}

pub fn list_events(registry: &Registry) -> Vec<Event> {
    registry.state.lock().events.list().to_vec()
}

pub fn event_count(registry: &Registry) -> usize {
    registry.state.lock().events.count()
}

pub fn sort_events_by_date(registry: &Registry) {
    let mut state = registry.state.lock();
    state.events.sort_by_date();
    debug!(events = state.events.count(), "events sorted by date");
}

pub fn add_participant(registry: &Registry, draft: NewParticipant) -> RegistryResult<ParticipantId> {
    registry.state.lock().participants.add(draft)
}

pub fn find_participant(registry: &Registry, id: ParticipantId) -> Option<Participant> {
    registry.state.lock().participants.find(id).cloned()
}

pub fn edit_participant(
    registry: &Registry,
    id: ParticipantId,
    update: ParticipantUpdate,
) -> RegistryResult<Participant> {
    let mut state = registry.state.lock();
    state
        .participants
        .edit(id, update)
        .cloned()
        .ok_or(RegistryError::ParticipantNotFound(id))
}

/// Remove a participant with no registration still standing
pub fn remove_participant(registry: &Registry, id: ParticipantId) -> RegistryResult<Participant> {
    let mut state = registry.state.lock();
    if !state.participants.contains(id) {
        return Err(RegistryError::ParticipantNotFound(id));
    }

    let active = state.registrations.active_for_participant(id);
    if active > 0 {
        return Err(RegistryError::ParticipantHasActiveRegistrations {
            participant_id: id,
            active,
        });
    }

    let removed = state
        .participants
        .remove(id)
        .ok_or(RegistryError::ParticipantNotFound(id))?;
    info!(participant_id = %id, "participant removed");
    Ok(removed)
}

/// Participants in order, starting from the first
pub fn list_participants(registry: &Registry) -> Vec<Participant> {
    registry.state.lock().participants.iter().cloned().collect()
}

pub fn participant_count(registry: &Registry) -> usize {
    registry.state.lock().participants.count()
}

/// Register with today's local date
pub fn register(
    registry: &Registry,
    participant_id: ParticipantId,
    event_id: EventId,
) -> RegistryResult<Registration> {
    register_on(registry, participant_id, event_id, &today())
}

/// Register with an explicit date (thread-safe: holds the lock for check and update)
pub fn register_on(
    registry: &Registry,
    participant_id: ParticipantId,
    event_id: EventId,
    date: &str,
) -> RegistryResult<Registration> {
    let mut state = registry.state.lock();
    let RegistryState {
        events,
        participants,
        registrations,
    } = &mut *state;

    registrations.register(events, participants, participant_id, event_id, date)
}

pub fn cancel(registry: &Registry, participant_id: ParticipantId, event_id: EventId) -> bool {
    let mut state = registry.state.lock();
    let RegistryState {
        events,
        registrations,
        ..
    } = &mut *state;

    registrations.cancel(events, participant_id, event_id)
}

pub fn is_registered(registry: &Registry, participant_id: ParticipantId, event_id: EventId) -> bool {
    registry
        .state
        .lock()
        .registrations
        .exists(participant_id, event_id)
}

pub fn registrations_for_event(registry: &Registry, event_id: EventId) -> Vec<Registration> {
    registry
        .state
        .lock()
        .registrations
        .list_by_event(event_id)
        .into_iter()
        .cloned()
        .collect()
}

pub fn registrations_for_participant(
    registry: &Registry,
    participant_id: ParticipantId,
) -> Vec<Registration> {
    registry
        .state
        .lock()
        .registrations
        .list_by_participant(participant_id)
        .into_iter()
        .cloned()
        .collect()
}

/// Every entry ever made, cancelled ones included
pub fn registration_count(registry: &Registry) -> usize {
    registry.state.lock().registrations.count()
}

pub fn list_registrations(registry: &Registry) -> Vec<Registration> {
    registry.state.lock().registrations.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use tempfile::TempDir;

    fn registry() -> (TempDir, Registry) {
        let temp_dir = TempDir::new().unwrap();
        let registry = Registry::in_memory(StorageConfig::new(temp_dir.path()));
        (temp_dir, registry)
    }

    #[test]
    fn test_edit_missing_records() {
        let (_dir, registry) = registry();

        let err = registry
            .edit_event(EventId(4), EventUpdate::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::EventNotFound(EventId(4))));
        assert!(err.is_not_found());

        let err = registry
            .edit_participant(ParticipantId(4), ParticipantUpdate::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_capacity_through_registry() {
        let (_dir, registry) = registry();
        let event = registry.add_event(NewEvent::new("Workshop", "2025-03-01", 5)).unwrap();
        let ana = registry.add_participant(NewParticipant::new("Ana", "a@x", "1")).unwrap();
        registry.register_on(ana, event, "2025-01-01").unwrap();

        let edited = registry
            .edit_event(
                event,
                EventUpdate {
                    capacity: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(edited.capacity, 3);
        assert_eq!(edited.available, 2);
    }

    #[test]
    fn test_remove_event_blocked_by_active_registration() {
        let (_dir, registry) = registry();
        let event = registry.add_event(NewEvent::new("Workshop", "2025-03-01", 5)).unwrap();
        let ana = registry.add_participant(NewParticipant::new("Ana", "a@x", "1")).unwrap();
        registry.register_on(ana, event, "2025-01-01").unwrap();

        assert!(matches!(
            registry.remove_event(event),
            Err(RegistryError::EventHasActiveRegistrations { active: 1, .. })
        ));
        assert!(matches!(
            registry.remove_participant(ana),
            Err(RegistryError::ParticipantHasActiveRegistrations { active: 1, .. })
        ));

        assert!(registry.cancel(ana, event));
        assert_eq!(registry.remove_event(event).unwrap().name, "Workshop");
        assert_eq!(registry.remove_participant(ana).unwrap().name, "Ana");
        assert_eq!(registry.event_count(), 0);
        assert_eq!(registry.participant_count(), 0);
        // Tombstone stays in the log
        assert_eq!(registry.registration_count(), 1);
    }

    #[test]
    fn test_remove_missing_records() {
        let (_dir, registry) = registry();
        assert!(matches!(
            registry.remove_event(EventId(1)),
            Err(RegistryError::EventNotFound(_))
        ));
        assert!(matches!(
            registry.remove_participant(ParticipantId(1)),
            Err(RegistryError::ParticipantNotFound(_))
        ));
    }

    #[test]
    fn test_register_uses_today() {
        let (_dir, registry) = registry();
        let event = registry.add_event(NewEvent::new("Workshop", "2025-03-01", 5)).unwrap();
        let ana = registry.add_participant(NewParticipant::new("Ana", "a@x", "1")).unwrap();

        let registration = registry.register(ana, event).unwrap();

        assert_eq!(registration.date, today());
        assert!(registry.is_registered(ana, event));
    }
}
