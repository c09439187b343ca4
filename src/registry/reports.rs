//! Read-only reports over the registry

use crate::error::{RegistryError, RegistryResult};
use crate::types::{BusiestEvent, Event, EventId, Participant, Statistics};

use super::Registry;

/// Events whose category matches exactly, in current order
pub fn events_in_category(registry: &Registry, category: &str) -> Vec<Event> {
    let state = registry.state.lock();
    state
        .events
        .iter()
        .filter(|e| e.category == category)
        .cloned()
        .collect()
}

/// Events with at least one free slot
pub fn events_with_vacancies(registry: &Registry) -> Vec<Event> {
    let state = registry.state.lock();
    state
        .events
        .iter()
        .filter(|e| e.has_vacancy())
        .cloned()
        .collect()
}

/// Participants holding a confirmed registration for the event, in log order
pub fn participants_for_event(
    registry: &Registry,
    event_id: EventId,
) -> RegistryResult<Vec<Participant>> {
    let state = registry.state.lock();
    if !state.events.contains(event_id) {
        return Err(RegistryError::EventNotFound(event_id));
    }

    Ok(state
        .registrations
        .list_by_event(event_id)
        .into_iter()
        .filter_map(|r| state.participants.find(r.participant_id))
        .cloned()
        .collect())
}

/// Totals, average load and busiest event
pub fn statistics(registry: &Registry) -> Statistics {
    let state = registry.state.lock();

    let total_events = state.events.count();
    let total_registrations = state.registrations.count();

    let average_registrations_per_event = if total_events > 0 {
        Some(total_registrations as f64 / total_events as f64)
    } else {
        None
    };

    // First event wins a tie
    let mut busiest: Option<&Event> = None;
    for event in state.events.iter() {
        if event.occupied() > busiest.map_or(0, Event::occupied) {
            busiest = Some(event);
        }
    }

    Statistics {
        total_events,
        total_participants: state.participants.count(),
        total_registrations,
        average_registrations_per_event,
        busiest_event: busiest.map(|e| BusiestEvent {
            id: e.id,
            name: e.name.clone(),
            occupied: e.occupied(),
        }),
    }
}
