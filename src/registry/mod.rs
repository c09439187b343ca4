//! Registry - thread-safe facade over the three stores
//!
//! Owns the storage configuration and the in-memory state behind a single
//! lock. Every operation holds the lock for its whole duration, so a
//! registration's lookups, checks and slot update can never interleave with
//! another mutation. Returned records are owned clones.

mod crud;
mod reports;

use parking_lot::Mutex;

use crate::config::StorageConfig;
use crate::error::RegistryResult;
use crate::persistence::{self, LoadReport, SaveReport};
use crate::store::RegistryState;
use crate::types::{
    Event, EventId, EventUpdate, NewEvent, NewParticipant, Participant, ParticipantId,
    ParticipantUpdate, Registration, Statistics,
};

/// Event registry with in-memory state and CSV persistence
pub struct Registry {
    pub(crate) config: StorageConfig,
    pub(crate) state: Mutex<RegistryState>,
}

impl Registry {
    /// Create a registry from the environment and load its files
    pub fn new() -> Self {
        Self::with_config(StorageConfig::from_env())
    }

    /// Create a registry for the given config and load its files
    pub fn with_config(config: StorageConfig) -> Self {
        let registry = Self::in_memory(config);
        registry.load();
        registry
    }

    /// Create an empty registry; nothing is read until [`Registry::load`]
    pub fn in_memory(config: StorageConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RegistryState::new()),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Replace the in-memory state with the contents of the data files
    pub fn load(&self) -> LoadReport {
        let (state, report) = persistence::load_all(&self.config);
        *self.state.lock() = state;
        report
    }

    /// Write the current state to the data files
    pub fn save(&self) -> SaveReport {
        let state = self.state.lock();
        persistence::save_all(&self.config, &state)
    }

    /// Get a clone of the whole state
    pub fn snapshot(&self) -> RegistryState {
        self.state.lock().clone()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

// Operations live in the submodules; these forward to them
impl Registry {
    // Events (from crud.rs)
    pub fn add_event(&self, draft: NewEvent) -> RegistryResult<EventId> {
        crud::add_event(self, draft)
    }

    pub fn find_event(&self, id: EventId) -> Option<Event> {
        crud::find_event(self, id)
    }

    pub fn edit_event(&self, id: EventId, update: EventUpdate) -> RegistryResult<Event> {
        crud::edit_event(self, id, update)
    }

    pub fn remove_event(&self, id: EventId) -> RegistryResult<Event> {
        crud::remove_event(self, id)
    }

    pub fn list_events(&self) -> Vec<Event> {
        crud::list_events(self)
    }

    pub fn event_count(&self) -> usize {
        crud::event_count(self)
    }

    pub fn sort_events_by_date(&self) {
        crud::sort_events_by_date(self)
    }

    // Participants (from crud.rs)
    pub fn add_participant(&self, draft: NewParticipant) -> RegistryResult<ParticipantId> {
        crud::add_participant(self, draft)
    }

    pub fn find_participant(&self, id: ParticipantId) -> Option<Participant> {
        crud::find_participant(self, id)
    }

    pub fn edit_participant(
        &self,
        id: ParticipantId,
        update: ParticipantUpdate,
    ) -> RegistryResult<Participant> {
        crud::edit_participant(self, id, update)
    }

    pub fn remove_participant(&self, id: ParticipantId) -> RegistryResult<Participant> {
        crud::remove_participant(self, id)
    }

    pub fn list_participants(&self) -> Vec<Participant> {
        crud::list_participants(self)
    }

    pub fn participant_count(&self) -> usize {
        crud::participant_count(self)
    }

    // Registrations (from crud.rs)
    pub fn register(
        &self,
        participant_id: ParticipantId,
        event_id: EventId,
    ) -> RegistryResult<Registration> {
        crud::register(self, participant_id, event_id)
    }

    pub fn register_on(
        &self,
        participant_id: ParticipantId,
        event_id: EventId,
        date: &str,
    ) -> RegistryResult<Registration> {
        crud::register_on(self, participant_id, event_id, date)
    }

    pub fn cancel(&self, participant_id: ParticipantId, event_id: EventId) -> bool {
        crud::cancel(self, participant_id, event_id)
    }

    pub fn is_registered(&self, participant_id: ParticipantId, event_id: EventId) -> bool {
        crud::is_registered(self, participant_id, event_id)
    }

    pub fn registrations_for_event(&self, event_id: EventId) -> Vec<Registration> {
        crud::registrations_for_event(self, event_id)
    }

    pub fn registrations_for_participant(&self, participant_id: ParticipantId) -> Vec<Registration> {
        crud::registrations_for_participant(self, participant_id)
    }

    pub fn registration_count(&self) -> usize {
        crud::registration_count(self)
    }

    pub fn list_registrations(&self) -> Vec<Registration> {
        crud::list_registrations(self)
    }

    // Reports (from reports.rs)
    pub fn events_in_category(&self, category: &str) -> Vec<Event> {
        reports::events_in_category(self, category)
    }

    pub fn events_with_vacancies(&self) -> Vec<Event> {
        reports::events_with_vacancies(self)
    }

    pub fn participants_for_event(&self, event_id: EventId) -> RegistryResult<Vec<Participant>> {
        reports::participants_for_event(self, event_id)
    }

    pub fn statistics(&self) -> Statistics {
        reports::statistics(self)
    }
}
