//! Record stores
//!
//! The three linked collections and the sort applied to events:
//! - `EventStore`: events with capacity bookkeeping
//! - `ParticipantStore`: participants kept in a ring
//! - `RegistrationLog`: registrations, addressed by participant and event ids
//!
//! The log never holds references into the other stores, only ids, so
//! reordering or editing a store cannot make a registration point at the
//! wrong record.

mod events;
mod participants;
mod registrations;
pub mod sort;

pub use events::EventStore;
pub use participants::ParticipantStore;
pub use registrations::RegistrationLog;

/// The three stores, loaded and saved together
#[derive(Debug, Clone, Default)]
pub struct RegistryState {
    pub events: EventStore,
    pub participants: ParticipantStore,
    pub registrations: RegistrationLog,
}

impl RegistryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all three stores are empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.participants.is_empty() && self.registrations.is_empty()
    }
}
