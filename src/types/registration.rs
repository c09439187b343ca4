//! Registration records linking participants to events

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EventId, ParticipantId};

/// Lifecycle state of a registration
///
/// Persisted as its ordinal: 0 = Confirmed, 1 = Pending, 2 = Cancelled.
/// Nothing in the store produces `Pending`; it is kept so files carrying it
/// still load, and it counts as active for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl RegistrationStatus {
    /// Numeric code used in persisted rows
    pub fn ordinal(self) -> u8 {
        match self {
            RegistrationStatus::Confirmed => 0,
            RegistrationStatus::Pending => 1,
            RegistrationStatus::Cancelled => 2,
        }
    }

    pub fn from_ordinal(code: u8) -> Option<Self> {
        match code {
            0 => Some(RegistrationStatus::Confirmed),
            1 => Some(RegistrationStatus::Pending),
            2 => Some(RegistrationStatus::Cancelled),
            _ => None,
        }
    }

    /// Anything not cancelled blocks a second registration for the same pair
    pub fn is_active(self) -> bool {
        self != RegistrationStatus::Cancelled
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RegistrationStatus::Confirmed => "Confirmed",
            RegistrationStatus::Pending => "Pending",
            RegistrationStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// Entry in the registration log
///
/// Holds ids only; the event and participant are looked up again whenever
/// live data is needed, so reordering a store never changes what a
/// registration points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub participant_id: ParticipantId,
    pub event_id: EventId,
    /// Date of registration as `YYYY-MM-DD`
    pub date: String,
    pub status: RegistrationStatus,
}

impl Registration {
    pub fn matches(&self, participant_id: ParticipantId, event_id: EventId) -> bool {
        self.participant_id == participant_id && self.event_id == event_id
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == RegistrationStatus::Confirmed
    }
}
