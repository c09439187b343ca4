//! Registry statistics

use serde::{Deserialize, Serialize};

use super::EventId;

/// Event with the most filled slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusiestEvent {
    pub id: EventId,
    pub name: String,
    pub occupied: u32,
}

/// Totals across the three stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_events: usize,
    pub total_participants: usize,
    /// All log entries, cancelled ones included
    pub total_registrations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_registrations_per_event: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_event: Option<BusiestEvent>,
}
