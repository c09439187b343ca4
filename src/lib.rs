//! Event Registry
//!
//! Record store for events, participants and registrations, persisted as
//! three CSV files.
//!
//! # Features
//!
//! - **Capacity Bookkeeping**: every confirmed registration takes a slot, cancelling gives it back
//! - **Thread-Safe**: one lock around all three stores, so check-then-register is atomic
//! - **Id References**: registrations point at records by id, so sorting never breaks them
//! - **Lossy Load**: malformed and dangling rows are skipped, logged and counted
//! - **Atomic Saves**: files are replaced through a temp file and rename
//!
//! # Modules
//!
//! - `types`: Records (Event, Participant, Registration) and statistics
//! - `store`: The three stores and the date sort
//! - `persistence`: CSV reading and writing
//! - `registry`: Thread-safe facade with CRUD and reports
//! - `config`: Data directory and file names
//! - `error`: Error type shared by every layer
//! - `utils`: Atomic file writes and dates
//!
//! # Example
//!
//! ```no_run
//! use event_registry::{NewEvent, NewParticipant, Registry};
//!
//! let registry = Registry::new();
//! let event = registry.add_event(NewEvent::new("Rust Meetup", "2025-03-01", 30)).unwrap();
//! let ana = registry
//!     .add_participant(NewParticipant::new("Ana", "ana@example.com", "5555-0000"))
//!     .unwrap();
//! registry.register(ana, event).unwrap();
//! registry.save();
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod registry;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::StorageConfig;
pub use error::{RegistryError, RegistryResult};
pub use persistence::{LoadReport, SaveReport};
pub use registry::Registry;
pub use store::{EventStore, ParticipantStore, RegistrationLog, RegistryState};
pub use types::{
    BusiestEvent, Event, EventId, EventUpdate, NewEvent, NewParticipant, Participant,
    ParticipantId, ParticipantUpdate, Registration, RegistrationStatus, Statistics,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
