//! Persistence of the three stores as delimited text files
//!
//! One file per record type, each starting with a header row:
//!
//! ```text
//! eventos.csv        id,nome,descricao,categoria,data,capacidade,vagasDisponiveis
//! participantes.csv  id,nome,email,telefone
//! inscricoes.csv     idParticipante,idEvento,dataInscricao,status
//! ```
//!
//! Loading is lossy on purpose. A missing or unreadable file gives an empty
//! collection, a malformed row is skipped, and a registration whose
//! participant or event is not loaded is dropped. Each skip is logged and
//! counted in the [`LoadReport`]; none of them fails the load. Saving never
//! fails either: a file that cannot be written is logged and listed in the
//! [`SaveReport`].

pub mod codec;
pub mod csv;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::store::{EventStore, ParticipantStore, RegistrationLog, RegistryState};
use crate::types::{Event, Participant, Registration};
use crate::utils::{atomic_write, is_iso_date};

use codec::RowCodec;
use csv::RowReader;

/// What happened while loading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub events: usize,
    pub participants: usize,
    pub registrations: usize,
    /// Rows skipped because they did not parse or broke a store invariant
    pub malformed_rows: usize,
    /// Registration rows dropped because their participant or event is missing
    pub dangling_registrations: usize,
}

impl LoadReport {
    /// Check if every row made it into the stores
    pub fn is_clean(&self) -> bool {
        self.malformed_rows == 0 && self.dangling_registrations == 0
    }
}

/// What happened while saving
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Load all three files, events and participants before registrations
pub fn load_all(config: &StorageConfig) -> (RegistryState, LoadReport) {
    let mut report = LoadReport::default();

    let events = load_events(&config.events_path(), &mut report);
    let participants = load_participants(&config.participants_path(), &mut report);
    let registrations = load_registrations(
        &config.registrations_path(),
        &events,
        &participants,
        &mut report,
    );

    info!(
        events = report.events,
        participants = report.participants,
        registrations = report.registrations,
        malformed_rows = report.malformed_rows,
        dangling_registrations = report.dangling_registrations,
        "registry loaded from {}",
        config.data_dir().display()
    );

    let state = RegistryState {
        events,
        participants,
        registrations,
    };
    (state, report)
}

/// Write all three files; failures are logged and reported, never raised
pub fn save_all(config: &StorageConfig, state: &RegistryState) -> SaveReport {
    let mut report = SaveReport::default();

    let outcomes = [
        (
            config.events_path(),
            save_rows(&config.events_path(), state.events.iter()),
        ),
        (
            config.participants_path(),
            save_rows(&config.participants_path(), state.participants.iter()),
        ),
        (
            config.registrations_path(),
            save_rows(&config.registrations_path(), state.registrations.iter()),
        ),
    ];

    for (path, outcome) in outcomes {
        match outcome {
            Ok(()) => report.written.push(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to save file");
                report.failed.push(path);
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "registry saved to {}",
        config.data_dir().display()
    );
    report
}

/// Render records as a complete file, header included
pub fn encode_rows<'a, T, I>(records: I) -> String
where
    T: RowCodec + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = String::new();
    csv::write_header(&mut out, T::HEADER);
    for record in records {
        record.encode(&mut out);
    }
    out
}

fn save_rows<'a, T, I>(path: &Path, records: I) -> RegistryResult<()>
where
    T: RowCodec + 'a,
    I: IntoIterator<Item = &'a T>,
{
    atomic_write(path, &encode_rows(records))?;
    debug!(path = %path.display(), "file written");
    Ok(())
}

/// Read and decode every data row of a file
///
/// Returns the decoded records with their starting line numbers. Rows that
/// fail are logged and counted; an absent or unreadable file yields nothing.
fn read_rows<T: RowCodec>(path: &Path, report: &mut LoadReport) -> Vec<(usize, T)> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no file yet, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read file, starting empty");
            return Vec::new();
        }
    };

    decode_rows(path, &content, report)
}

/// Decode rows from already-read file content
pub(crate) fn decode_rows<T: RowCodec>(
    path: &Path,
    content: &str,
    report: &mut LoadReport,
) -> Vec<(usize, T)> {
    let mut rows = RowReader::new(content);
    let mut records = Vec::new();

    // The first record is always consumed as the header; when it is not the
    // expected one it may be a data row, so it counts as lost
    match rows.next() {
        None => return records,
        Some(Ok(header)) if header.fields.iter().map(String::as_str).eq(T::HEADER.iter().copied()) => {}
        Some(Ok(header)) => {
            warn!(
                path = %path.display(),
                found = %header.fields.join(","),
                expected = %T::HEADER.join(","),
                "unexpected header row, skipping it"
            );
            report.malformed_rows += 1;
        }
        Some(Err(e)) => {
            warn!(path = %path.display(), error = %e, "unreadable header row, skipping it");
            report.malformed_rows += 1;
        }
    }

    for row in rows {
        let decoded = row
            .map_err(|e| (e.line, e.reason.to_string()))
            .and_then(|row| {
                T::decode(&row.fields)
                    .map(|record| (row.line, record))
                    .map_err(|reason| (row.line, reason))
            });

        match decoded {
            Ok(record) => records.push(record),
            Err((line, reason)) => skip_malformed(path, line, reason, report),
        }
    }

    records
}

fn skip_malformed(path: &Path, row: usize, reason: String, report: &mut LoadReport) {
    let err = RegistryError::MalformedRecord {
        file: path.to_path_buf(),
        row,
        reason,
    };
    warn!(error = %err, "skipping row");
    report.malformed_rows += 1;
}

fn load_events(path: &Path, report: &mut LoadReport) -> EventStore {
    let mut store = EventStore::new();

    for (line, event) in read_rows::<Event>(path, report) {
        if !is_iso_date(&event.date) {
            warn!(
                event_id = %event.id,
                date = %event.date,
                "event date is not YYYY-MM-DD, date ordering may be off"
            );
        }
        if let Err(event) = store.restore(event) {
            let reason = if store.contains(event.id) {
                format!("duplicate event id {}", event.id)
            } else {
                format!("event id {} leaves no room for new ids", event.id)
            };
            skip_malformed(path, line, reason, report);
        }
    }

    report.events = store.count();
    store
}

fn load_participants(path: &Path, report: &mut LoadReport) -> ParticipantStore {
    let mut store = ParticipantStore::new();

    for (line, participant) in read_rows::<Participant>(path, report) {
        if let Err(participant) = store.restore(participant) {
            let reason = if store.contains(participant.id) {
                format!("duplicate participant id {}", participant.id)
            } else {
                format!("participant id {} leaves no room for new ids", participant.id)
            };
            skip_malformed(path, line, reason, report);
        }
    }

    report.participants = store.count();
    store
}

fn load_registrations(
    path: &Path,
    events: &EventStore,
    participants: &ParticipantStore,
    report: &mut LoadReport,
) -> RegistrationLog {
    let mut log = RegistrationLog::new();

    for (line, registration) in read_rows::<Registration>(path, report) {
        let participant_id = registration.participant_id;
        let event_id = registration.event_id;

        if !participants.contains(participant_id) || !events.contains(event_id) {
            let err = RegistryError::DanglingReference {
                participant_id,
                event_id,
            };
            warn!(path = %path.display(), row = line, error = %err, "dropping registration");
            report.dangling_registrations += 1;
            continue;
        }

        if log.restore(registration).is_err() {
            skip_malformed(
                path,
                line,
                format!(
                    "second active registration of participant {} for event {}",
                    participant_id, event_id
                ),
                report,
            );
        }
    }

    report.registrations = log.count();
    log
}
