//! Event Registry - Binary Entry Point
//!
//! Loads the data directory, orders events by date, prints statistics as
//! JSON and writes the files back.

use std::io;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use event_registry::{Registry, StorageConfig, NAME, VERSION};

fn main() {
    // Logs go to stderr so stdout stays clean JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    info!("starting {} {}", NAME, VERSION);

    let config = StorageConfig::from_env();
    let registry = Registry::with_config(config);

    registry.sort_events_by_date();

    match serde_json::to_string_pretty(&registry.statistics()) {
        Ok(json) => println!("{}", json),
        Err(e) => warn!(error = %e, "could not render statistics"),
    }

    let report = registry.save();
    if !report.is_complete() {
        warn!(failed = ?report.failed, "some files were not saved");
    }
}
