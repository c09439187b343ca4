//! Storage configuration
//!
//! Where the three CSV files live. The data directory can be overridden with
//! the `EVENT_REGISTRY_DATA_DIR` environment variable; relative paths are
//! resolved against the current directory.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory
pub const DATA_DIR_ENV: &str = "EVENT_REGISTRY_DATA_DIR";

/// File names and location of the persisted collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding the three files
    pub data_dir: PathBuf,
    pub events_file: String,
    pub participants_file: String,
    pub registrations_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            events_file: "eventos.csv".to_string(),
            participants_file: "participantes.csv".to_string(),
            registrations_file: "inscricoes.csv".to_string(),
        }
    }
}

impl StorageConfig {
    /// Create config with custom data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Build config from the environment, falling back to the current directory
    pub fn from_env() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        match env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => {
                let dir = PathBuf::from(dir);
                if dir.is_absolute() {
                    Self::new(dir)
                } else {
                    Self::new(current_dir.join(dir))
                }
            }
            _ => Self::new(current_dir),
        }
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to the events file
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_file)
    }

    /// Get path to the participants file
    pub fn participants_path(&self) -> PathBuf {
        self.data_dir.join(&self.participants_file)
    }

    /// Get path to the registrations file
    pub fn registrations_path(&self) -> PathBuf {
        self.data_dir.join(&self.registrations_file)
    }
}
