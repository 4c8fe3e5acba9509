//! Configuration management for the agenda CLI
//!
//! Centralizes the resolved data locations and provides validation.

use crate::error::AgendaError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment override for the data directory, used by scripts and tests.
pub const DATA_DIR_ENV: &str = "AGENDA_DATA_DIR";

/// Directory name under the platform data directory.
const APP_DIR: &str = "agenda";
/// Alias registry document, relative to the data directory.
const REGISTRY_FILE: &str = "aliases.json";
/// Local store document, relative to the data directory.
const STORE_FILE: &str = "store.json";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Directory holding all persisted documents
    pub data_dir: PathBuf,
}

impl Config {
    /// Create configuration from command line arguments.
    ///
    /// The data directory comes from `AGENDA_DATA_DIR` when set, otherwise
    /// from the platform's user data directory. It is not created here;
    /// stores create what they need on first write.
    pub fn from_args(args: &crate::cli::Args) -> Result<Self, AgendaError> {
        let data_dir = match env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::data_dir()
                .ok_or_else(|| {
                    AgendaError::config(format!(
                        "No user data directory available; set {DATA_DIR_ENV}"
                    ))
                })?
                .join(APP_DIR),
        };

        Ok(Self {
            debug: args.debug,
            data_dir,
        })
    }

    /// Path of the persisted alias registry
    pub fn registry_path(&self) -> PathBuf {
        self.data_dir.join(REGISTRY_FILE)
    }

    /// Path of the local store document
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }
}
