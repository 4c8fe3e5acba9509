//! # Agenda CLI
//!
//! A scriptable command-line front end for calendar events and reminders.
//! Every invocation prints exactly one JSON object with sorted keys on
//! stdout, so output is deterministic and easy to pipe into `jq`.
//!
//! ## Features
//!
//! - List, inspect, create, update, complete, and delete events and reminders
//! - Persistent aliases mapping short names to opaque backend identifiers
//! - Uniform success/error result envelopes with stable key ordering
//! - Best-effort alias registry loading that tolerates corruption
//! - Pluggable store boundary with a file-backed local store
//!
//! ## Example
//!
//! ```no_run
//! use agenda_cli::core::{AliasRegistry, MemoryRegistryStore, Orchestrator};
//! use agenda_cli::store::MemoryStore;
//!
//! let agenda = Orchestrator::new(
//!     MemoryStore::new(),
//!     AliasRegistry::new(MemoryRegistryStore::new()),
//! );
//! let envelope = agenda.calendars();
//! println!("{}", envelope.serialize());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod store;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity.
///
/// Diagnostics go to stderr; stdout is reserved for the single JSON result
/// object each invocation prints.
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
