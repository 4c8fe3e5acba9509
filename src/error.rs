//! Error types for the agenda CLI
//!
//! Provides structured error handling with context and proper error chains.
//! Every error is eventually converted into an error envelope at the command
//! boundary; the `Display` text of a variant is exactly the message that ends
//! up in the `error` key of the emitted JSON object.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the agenda CLI
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Malformed input caught before any backend call
    #[error("{message}")]
    Validation { message: String },

    /// A referenced identifier does not resolve to an existing entity
    #[error("{message}")]
    NotFound { message: String },

    /// Access to the backend capability was denied
    #[error("{message}")]
    Permission { message: String },

    /// The registry or store document could not be read or written
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A payload could not be rendered to the output format
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AgendaError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error that deterministically names the offending
    /// identifier, e.g. `Calendar not found with ID: work`
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            message: format!("{} not found with ID: {}", kind.into(), id.into()),
        }
    }

    /// Create a new permission error
    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// Create a new persistence error
    pub fn persistence<P: Into<PathBuf>>(message: impl Into<String>, path: P) -> Self {
        Self::Persistence {
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    /// Create a persistence error wrapping an I/O failure
    pub fn persistence_io<P: Into<PathBuf>>(
        message: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AgendaError>;
