//! Core functionality for the agenda CLI
//!
//! Contains the result envelope, the persistent alias registry, and the
//! orchestrator that runs each user action against the store.

pub mod envelope;
pub mod orchestrator;
pub mod registry;

pub use envelope::Envelope;
pub use orchestrator::{NewEvent, NewReminder, Orchestrator};
pub use registry::{AliasRegistry, FsRegistryStore, MemoryRegistryStore, RegistryStore};
