//! Persistent alias registry
//!
//! Maps short user-chosen names to opaque backend identifiers. The registry
//! document is loaded whole on every read and rewritten whole on every write;
//! there are no partial updates. A missing or unparseable document is read as
//! an empty registry ("best-effort load") rather than surfaced as an error.
//!
//! The persisted document is shared across process invocations without any
//! cross-process locking, so concurrent invocations racing on the same file
//! may lose updates (last writer wins). This is an accepted limitation.

use crate::error::{AgendaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Current schema version written on every save.
const REGISTRY_VERSION: u32 = 1;

/// Persisted registry document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Alias name to backend identifier; names are unique, identifiers are not
    pub aliases: BTreeMap<String, String>,
    /// Schema version for forward compatibility
    pub version: u32,
}

impl Default for RegistryDocument {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::new(),
            version: REGISTRY_VERSION,
        }
    }
}

/// Backing storage for the registry document.
///
/// Injected into [`AliasRegistry`] at construction so the "reads/writes a
/// fixed path" behavior stays a testable dependency instead of hidden global
/// state.
pub trait RegistryStore {
    /// Read the raw persisted document. `Ok(None)` means no document exists.
    fn load(&self) -> Result<Option<String>>;
    /// Replace the persisted document with `text` in one write.
    fn save(&self, text: &str) -> Result<()>;
    /// Human-displayable locator of the persisted document, diagnostics only.
    fn location(&self) -> String;
}

/// Registry store backed by a single file on disk.
#[derive(Debug)]
pub struct FsRegistryStore {
    path: PathBuf,
}

impl FsRegistryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RegistryStore for FsRegistryStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AgendaError::persistence_io(
                format!("Failed to read alias registry: {}", self.path.display()),
                &self.path,
                err,
            )),
        }
    }

    fn save(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                AgendaError::persistence_io(
                    format!("Failed to create registry directory: {}", parent.display()),
                    parent,
                    err,
                )
            })?;
        }
        fs::write(&self.path, text).map_err(|err| {
            AgendaError::persistence_io(
                format!("Failed to write alias registry: {}", self.path.display()),
                &self.path,
                err,
            )
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory registry store for tests.
#[derive(Debug, Default)]
pub struct MemoryRegistryStore {
    text: Mutex<Option<String>>,
    fail_writes: bool,
}

impl MemoryRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store with raw document text (possibly malformed).
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(Some(text.into())),
            fail_writes: false,
        }
    }

    /// A store whose writes always fail, for persistence-error coverage.
    pub fn failing() -> Self {
        Self {
            text: Mutex::new(None),
            fail_writes: true,
        }
    }
}

impl RegistryStore for MemoryRegistryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.text.lock().expect("registry store lock").clone())
    }

    fn save(&self, text: &str) -> Result<()> {
        if self.fail_writes {
            return Err(AgendaError::persistence(
                "Failed to write alias registry: memory store rejected write",
                "<memory>",
            ));
        }
        *self.text.lock().expect("registry store lock") = Some(text.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

/// Alias registry over an injected store backing.
///
/// Holds no cached state: every read loads the document fresh, so external
/// mutation of the store between calls is visible on the next call.
pub struct AliasRegistry<S: RegistryStore> {
    store: S,
}

impl<S: RegistryStore> AliasRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Add or overwrite an alias, then persist the whole registry.
    ///
    /// Fails with a persistence error if the document cannot be written; the
    /// in-memory document is discarded on failure, so the next read reflects
    /// whatever actually reached storage.
    pub fn set_alias(&self, name: &str, id: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AgendaError::validation("Alias name must not be empty"));
        }
        if id.trim().is_empty() {
            return Err(AgendaError::validation("Alias target ID must not be empty"));
        }

        let mut document = self.load_document();
        document
            .aliases
            .insert(name.to_string(), id.to_string());
        self.persist(&document)?;
        debug!("Alias set: {} -> {}", name, id);
        Ok(())
    }

    /// Remove an alias. Returns `true` and persists when the alias existed;
    /// returns `false` without writing when it did not. Absence is not an
    /// error.
    pub fn remove_alias(&self, name: &str) -> Result<bool> {
        let mut document = self.load_document();
        if document.aliases.remove(name).is_none() {
            debug!("Alias not present, nothing to remove: {}", name);
            return Ok(false);
        }
        self.persist(&document)?;
        debug!("Alias removed: {}", name);
        Ok(true)
    }

    /// The full current mapping, loaded fresh from storage.
    pub fn aliases(&self) -> BTreeMap<String, String> {
        self.load_document().aliases
    }

    /// Resolve a name to its identifier, or return the input unchanged.
    ///
    /// Never fails: an unresolvable input is assumed to already be a raw
    /// identifier and passes through verbatim.
    pub fn resolve(&self, name_or_id: &str) -> String {
        match self.load_document().aliases.get(name_or_id) {
            Some(id) => {
                debug!("Resolved alias {} -> {}", name_or_id, id);
                id.clone()
            }
            None => name_or_id.to_string(),
        }
    }

    /// Displayable locator of the persisted registry, diagnostics only.
    pub fn location(&self) -> String {
        self.store.location()
    }

    /// Best-effort load: a missing document, an unreadable document, or one
    /// that fails to parse all degrade to an empty registry. Availability
    /// over strictness; parse failures are logged, never raised.
    fn load_document(&self) -> RegistryDocument {
        let text = match self.store.load() {
            Ok(Some(text)) => text,
            Ok(None) => return RegistryDocument::default(),
            Err(err) => {
                warn!("Alias registry unreadable, treating as empty: {}", err);
                return RegistryDocument::default();
            }
        };
        match serde_json::from_str::<RegistryDocument>(&text) {
            Ok(document) => document,
            Err(err) => {
                warn!("Alias registry unparseable, treating as empty: {}", err);
                RegistryDocument::default()
            }
        }
    }

    fn persist(&self, document: &RegistryDocument) -> Result<()> {
        let mut document = document.clone();
        document.version = REGISTRY_VERSION;
        let text = serde_json::to_string_pretty(&document).map_err(|err| {
            AgendaError::serialization(format!("Failed to encode alias registry: {err}"))
        })?;
        self.store.save(&text)
    }
}
