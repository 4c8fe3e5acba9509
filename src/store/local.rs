//! File-backed store
//!
//! Keeps the whole store document in one JSON file at a user-scoped path,
//! read-modify-written whole per operation, mirroring the registry's
//! persistence discipline. On first access the document is seeded with a
//! default calendar and reminder list so the binary works out of the box.
//!
//! A corrupt store document is a hard persistence error; the alias
//! registry's best-effort load does not extend to user data.

use crate::error::{AgendaError, Result};
use crate::store::document::StoreDocument;
use crate::store::types::{
    Collection, CollectionKind, EventDraft, EventPatch, EventRecord, ReminderDraft,
    ReminderPatch, ReminderRecord,
};
use crate::store::{AccessResult, DateWindow, EventStore};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Store backed by a single JSON document on disk.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_document(&self) -> Result<StoreDocument> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No store document at {}, seeding", self.path.display());
                let document = StoreDocument::seeded();
                self.write_document(&document)?;
                return Ok(document);
            }
            Err(err) => {
                return Err(AgendaError::persistence_io(
                    format!("Failed to read store document: {}", self.path.display()),
                    &self.path,
                    err,
                ));
            }
        };
        serde_json::from_str(&text).map_err(|err| {
            AgendaError::persistence(
                format!(
                    "Failed to parse store document {}: {err}",
                    self.path.display()
                ),
                &self.path,
            )
        })
    }

    fn write_document(&self, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                AgendaError::persistence_io(
                    format!("Failed to create store directory: {}", parent.display()),
                    parent,
                    err,
                )
            })?;
        }
        let text = serde_json::to_string_pretty(document).map_err(|err| {
            AgendaError::serialization(format!("Failed to encode store document: {err}"))
        })?;
        fs::write(&self.path, text).map_err(|err| {
            AgendaError::persistence_io(
                format!("Failed to write store document: {}", self.path.display()),
                &self.path,
                err,
            )
        })
    }

    fn read<T>(&self, operation: impl FnOnce(&StoreDocument) -> Result<T>) -> Result<T> {
        let document = self.read_document()?;
        operation(&document)
    }

    fn mutate<T>(&self, operation: impl FnOnce(&mut StoreDocument) -> Result<T>) -> Result<T> {
        let mut document = self.read_document()?;
        let outcome = operation(&mut document)?;
        self.write_document(&document)?;
        Ok(outcome)
    }
}

impl EventStore for LocalStore {
    fn request_access(&self) -> Result<AccessResult> {
        // The local store has no permission model of its own.
        Ok(AccessResult::Granted)
    }

    fn list_collections(&self, kind: Option<CollectionKind>) -> Result<Vec<Collection>> {
        self.read(|document| Ok(document.list_collections(kind)))
    }

    fn list_events(&self, calendar_id: &str, window: &DateWindow) -> Result<Vec<EventRecord>> {
        self.read(|document| document.list_events(calendar_id, window))
    }

    fn get_event(&self, id: &str) -> Result<EventRecord> {
        self.read(|document| document.get_event(id))
    }

    fn create_event(&self, calendar_id: &str, draft: EventDraft) -> Result<EventRecord> {
        self.mutate(|document| document.create_event(calendar_id, draft))
    }

    fn update_event(&self, id: &str, patch: EventPatch) -> Result<EventRecord> {
        self.mutate(|document| document.update_event(id, patch))
    }

    fn delete_event(&self, id: &str) -> Result<()> {
        self.mutate(|document| document.delete_event(id))
    }

    fn list_reminders(
        &self,
        list_id: &str,
        include_completed: bool,
    ) -> Result<Vec<ReminderRecord>> {
        self.read(|document| document.list_reminders(list_id, include_completed))
    }

    fn get_reminder(&self, id: &str) -> Result<ReminderRecord> {
        self.read(|document| document.get_reminder(id))
    }

    fn create_reminder(&self, list_id: &str, draft: ReminderDraft) -> Result<ReminderRecord> {
        self.mutate(|document| document.create_reminder(list_id, draft))
    }

    fn update_reminder(&self, id: &str, patch: ReminderPatch) -> Result<ReminderRecord> {
        self.mutate(|document| document.update_reminder(id, patch))
    }

    fn delete_reminder(&self, id: &str) -> Result<()> {
        self.mutate(|document| document.delete_reminder(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> LocalStore {
        LocalStore::new(temp_dir.path().join("data").join("store.json"))
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Standup".to_string(),
            start: "2026-03-14T09:00:00".to_string(),
            end: "2026-03-14T09:15:00".to_string(),
            all_day: false,
            location: None,
            notes: None,
        }
    }

    #[test]
    fn test_first_access_seeds_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let collections = store.list_collections(None).unwrap();
        assert_eq!(collections.len(), 2);
        assert!(temp_dir.path().join("data").join("store.json").exists());
    }

    #[test]
    fn test_created_event_survives_reopening() {
        let temp_dir = TempDir::new().unwrap();
        let created = store_in(&temp_dir).create_event("CAL-1", draft()).unwrap();

        let reopened = store_in(&temp_dir);
        let fetched = reopened.get_event(&created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_ids_stay_unique_across_invocations() {
        let temp_dir = TempDir::new().unwrap();
        let first = store_in(&temp_dir).create_event("CAL-1", draft()).unwrap();
        let second = store_in(&temp_dir).create_event("CAL-1", draft()).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_corrupt_document_is_a_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        std::fs::write(&path, "{broken").unwrap();
        let store = LocalStore::new(path);
        let err = store.list_collections(None).unwrap_err();
        assert!(matches!(err, AgendaError::Persistence { .. }));
    }

    #[test]
    fn test_failed_operation_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.list_collections(None).unwrap();

        let before = std::fs::read_to_string(temp_dir.path().join("data").join("store.json"))
            .unwrap();
        store.create_event("CAL-404", draft()).unwrap_err();
        let after = std::fs::read_to_string(temp_dir.path().join("data").join("store.json"))
            .unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_access_is_always_granted() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(
            store_in(&temp_dir).request_access().unwrap(),
            AccessResult::Granted
        );
    }
}
