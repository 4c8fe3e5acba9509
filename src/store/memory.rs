//! In-memory store for unit tests
//!
//! Holds the document behind a mutex and can be switched to deny access,
//! which the real backend may do when the user has not granted permission.

use crate::error::Result;
use crate::store::document::StoreDocument;
use crate::store::types::{
    Collection, CollectionKind, EventDraft, EventPatch, EventRecord, ReminderDraft,
    ReminderPatch, ReminderRecord,
};
use crate::store::{AccessResult, DateWindow, EventStore};
use std::sync::Mutex;

pub struct MemoryStore {
    document: Mutex<StoreDocument>,
    access: AccessResult,
}

impl MemoryStore {
    /// A seeded store with access granted.
    pub fn new() -> Self {
        Self::with_document(StoreDocument::seeded())
    }

    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: Mutex::new(document),
            access: AccessResult::Granted,
        }
    }

    /// A store whose access gate always answers `Denied`.
    pub fn denying_access() -> Self {
        Self {
            document: Mutex::new(StoreDocument::seeded()),
            access: AccessResult::Denied,
        }
    }

    /// Copy of the current document, for asserting on state in tests.
    pub fn snapshot(&self) -> StoreDocument {
        self.document.lock().expect("store lock").clone()
    }

    fn read<T>(&self, operation: impl FnOnce(&StoreDocument) -> Result<T>) -> Result<T> {
        operation(&self.document.lock().expect("store lock"))
    }

    fn mutate<T>(&self, operation: impl FnOnce(&mut StoreDocument) -> Result<T>) -> Result<T> {
        operation(&mut self.document.lock().expect("store lock"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore for MemoryStore {
    fn request_access(&self) -> Result<AccessResult> {
        Ok(self.access)
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
