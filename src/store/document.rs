//! Store document and its CRUD semantics
//!
//! Both store backings operate on the same persisted shape: one document
//! holding collections, events, and reminders. All domain rules (existence
//! checks, read-only collections, field validation, deterministic not-found
//! messages) live here so the file and memory backings cannot drift apart.

use crate::error::{AgendaError, Result};
use crate::store::types::{
    Collection, CollectionKind, EventDraft, EventPatch, EventRecord, ReminderDraft,
    ReminderPatch, ReminderRecord,
};
use crate::store::DateWindow;
use serde::{Deserialize, Serialize};

/// Current schema version written on every save.
const STORE_VERSION: u32 = 1;

/// Persisted store document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDocument {
    pub collections: Vec<Collection>,
    pub events: Vec<EventRecord>,
    pub reminders: Vec<ReminderRecord>,
    next_id: u64,
    version: u32,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            collections: Vec::new(),
            events: Vec::new(),
            reminders: Vec::new(),
            next_id: 0,
            version: STORE_VERSION,
        }
    }
}

impl StoreDocument {
    /// A fresh document holding one default calendar and one default
    /// reminder list, used when no persisted document exists yet.
    pub fn seeded() -> Self {
        Self {
            collections: vec![
                Collection {
                    id: "CAL-1".to_string(),
                    title: "Personal".to_string(),
                    kind: CollectionKind::Calendar,
                    color: Some("#1badf8".to_string()),
                    read_only: false,
                },
                Collection {
                    id: "LIST-1".to_string(),
                    title: "Reminders".to_string(),
                    kind: CollectionKind::Reminders,
                    color: Some("#ff9500".to_string()),
                    read_only: false,
                },
            ],
            ..Self::default()
        }
    }

    fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    /// Look up a collection of the expected kind, with the deterministic
    /// not-found message for that kind. A collection that exists under the
    /// wrong kind is reported as not found, not as a type mismatch.
    fn collection_of_kind(&self, id: &str, kind: CollectionKind) -> Result<&Collection> {
        self.collections
            .iter()
            .find(|collection| collection.id == id && collection.kind == kind)
            .ok_or_else(|| AgendaError::not_found(kind.entity_name(), id))
    }

    fn writable_collection(&self, id: &str, kind: CollectionKind) -> Result<&Collection> {
        let collection = self.collection_of_kind(id, kind)?;
        if collection.read_only {
            return Err(AgendaError::permission(format!(
                "{} is read-only: {}",
                kind.entity_name(),
                id
            )));
        }
        Ok(collection)
    }

    pub fn list_collections(&self, kind: Option<CollectionKind>) -> Vec<Collection> {
        self.collections
            .iter()
            .filter(|collection| kind.is_none_or(|kind| collection.kind == kind))
            .cloned()
            .collect()
    }

    pub fn list_events(
        &self,
        calendar_id: &str,
        window: &DateWindow,
    ) -> Result<Vec<EventRecord>> {
        self.collection_of_kind(calendar_id, CollectionKind::Calendar)?;
        Ok(self
            .events
            .iter()
            .filter(|event| event.calendar_id == calendar_id && window.contains(&event.start))
            .cloned()
            .collect())
    }

    pub fn get_event(&self, id: &str) -> Result<EventRecord> {
        self.events
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or_else(|| AgendaError::not_found("Event", id))
    }

    pub fn create_event(&mut self, calendar_id: &str, draft: EventDraft) -> Result<EventRecord> {
        if draft.title.trim().is_empty() {
            return Err(AgendaError::validation("Event title must not be empty"));
        }
        self.writable_collection(calendar_id, CollectionKind::Calendar)?;

        let event = EventRecord {
            id: self.allocate_id("EV"),
            calendar_id: calendar_id.to_string(),
            title: draft.title,
            start: draft.start,
            end: draft.end,
            all_day: draft.all_day,
            location: draft.location,
            notes: draft.notes,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    pub fn update_event(&mut self, id: &str, patch: EventPatch) -> Result<EventRecord> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AgendaError::validation("Event title must not be empty"));
        }
        let event = self
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| AgendaError::not_found("Event", id))?;

        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(start) = patch.start {
            event.start = start;
        }
        if let Some(end) = patch.end {
            event.end = end;
        }
        if let Some(all_day) = patch.all_day {
            event.all_day = all_day;
        }
        if let Some(location) = patch.location {
            event.location = Some(location);
        }
        if let Some(notes) = patch.notes {
            event.notes = Some(notes);
        }
        Ok(event.clone())
    }

    pub fn delete_event(&mut self, id: &str) -> Result<()> {
        let before = self.events.len();
        self.events.retain(|event| event.id != id);
        if self.events.len() == before {
            return Err(AgendaError::not_found("Event", id));
        }
        Ok(())
    }

    pub fn list_reminders(
        &self,
        list_id: &str,
        include_completed: bool,
    ) -> Result<Vec<ReminderRecord>> {
        self.collection_of_kind(list_id, CollectionKind::Reminders)?;
        Ok(self
            .reminders
            .iter()
            .filter(|reminder| {
                reminder.list_id == list_id && (include_completed || !reminder.completed)
            })
            .cloned()
            .collect())
    }

    pub fn get_reminder(&self, id: &str) -> Result<ReminderRecord> {
        self.reminders
            .iter()
            .find(|reminder| reminder.id == id)
            .cloned()
            .ok_or_else(|| AgendaError::not_found("Reminder", id))
    }

    pub fn create_reminder(
        &mut self,
        list_id: &str,
        draft: ReminderDraft,
    ) -> Result<ReminderRecord> {
        if draft.title.trim().is_empty() {
            return Err(AgendaError::validation("Reminder title must not be empty"));
        }
        self.writable_collection(list_id, CollectionKind::Reminders)?;

        let reminder = ReminderRecord {
            id: self.allocate_id("REM"),
            list_id: list_id.to_string(),
            title: draft.title,
            due: draft.due,
            completed: false,
            priority: draft.priority,
            notes: draft.notes,
        };
        self.reminders.push(reminder.clone());
        Ok(reminder)
    }

    pub fn update_reminder(&mut self, id: &str, patch: ReminderPatch) -> Result<ReminderRecord> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AgendaError::validation("Reminder title must not be empty"));
        }
        let reminder = self
            .reminders
            .iter_mut()
            .find(|reminder| reminder.id == id)
            .ok_or_else(|| AgendaError::not_found("Reminder", id))?;

        if let Some(title) = patch.title {
            reminder.title = title;
        }
        if let Some(due) = patch.due {
            reminder.due = Some(due);
        }
        if let Some(completed) = patch.completed {
            reminder.completed = completed;
        }
        if let Some(priority) = patch.priority {
            reminder.priority = priority;
        }
        if let Some(notes) = patch.notes {
            reminder.notes = Some(notes);
        }
        Ok(reminder.clone())
    }

    pub fn delete_reminder(&mut self, id: &str) -> Result<()> {
        let before = self.reminders.len();
        self.reminders.retain(|reminder| reminder.id != id);
        if self.reminders.len() == before {
            return Err(AgendaError::not_found("Reminder", id));
        }
        Ok(())
    }
}
