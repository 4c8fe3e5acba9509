//! Record types exchanged across the store boundary
//!
//! Identifiers in these records are opaque backend-assigned strings; the CLI
//! never interprets them beyond equality, and never maps them back through
//! the alias registry on output.

use serde::{Deserialize, Serialize};

/// Kind discriminator for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Holds events
    Calendar,
    /// Holds reminders
    Reminders,
}

impl CollectionKind {
    /// The entity name used in not-found messages, e.g. `Calendar`.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Calendar => "Calendar",
            Self::Reminders => "Reminder list",
        }
    }
}

/// A calendar or reminder list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    pub kind: CollectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub read_only: bool,
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    /// ISO-8601 local date-time
    pub start: String,
    /// ISO-8601 local date-time
    pub end: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A reminder-list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRecord {
    pub id: String,
    pub list_id: String,
    pub title: String,
    /// ISO-8601 local date-time, absent for undated reminders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// 0 = no priority, 1 (highest) through 9 (lowest)
    #[serde(default)]
    pub priority: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields for a new event. Dates are already validated by the caller.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for an event; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: Option<bool>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl EventPatch {
    /// A patch that changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.all_day.is_none()
            && self.location.is_none()
            && self.notes.is_none()
    }
}

/// Fields for a new reminder. The due date is already validated by the caller.
#[derive(Debug, Clone)]
pub struct ReminderDraft {
    pub title: String,
    pub due: Option<String>,
    pub priority: u8,
    pub notes: Option<String>,
}

/// Partial update for a reminder; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub due: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<u8>,
    pub notes: Option<String>,
}

impl ReminderPatch {
    /// A patch that changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.due.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.notes.is_none()
    }
}
