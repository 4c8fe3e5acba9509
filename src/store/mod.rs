//! Calendar/reminder store boundary
//!
//! The CLI core talks to the backend through the [`EventStore`] trait and
//! treats every call as a single blocking request with one terminal result.
//! [`LocalStore`] is the file-backed production default; [`MemoryStore`]
//! backs unit tests.

pub mod document;
pub mod local;
pub mod memory;
pub mod types;

pub use document::StoreDocument;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use types::{
    Collection, CollectionKind, EventDraft, EventPatch, EventRecord, ReminderDraft,
    ReminderPatch, ReminderRecord,
};

use crate::error::Result;
use crate::utils::dates;
use chrono::NaiveDateTime;

/// Terminal result of the access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessResult {
    Granted,
    Denied,
}

/// Inclusive date range used to filter event listings.
///
/// Bounds are optional on both sides; an empty window matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateWindow {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateWindow {
    /// Whether an event starting at `start` falls inside the window.
    ///
    /// A stored start that no longer parses is kept rather than silently
    /// dropped from listings.
    pub fn contains(&self, start: &str) -> bool {
        let Ok(start) = dates::parse_datetime(start) else {
            return true;
        };
        if let Some(from) = self.from {
            if start < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if start > to {
                return false;
            }
        }
        true
    }
}

/// Read/write access to calendars, events, reminder lists, and reminders.
///
/// Domain failures are reported through the error taxonomy: `NotFound` for
/// unknown identifiers, `Validation` for rejected fields, `Permission` for
/// denied access or read-only collections.
pub trait EventStore {
    /// Access gate, called once before any other operation. A `Denied`
    /// result is fatal and never retried.
    fn request_access(&self) -> Result<AccessResult>;

    /// All collections, optionally restricted to one kind.
    fn list_collections(&self, kind: Option<CollectionKind>) -> Result<Vec<Collection>>;

    fn list_events(&self, calendar_id: &str, window: &DateWindow) -> Result<Vec<EventRecord>>;
    fn get_event(&self, id: &str) -> Result<EventRecord>;
    fn create_event(&self, calendar_id: &str, draft: EventDraft) -> Result<EventRecord>;
    fn update_event(&self, id: &str, patch: EventPatch) -> Result<EventRecord>;
    fn delete_event(&self, id: &str) -> Result<()>;

    fn list_reminders(&self, list_id: &str, include_completed: bool)
        -> Result<Vec<ReminderRecord>>;
    fn get_reminder(&self, id: &str) -> Result<ReminderRecord>;
    fn create_reminder(&self, list_id: &str, draft: ReminderDraft) -> Result<ReminderRecord>;
    fn update_reminder(&self, id: &str, patch: ReminderPatch) -> Result<ReminderRecord>;
    fn delete_reminder(&self, id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(input: &str) -> Option<NaiveDateTime> {
        Some(dates::parse_datetime(input).unwrap())
    }

    #[test]
    fn test_empty_window_matches_everything() {
        let window = DateWindow::default();
        assert!(window.contains("2026-01-01T00:00:00"));
        assert!(window.contains("not a date"));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = DateWindow {
            from: at("2026-03-01"),
            to: at("2026-03-31T23:59:59"),
        };
        assert!(window.contains("2026-03-01T00:00:00"));
        assert!(window.contains("2026-03-15T12:00:00"));
        assert!(window.contains("2026-03-31T23:59:59"));
        assert!(!window.contains("2026-02-28T23:59:59"));
        assert!(!window.contains("2026-04-01T00:00:00"));
    }
}
