//! Command orchestration
//!
//! One method per user-facing action. Each action runs the same pipeline:
//! validate local input (fail-fast, before any backend call, the access gate
//! included), resolve identifier-shaped parameters through the alias
//! registry, pass the access gate, dispatch to the store, and wrap the
//! outcome in a result envelope. No error escapes this layer: every failure
//! becomes an error envelope.
//!
//! Aliasing is input-side sugar only. Identifiers returned by the store are
//! passed through to the output verbatim, never mapped back to alias names.

use crate::core::envelope::Envelope;
use crate::core::registry::{AliasRegistry, RegistryStore};
use crate::error::{AgendaError, Result};
use crate::store::{
    AccessResult, CollectionKind, DateWindow, EventDraft, EventPatch, EventStore,
    ReminderDraft, ReminderPatch,
};
use crate::utils::dates;
use chrono::Duration;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Event length used when `--end` is not given.
const DEFAULT_EVENT_MINUTES: i64 = 60;

/// Fields for a new event as they arrive from the command line; the end is
/// optional and defaults to one hour after the start.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub all_day: bool,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Fields for a new reminder as they arrive from the command line.
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub title: String,
    pub due: Option<String>,
    pub priority: u8,
    pub notes: Option<String>,
}

/// Executes user actions against a store and an alias registry.
pub struct Orchestrator<S: EventStore, R: RegistryStore> {
    store: S,
    registry: AliasRegistry<R>,
}

impl<S: EventStore, R: RegistryStore> Orchestrator<S, R> {
    pub fn new(store: S, registry: AliasRegistry<R>) -> Self {
        Self { store, registry }
    }

    // Calendar and event actions

    pub fn calendars(&self) -> Envelope {
        envelope_from(|| {
            self.ensure_access()?;
            let calendars = self.store.list_collections(Some(CollectionKind::Calendar))?;
            listing_payload("calendars", &calendars)
        })
    }

    pub fn list_events(&self, calendar: &str, from: Option<&str>, to: Option<&str>) -> Envelope {
        envelope_from(|| {
            let window = DateWindow {
                from: dates::parse_optional(from)?,
                to: dates::parse_optional(to)?,
            };
            let calendar_id = self.registry.resolve(calendar);
            self.ensure_access()?;
            let events = self.store.list_events(&calendar_id, &window)?;
            listing_payload("events", &events)
        })
    }

    pub fn show_event(&self, id: &str) -> Envelope {
        envelope_from(|| {
            self.ensure_access()?;
            record_payload("event", &self.store.get_event(id)?)
        })
    }

    pub fn create_event(&self, calendar: &str, event: NewEvent) -> Envelope {
        envelope_from(|| {
            let (start, end) = resolve_event_times(&event.start, event.end.as_deref())?;
            let calendar_id = self.registry.resolve(calendar);
            self.ensure_access()?;
            let created = self.store.create_event(
                &calendar_id,
                EventDraft {
                    title: event.title,
                    start,
                    end,
                    all_day: event.all_day,
                    location: event.location,
                    notes: event.notes,
                },
            )?;
            debug!("Created event {}", created.id);
            record_payload("event", &created)
        })
    }

    pub fn update_event(&self, id: &str, patch: EventPatch) -> Envelope {
        envelope_from(|| {
            if patch.is_empty() {
                return Err(AgendaError::validation("No fields to update"));
            }
            if let Some(start) = patch.start.as_deref() {
                dates::parse_datetime(start)?;
            }
            if let Some(end) = patch.end.as_deref() {
                dates::parse_datetime(end)?;
            }
            self.ensure_access()?;
            record_payload("event", &self.store.update_event(id, patch)?)
        })
    }

    pub fn delete_event(&self, id: &str) -> Envelope {
        envelope_from(|| {
            self.ensure_access()?;
            self.store.delete_event(id)?;
            deletion_payload(id)
        })
    }

    // Reminder actions

    pub fn reminder_lists(&self) -> Envelope {
        envelope_from(|| {
            self.ensure_access()?;
            let lists = self.store.list_collections(Some(CollectionKind::Reminders))?;
            listing_payload("lists", &lists)
        })
    }

    pub fn list_reminders(&self, list: &str, include_completed: bool) -> Envelope {
        envelope_from(|| {
            let list_id = self.registry.resolve(list);
            self.ensure_access()?;
            let reminders = self.store.list_reminders(&list_id, include_completed)?;
            listing_payload("reminders", &reminders)
        })
    }

    pub fn show_reminder(&self, id: &str) -> Envelope {
        envelope_from(|| {
            self.ensure_access()?;
            record_payload("reminder", &self.store.get_reminder(id)?)
        })
    }

    pub fn create_reminder(&self, list: &str, reminder: NewReminder) -> Envelope {
        envelope_from(|| {
            if let Some(due) = reminder.due.as_deref() {
                dates::parse_datetime(due)?;
            }
            let list_id = self.registry.resolve(list);
            self.ensure_access()?;
            let created = self.store.create_reminder(
                &list_id,
                ReminderDraft {
                    title: reminder.title,
                    due: reminder.due,
                    priority: reminder.priority,
                    notes: reminder.notes,
                },
            )?;
            debug!("Created reminder {}", created.id);
            record_payload("reminder", &created)
        })
    }

    pub fn complete_reminder(&self, id: &str) -> Envelope {
        envelope_from(|| {
            self.ensure_access()?;
            let patch = ReminderPatch {
                completed: Some(true),
                ..ReminderPatch::default()
            };
            record_payload("reminder", &self.store.update_reminder(id, patch)?)
        })
    }

    pub fn update_reminder(&self, id: &str, patch: ReminderPatch) -> Envelope {
        envelope_from(|| {
            if patch.is_empty() {
                return Err(AgendaError::validation("No fields to update"));
            }
            if let Some(due) = patch.due.as_deref() {
                dates::parse_datetime(due)?;
            }
            self.ensure_access()?;
            record_payload("reminder", &self.store.update_reminder(id, patch)?)
        })
    }

    pub fn delete_reminder(&self, id: &str) -> Envelope {
        envelope_from(|| {
            self.ensure_access()?;
            self.store.delete_reminder(id)?;
            deletion_payload(id)
        })
    }

    // Alias actions: registry only, the store capability is never touched
    // and its access gate is never exercised.

    pub fn set_alias(&self, name: &str, id: &str) -> Envelope {
        envelope_from(|| {
            self.registry.set_alias(name, id)?;
            let mut payload = Map::new();
            payload.insert("alias".to_string(), Value::String(name.to_string()));
            payload.insert("id".to_string(), Value::String(id.to_string()));
            Ok(payload)
        })
    }

    pub fn remove_alias(&self, name: &str) -> Envelope {
        envelope_from(|| {
            let removed = self.registry.remove_alias(name)?;
            let mut payload = Map::new();
            payload.insert("alias".to_string(), Value::String(name.to_string()));
            payload.insert("removed".to_string(), Value::Bool(removed));
            Ok(payload)
        })
    }

    pub fn list_aliases(&self) -> Envelope {
        envelope_from(|| {
            let aliases = self.registry.aliases();
            let mut payload = Map::new();
            payload.insert("count".to_string(), Value::from(aliases.len()));
            payload.insert("aliases".to_string(), to_json(&aliases)?);
            payload.insert(
                "location".to_string(),
                Value::String(self.registry.location()),
            );
            Ok(payload)
        })
    }

    /// The access gate, exercised once per action after local validation and
    /// before the first store call. `Denied` is fatal and never retried.
    fn ensure_access(&self) -> Result<()> {
        match self.store.request_access()? {
            AccessResult::Granted => Ok(()),
            AccessResult::Denied => Err(AgendaError::permission(
                "Access to the calendar store was denied",
            )),
        }
    }
}

fn envelope_from(action: impl FnOnce() -> Result<Map<String, Value>>) -> Envelope {
    match action() {
        Ok(payload) => Envelope::success(payload),
        Err(err) => Envelope::error(err.to_string()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|err| AgendaError::serialization(format!("Failed to encode result: {err}")))
}

fn listing_payload<T: Serialize>(key: &str, records: &[T]) -> Result<Map<String, Value>> {
    let mut payload = Map::new();
    payload.insert("count".to_string(), Value::from(records.len()));
    payload.insert(key.to_string(), to_json(records)?);
    Ok(payload)
}

fn record_payload<T: Serialize>(key: &str, record: &T) -> Result<Map<String, Value>> {
    let mut payload = Map::new();
    payload.insert(key.to_string(), to_json(record)?);
    Ok(payload)
}

fn deletion_payload(id: &str) -> Result<Map<String, Value>> {
    let mut payload = Map::new();
    payload.insert("deleted".to_string(), Value::Bool(true));
    payload.insert("id".to_string(), Value::String(id.to_string()));
    Ok(payload)
}

/// Validate the start, validate or derive the end, and reject inverted
/// ranges. The stored strings are the caller's own, not re-formatted.
fn resolve_event_times(start: &str, end: Option<&str>) -> Result<(String, String)> {
    let start_at = dates::parse_datetime(start)?;
    match end {
        Some(end) => {
            let end_at = dates::parse_datetime(end)?;
            if end_at < start_at {
                return Err(AgendaError::validation(
                    "Event end must not be before its start",
                ));
            }
            Ok((start.to_string(), end.to_string()))
        }
        None => {
            let end_at = start_at + Duration::minutes(DEFAULT_EVENT_MINUTES);
            Ok((
                start.to_string(),
                end_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::MemoryRegistryStore;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn orchestrator() -> Orchestrator<MemoryStore, MemoryRegistryStore> {
        Orchestrator::new(
            MemoryStore::new(),
            AliasRegistry::new(MemoryRegistryStore::new()),
        )
    }

    fn denying_orchestrator() -> Orchestrator<MemoryStore, MemoryRegistryStore> {
        Orchestrator::new(
            MemoryStore::denying_access(),
            AliasRegistry::new(MemoryRegistryStore::new()),
        )
    }

    fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            start: "2026-03-14T09:00:00".to_string(),
            end: Some("2026-03-14T10:00:00".to_string()),
            all_day: false,
            location: None,
            notes: None,
        }
    }

    #[test]
    fn test_calendars_lists_seeded_calendar() {
        let mapping = orchestrator().calendars().as_mapping();
        assert_eq!(mapping["status"], json!("success"));
        assert_eq!(mapping["count"], json!(1));
        assert_eq!(mapping["calendars"][0]["id"], json!("CAL-1"));
    }

    #[test]
    fn test_alias_resolves_on_input_side() {
        let agenda = orchestrator();
        agenda.set_alias("work", "CAL-1");
        let mapping = agenda.create_event("work", new_event("Standup")).as_mapping();
        assert_eq!(mapping["status"], json!("success"));
        // Output carries the raw identifier, never the alias.
        assert_eq!(mapping["event"]["calendar_id"], json!("CAL-1"));
    }

    #[test]
    fn test_unresolved_input_passes_through_and_is_named_in_error() {
        let envelope = orchestrator().list_events("no-such-calendar", None, None);
        assert!(envelope.is_error());
        assert_eq!(
            envelope.as_mapping()["error"],
            json!("Calendar not found with ID: no-such-calendar")
        );
    }

    #[test]
    fn test_denied_access_is_fatal() {
        let envelope = denying_orchestrator().calendars();
        assert!(envelope.is_error());
        assert_eq!(
            envelope.as_mapping()["error"],
            json!("Access to the calendar store was denied")
        );
    }

    #[test]
    fn test_invalid_date_fails_before_access_gate() {
        // The denying store would answer Denied, but validation runs first.
        let agenda = denying_orchestrator();
        let mut event = new_event("Broken");
        event.start = "not-a-date".to_string();
        let mapping = agenda.create_event("CAL-1", event).as_mapping();
        assert!(
            mapping["error"].as_str().unwrap().starts_with("Invalid date"),
            "got: {}",
            mapping["error"]
        );
    }

    #[test]
    fn test_invalid_window_fails_before_store_call() {
        let envelope = orchestrator().list_events("CAL-1", Some("soonish"), None);
        assert!(envelope.is_error());
        assert!(envelope.as_mapping()["error"]
            .as_str()
            .unwrap()
            .contains("Invalid date"));
    }

    #[test]
    fn test_event_end_defaults_to_one_hour() {
        let agenda = orchestrator();
        let mut event = new_event("Open ended");
        event.end = None;
        let mapping = agenda.create_event("CAL-1", event).as_mapping();
        assert_eq!(mapping["event"]["end"], json!("2026-03-14T10:00:00"));
    }

    #[test]
    fn test_event_end_before_start_rejected() {
        let agenda = orchestrator();
        let mut event = new_event("Backwards");
        event.end = Some("2026-03-14T08:00:00".to_string());
        let envelope = agenda.create_event("CAL-1", event);
        assert!(envelope.is_error());
        assert_eq!(
            envelope.as_mapping()["error"],
            json!("Event end must not be before its start")
        );
    }

    #[test]
    fn test_show_update_delete_event_round() {
        let agenda = orchestrator();
        let created = agenda.create_event("CAL-1", new_event("Review")).as_mapping();
        let id = created["event"]["id"].as_str().unwrap().to_string();

        let shown = agenda.show_event(&id).as_mapping();
        assert_eq!(shown["event"]["title"], json!("Review"));

        let patch = EventPatch {
            title: Some("Design review".to_string()),
            ..EventPatch::default()
        };
        let updated = agenda.update_event(&id, patch).as_mapping();
        assert_eq!(updated["event"]["title"], json!("Design review"));

        let deleted = agenda.delete_event(&id).as_mapping();
        assert_eq!(deleted["deleted"], json!(true));
        assert_eq!(deleted["id"], json!(id));

        let missing = agenda.show_event(&id);
        assert!(missing.is_error());
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let agenda = orchestrator();
        let envelope = agenda.update_event("EV-1", EventPatch::default());
        assert_eq!(envelope.as_mapping()["error"], json!("No fields to update"));
    }

    #[test]
    fn test_complete_reminder_marks_completed() {
        let agenda = orchestrator();
        let created = agenda
            .create_reminder(
                "LIST-1",
                NewReminder {
                    title: "Water plants".to_string(),
                    due: None,
                    priority: 0,
                    notes: None,
                },
            )
            .as_mapping();
        let id = created["reminder"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["reminder"]["completed"], json!(false));

        let completed = agenda.complete_reminder(&id).as_mapping();
        assert_eq!(completed["reminder"]["completed"], json!(true));

        // Gone from the default listing, still visible with completed items.
        let open = agenda.list_reminders("LIST-1", false).as_mapping();
        assert_eq!(open["count"], json!(0));
        let all = agenda.list_reminders("LIST-1", true).as_mapping();
        assert_eq!(all["count"], json!(1));
    }

    #[test]
    fn test_alias_actions_skip_the_access_gate() {
        let agenda = denying_orchestrator();
        let set = agenda.set_alias("work", "CAL-1").as_mapping();
        assert_eq!(set["status"], json!("success"));

        let listed = agenda.list_aliases().as_mapping();
        assert_eq!(listed["aliases"]["work"], json!("CAL-1"));
        assert_eq!(listed["count"], json!(1));

        let removed = agenda.remove_alias("work").as_mapping();
        assert_eq!(removed["removed"], json!(true));
        let removed_again = agenda.remove_alias("work").as_mapping();
        assert_eq!(removed_again["removed"], json!(false));
    }

    #[test]
    fn test_alias_list_reports_registry_location() {
        let mapping = orchestrator().list_aliases().as_mapping();
        assert_eq!(mapping["location"], json!("<memory>"));
    }

    #[test]
    fn test_failed_mutation_leaves_store_untouched() {
        let agenda = orchestrator();
        let mut event = new_event("Never lands");
        event.start = "garbage".to_string();
        assert!(agenda.create_event("CAL-1", event).is_error());
        assert!(agenda.store.snapshot().events.is_empty());
    }
}
