//! Command implementations for the CLI
//!
//! Thin glue: each arm maps parsed flags onto one orchestrator action. All
//! outcomes, success or failure, come back as a result envelope.

use crate::{
    cli::{AliasAction, Command, EventAction, ReminderAction},
    config::Config,
    core::{AliasRegistry, Envelope, FsRegistryStore, NewEvent, NewReminder, Orchestrator},
    store::{EventPatch, LocalStore, ReminderPatch},
};
use tracing::{info, instrument};

/// Execute the appropriate command based on CLI arguments
#[instrument(skip(config, command))]
pub fn execute_command(config: &Config, command: &Command) -> Envelope {
    let registry = AliasRegistry::new(FsRegistryStore::new(config.registry_path()));
    let store = LocalStore::new(config.store_path());
    let agenda = Orchestrator::new(store, registry);

    match command {
        Command::Calendars => {
            info!("Listing calendars");
            agenda.calendars()
        }
        Command::Events { action } => execute_event_action(&agenda, action),
        Command::Reminders { action } => execute_reminder_action(&agenda, action),
        Command::Alias { action } => execute_alias_action(&agenda, action),
    }
}

fn execute_event_action(
    agenda: &Orchestrator<LocalStore, FsRegistryStore>,
    action: &EventAction,
) -> Envelope {
    match action {
        EventAction::List { calendar, from, to } => {
            info!("Listing events in calendar {}", calendar);
            agenda.list_events(calendar, from.as_deref(), to.as_deref())
        }
        EventAction::Show { id } => agenda.show_event(id),
        EventAction::Create {
            calendar,
            title,
            start,
            end,
            all_day,
            location,
            notes,
        } => {
            info!("Creating event in calendar {}", calendar);
            agenda.create_event(
                calendar,
                NewEvent {
                    title: title.clone(),
                    start: start.clone(),
                    end: end.clone(),
                    all_day: *all_day,
                    location: location.clone(),
                    notes: notes.clone(),
                },
            )
        }
        EventAction::Update {
            id,
            title,
            start,
            end,
            all_day,
            location,
            notes,
        } => agenda.update_event(
            id,
            EventPatch {
                title: title.clone(),
                start: start.clone(),
                end: end.clone(),
                all_day: *all_day,
                location: location.clone(),
                notes: notes.clone(),
            },
        ),
        EventAction::Delete { id } => {
            info!("Deleting event {}", id);
            agenda.delete_event(id)
        }
    }
}

fn execute_reminder_action(
    agenda: &Orchestrator<LocalStore, FsRegistryStore>,
    action: &ReminderAction,
) -> Envelope {
    match action {
        ReminderAction::Lists => {
            info!("Listing reminder lists");
            agenda.reminder_lists()
        }
        ReminderAction::List {
            list,
            include_completed,
        } => {
            info!("Listing reminders in list {}", list);
            agenda.list_reminders(list, *include_completed)
        }
        ReminderAction::Show { id } => agenda.show_reminder(id),
        ReminderAction::Create {
            list,
            title,
            due,
            priority,
            notes,
        } => {
            info!("Creating reminder in list {}", list);
            agenda.create_reminder(
                list,
                NewReminder {
                    title: title.clone(),
                    due: due.clone(),
                    priority: *priority,
                    notes: notes.clone(),
                },
            )
        }
        ReminderAction::Complete { id } => {
            info!("Completing reminder {}", id);
            agenda.complete_reminder(id)
        }
        ReminderAction::Update {
            id,
            title,
            due,
            completed,
            priority,
            notes,
        } => agenda.update_reminder(
            id,
            ReminderPatch {
                title: title.clone(),
                due: due.clone(),
                completed: *completed,
                priority: *priority,
                notes: notes.clone(),
            },
        ),
        ReminderAction::Delete { id } => {
            info!("Deleting reminder {}", id);
            agenda.delete_reminder(id)
        }
    }
}

fn execute_alias_action(
    agenda: &Orchestrator<LocalStore, FsRegistryStore>,
    action: &AliasAction,
) -> Envelope {
    match action {
        AliasAction::Set { name, id } => {
            info!("Setting alias {} -> {}", name, id);
            agenda.set_alias(name, id)
        }
        AliasAction::Remove { name } => {
            info!("Removing alias {}", name);
            agenda.remove_alias(name)
        }
        AliasAction::List => agenda.list_aliases(),
    }
}
