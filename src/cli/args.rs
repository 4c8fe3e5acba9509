//! Command-line argument parsing and validation

use clap::{Parser, Subcommand};

/// Agenda - calendar events and reminders from the command line, as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "agenda")]
pub struct Args {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List calendars
    Calendars,

    /// Work with calendar events
    Events {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Work with reminders
    Reminders {
        #[command(subcommand)]
        action: ReminderAction,
    },

    /// Manage aliases for calendar and list identifiers
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },
}

/// Event subcommands
#[derive(Subcommand, Debug)]
pub enum EventAction {
    /// List events in a calendar
    List {
        /// Calendar identifier or alias
        #[arg(short = 'c', long)]
        calendar: String,

        /// Only events starting on or after this date (YYYY-MM-DD[THH:MM:SS])
        #[arg(long)]
        from: Option<String>,

        /// Only events starting on or before this date (YYYY-MM-DD[THH:MM:SS])
        #[arg(long)]
        to: Option<String>,
    },

    /// Show a single event
    Show {
        /// Event identifier
        id: String,
    },

    /// Create an event
    Create {
        /// Calendar identifier or alias
        #[arg(short = 'c', long)]
        calendar: String,

        /// Event title
        #[arg(short = 't', long)]
        title: String,

        /// Start date (YYYY-MM-DD[THH:MM:SS])
        #[arg(short = 's', long)]
        start: String,

        /// End date; defaults to one hour after the start
        #[arg(short = 'e', long)]
        end: Option<String>,

        /// Mark as an all-day event
        #[arg(long)]
        all_day: bool,

        /// Event location
        #[arg(short = 'l', long)]
        location: Option<String>,

        /// Free-text notes
        #[arg(short = 'n', long)]
        notes: Option<String>,
    },

    /// Update fields of an event
    Update {
        /// Event identifier
        id: String,

        /// New title
        #[arg(short = 't', long)]
        title: Option<String>,

        /// New start date (YYYY-MM-DD[THH:MM:SS])
        #[arg(short = 's', long)]
        start: Option<String>,

        /// New end date (YYYY-MM-DD[THH:MM:SS])
        #[arg(short = 'e', long)]
        end: Option<String>,

        /// Change the all-day flag
        #[arg(long)]
        all_day: Option<bool>,

        /// New location
        #[arg(short = 'l', long)]
        location: Option<String>,

        /// New notes
        #[arg(short = 'n', long)]
        notes: Option<String>,
    },

    /// Delete an event
    Delete {
        /// Event identifier
        id: String,
    },
}

/// Reminder subcommands
#[derive(Subcommand, Debug)]
pub enum ReminderAction {
    /// List reminder lists
    Lists,

    /// List reminders in a list
    List {
        /// List identifier or alias
        #[arg(short = 'l', long)]
        list: String,

        /// Include completed reminders
        #[arg(long)]
        include_completed: bool,
    },

    /// Show a single reminder
    Show {
        /// Reminder identifier
        id: String,
    },

    /// Create a reminder
    Create {
        /// List identifier or alias
        #[arg(short = 'l', long)]
        list: String,

        /// Reminder title
        #[arg(short = 't', long)]
        title: String,

        /// Due date (YYYY-MM-DD[THH:MM:SS])
        #[arg(short = 'd', long)]
        due: Option<String>,

        /// Priority: 0 = none, 1 (highest) through 9 (lowest)
        #[arg(short = 'p', long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=9))]
        priority: u8,

        /// Free-text notes
        #[arg(short = 'n', long)]
        notes: Option<String>,
    },

    /// Mark a reminder as completed
    Complete {
        /// Reminder identifier
        id: String,
    },

    /// Update fields of a reminder
    Update {
        /// Reminder identifier
        id: String,

        /// New title
        #[arg(short = 't', long)]
        title: Option<String>,

        /// New due date (YYYY-MM-DD[THH:MM:SS])
        #[arg(short = 'd', long)]
        due: Option<String>,

        /// Set or clear the completed flag
        #[arg(long)]
        completed: Option<bool>,

        /// New priority: 0 = none, 1 (highest) through 9 (lowest)
        #[arg(short = 'p', long, value_parser = clap::value_parser!(u8).range(0..=9))]
        priority: Option<u8>,

        /// New notes
        #[arg(short = 'n', long)]
        notes: Option<String>,
    },

    /// Delete a reminder
    Delete {
        /// Reminder identifier
        id: String,
    },
}

/// Alias subcommands
#[derive(Subcommand, Debug)]
pub enum AliasAction {
    /// Create or overwrite an alias
    Set {
        /// Alias name
        name: String,

        /// Identifier the alias points at
        id: String,
    },

    /// Remove an alias
    Remove {
        /// Alias name
        name: String,
    },

    /// List all aliases
    List,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
