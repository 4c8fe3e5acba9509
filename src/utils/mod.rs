//! Utility modules for common functionality
//!
//! Provides the date-parsing glue shared by command validation and the
//! store's listing filters.

pub mod dates;
