//! ISO-8601 date parsing glue
//!
//! Commands validate every user-supplied date here before anything touches
//! the backend, so malformed input fails fast with a validation error and no
//! state-mutating call is ever attempted.

use crate::error::{AgendaError, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Accepted input shapes, tried in order.
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO-8601 date or date-time string.
///
/// A bare date is read as midnight local time, which is how all-day entries
/// are expressed.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, DATETIME_FORMAT) {
        return Ok(datetime);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(datetime);
        }
    }
    Err(AgendaError::validation(format!(
        "Invalid date: {input} (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)"
    )))
}

/// Validate an optional date flag, passing `None` through.
pub fn parse_optional(input: Option<&str>) -> Result<Option<NaiveDateTime>> {
    input.map(parse_datetime).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_datetime() {
        let parsed = parse_datetime("2026-03-14T09:30:00").unwrap();
        assert_eq!(parsed.to_string(), "2026-03-14 09:30:00");
    }

    #[test]
    fn test_parses_bare_date_as_midnight() {
        let parsed = parse_datetime("2026-03-14").unwrap();
        assert_eq!(parsed.to_string(), "2026-03-14 00:00:00");
    }

    #[test]
    fn test_rejects_malformed_input() {
        for input in ["tomorrow", "2026-13-01", "2026-03-14T25:00:00", ""] {
            let err = parse_datetime(input).unwrap_err();
            assert!(err.to_string().contains("Invalid date"), "input: {input}");
        }
    }

    #[test]
    fn test_optional_passes_none_through() {
        assert!(parse_optional(None).unwrap().is_none());
        assert!(parse_optional(Some("2026-03-14")).unwrap().is_some());
        assert!(parse_optional(Some("bogus")).is_err());
    }
}
