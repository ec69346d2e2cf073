//! Date parsing for date-bound checks.
//!
//! Accepted shapes, all read as UTC:
//! - `YYYY-MM-DD` (midnight)
//! - RFC 3339 (`2024-06-15T10:00:00Z`, `2024-06-15T10:00:00+02:00`)
//! - `YYYY-MM-DDTHH:MM[:SS[.fff]]` without offset

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a date value the way the generated schema's `new Date(..)` would
/// accept it. Returns `None` for anything unparseable.
pub fn parse_date_value(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::parse_date_value;

    #[test]
    fn parses_plain_dates_as_utc_midnight() {
        let parsed = parse_date_value("2024-06-15").expect("plain date should parse");
        assert_eq!(parsed.to_rfc3339(), "2024-06-15T00:00:00+00:00");
    }

    #[test]
    fn parses_iso_timestamps_with_and_without_offset() {
        let zulu = parse_date_value("2024-06-15T10:30:00.000Z").expect("zulu should parse");
        let offset = parse_date_value("2024-06-15T12:30:00+02:00").expect("offset should parse");
        assert_eq!(zulu, offset);
        assert!(parse_date_value("2024-06-15T10:30").is_some());
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert!(parse_date_value("not-a-date").is_none());
        assert!(parse_date_value("2024-02-30").is_none());
        assert!(parse_date_value("").is_none());
    }
}
