//! Activity record types for the timeline viewer.
//!
//! A record is one interval of recorded activity for one person. Timestamps
//! are naive wall-clock values, shown exactly as written in the source.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One activity interval belonging to one person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Identifier grouping all records of one individual
    pub person_id: String,
    /// When the activity started
    pub start_time: NaiveDateTime,
    /// When the activity ended
    pub end_time: NaiveDateTime,
    /// Raw activity name as recorded (may carry a parenthesized suffix)
    pub activity_name: String,
}

impl ActivityRecord {
    pub fn new(
        person_id: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        activity_name: impl Into<String>,
    ) -> Self {
        Self {
            person_id: person_id.into(),
            start_time,
            end_time,
            activity_name: activity_name.into(),
        }
    }
}

/// Timestamp shapes accepted by the loader, tried in order.
///
/// RFC3339 values keep their written clock component; no timezone math is
/// performed anywhere in the crate.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a timestamp cell, accepting RFC3339 and the common
/// date-time shapes found in activity exports.
///
/// Returns `None` when no format matches.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    // Date-only cells parse to midnight, matching the usual tabular readers.
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

/// Derive the person key for a row.
///
/// An explicit non-empty `person_id` cell wins; otherwise the key is
/// `id + "-" + member` when both cells are non-empty. Returns `None` when
/// no key can be derived.
pub fn derive_person_id(
    person_id: Option<&str>,
    id: Option<&str>,
    member: Option<&str>,
) -> Option<String> {
    if let Some(explicit) = person_id {
        let explicit = explicit.trim();
        if !explicit.is_empty() {
            return Some(explicit.to_string());
        }
    }

    match (id, member) {
        (Some(id), Some(member)) => {
            let id = id.trim();
            let member = member.trim();
            if id.is_empty() || member.is_empty() {
                None
            } else {
                Some(format!("{id}-{member}"))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_common_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 22)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();

        assert_eq!(parse_timestamp("2024-01-22 08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-22T08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-22 08:30"), Some(expected));
        assert_eq!(parse_timestamp("01/22/2024 08:30:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-01-22 08:30:00 "), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_rfc3339_keeps_written_clock() {
        let parsed = parse_timestamp("2024-01-22T08:30:00-05:00").unwrap();
        assert_eq!(parsed.time(), chrono::NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_fractional_seconds() {
        let parsed = parse_timestamp("2024-01-22 08:30:00.250").unwrap();
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight() {
        let parsed = parse_timestamp("2024-01-22").unwrap();
        assert_eq!(parsed.time(), chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("not a time"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_derive_person_id_prefers_explicit() {
        assert_eq!(
            derive_person_id(Some("p-7"), Some("1"), Some("alice")),
            Some("p-7".to_string())
        );
    }

    #[test]
    fn test_derive_person_id_joins_id_and_member() {
        assert_eq!(
            derive_person_id(None, Some("1"), Some("alice")),
            Some("1-alice".to_string())
        );
        assert_eq!(
            derive_person_id(Some("  "), Some("2"), Some("bob")),
            Some("2-bob".to_string())
        );
    }

    #[test]
    fn test_derive_person_id_missing_pieces() {
        assert_eq!(derive_person_id(None, None, Some("alice")), None);
        assert_eq!(derive_person_id(None, Some(""), Some("alice")), None);
        assert_eq!(derive_person_id(None, None, None), None);
    }
}
