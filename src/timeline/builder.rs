//! Per-person timeline construction.
//!
//! A timeline is a single linear scan over one person's records, sorted by
//! start time: every record becomes a busy segment, and a gap segment is
//! emitted wherever a record begins strictly after its predecessor ended.
//! Reversed or overlapping records are rejected up front; the quality
//! scanner in [`crate::dataset::quality`] enumerates them all for repair.

use crate::dataset::ActivityRecord;
use crate::timeline::window::DisplayWindow;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// What a segment represents on the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// A recorded activity.
    Busy,
    /// Unaccounted time between two recorded activities.
    Gap,
}

/// One drawable interval on a person's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Display label; set for busy segments with a non-empty activity name.
    pub label: Option<String>,
}

impl Segment {
    /// Segment length in minutes.
    pub fn minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// A fully laid out day for one person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonTimeline {
    pub person_id: String,
    pub window: DisplayWindow,
    /// Segments in chronological order, busy and gap interleaved.
    pub segments: Vec<Segment>,
}

impl PersonTimeline {
    pub fn busy_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.kind == SegmentKind::Busy)
    }

    pub fn gap_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.kind == SegmentKind::Gap)
    }
}

/// Strip a parenthesized suffix from an activity name to form the label.
///
/// `"Work (office)"` becomes `"Work"`; names without a parenthesis pass
/// through unchanged. Returns `None` when nothing is left after trimming.
pub fn derive_label(activity_name: &str) -> Option<String> {
    let label = activity_name
        .split('(')
        .next()
        .unwrap_or_default()
        .trim();
    if label.is_empty() {
        return None;
    }
    Some(label.to_string())
}

/// Build the timeline for one person's records.
///
/// Records are sorted by start time, end time breaking ties, before the
/// scan; input order is not trusted. Fails on an empty schedule and on the
/// first reversed or overlapping record found.
pub fn build_timeline(
    person_id: &str,
    records: &[ActivityRecord],
    day_start_hour: u32,
) -> Result<PersonTimeline, TimelineError> {
    if records.is_empty() {
        return Err(TimelineError::EmptySchedule {
            person_id: person_id.to_string(),
        });
    }

    let mut sorted = records.to_vec();
    // End time breaks ties; equal-start records then validate the same in
    // any input order.
    sorted.sort_by_key(|r| (r.start_time, r.end_time));

    for (position, record) in sorted.iter().enumerate() {
        if record.end_time < record.start_time {
            return Err(TimelineError::ReversedInterval {
                position,
                start_time: record.start_time,
                end_time: record.end_time,
            });
        }
        if position > 0 && record.start_time < sorted[position - 1].end_time {
            return Err(TimelineError::OverlappingRecords {
                first_position: position - 1,
                second_position: position,
            });
        }
    }

    let window = DisplayWindow::anchored(sorted[0].start_time, day_start_hour);

    let mut segments = Vec::with_capacity(sorted.len() * 2 - 1);
    let mut previous_end: Option<NaiveDateTime> = None;
    for record in &sorted {
        if let Some(previous_end) = previous_end {
            if record.start_time > previous_end {
                segments.push(Segment {
                    kind: SegmentKind::Gap,
                    start_time: previous_end,
                    end_time: record.start_time,
                    label: None,
                });
            }
        }
        segments.push(Segment {
            kind: SegmentKind::Busy,
            start_time: record.start_time,
            end_time: record.end_time,
            label: derive_label(&record.activity_name),
        });
        previous_end = Some(record.end_time);
    }

    Ok(PersonTimeline {
        person_id: person_id.to_string(),
        window,
        segments,
    })
}

/// Errors produced while building a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    EmptySchedule { person_id: String },
    ReversedInterval {
        position: usize,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    },
    OverlappingRecords {
        first_position: usize,
        second_position: usize,
    },
}

impl std::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineError::EmptySchedule { person_id } => {
                write!(f, "no activity records for `{person_id}`")
            }
            TimelineError::ReversedInterval {
                position,
                start_time,
                end_time,
            } => write!(
                f,
                "record #{position} is reversed (starts {}, ends {})",
                start_time.format("%Y-%m-%d %H:%M"),
                end_time.format("%Y-%m-%d %H:%M"),
            ),
            TimelineError::OverlappingRecords {
                first_position,
                second_position,
            } => write!(
                f,
                "records #{first_position} and #{second_position} overlap"
            ),
        }
    }
}

impl std::error::Error for TimelineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::window::DEFAULT_DAY_START_HOUR;
    use chrono::{Duration, NaiveDate};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 22)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn record(start: NaiveDateTime, end: NaiveDateTime, name: &str) -> ActivityRecord {
        ActivityRecord::new("p1", start, end, name)
    }

    #[test]
    fn test_breakfast_then_work_day() {
        let records = vec![
            record(at(8, 0), at(8, 30), "Breakfast"),
            record(at(9, 0), at(17, 0), "Work (office)"),
        ];
        let timeline = build_timeline("p1", &records, DEFAULT_DAY_START_HOUR).unwrap();

        assert_eq!(timeline.window.start, at(4, 0));
        assert_eq!(
            timeline.window.end,
            at(4, 0) + Duration::hours(24) - Duration::minutes(1)
        );
        assert_eq!(
            timeline.segments,
            vec![
                Segment {
                    kind: SegmentKind::Busy,
                    start_time: at(8, 0),
                    end_time: at(8, 30),
                    label: Some("Breakfast".to_string()),
                },
                Segment {
                    kind: SegmentKind::Gap,
                    start_time: at(8, 30),
                    end_time: at(9, 0),
                    label: None,
                },
                Segment {
                    kind: SegmentKind::Busy,
                    start_time: at(9, 0),
                    end_time: at(17, 0),
                    label: Some("Work".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_single_record_has_no_gaps() {
        let records = vec![record(at(8, 0), at(17, 0), "Work")];
        let timeline = build_timeline("p1", &records, DEFAULT_DAY_START_HOUR).unwrap();

        assert_eq!(timeline.segments.len(), 1);
        assert_eq!(timeline.gap_segments().count(), 0);
        assert_eq!(timeline.busy_segments().count(), 1);
    }

    #[test]
    fn test_touching_records_emit_no_gap() {
        let records = vec![
            record(at(8, 0), at(9, 0), "A"),
            record(at(9, 0), at(10, 0), "B"),
        ];
        let timeline = build_timeline("p1", &records, DEFAULT_DAY_START_HOUR).unwrap();

        assert_eq!(timeline.gap_segments().count(), 0);
        assert_eq!(timeline.segments.len(), 2);
    }

    #[test]
    fn test_gap_counts_are_bounded_by_record_count() {
        let records = vec![
            record(at(6, 0), at(7, 0), "A"),
            record(at(8, 0), at(9, 0), "B"),
            record(at(10, 0), at(11, 0), "C"),
            record(at(11, 0), at(12, 0), "D"),
        ];
        let timeline = build_timeline("p1", &records, DEFAULT_DAY_START_HOUR).unwrap();

        assert_eq!(timeline.busy_segments().count(), records.len());
        assert!(timeline.gap_segments().count() <= records.len() - 1);
        assert_eq!(timeline.gap_segments().count(), 2);
    }

    #[test]
    fn test_records_are_sorted_before_the_scan() {
        let records = vec![
            record(at(13, 0), at(17, 0), "Afternoon"),
            record(at(8, 0), at(12, 0), "Morning"),
        ];
        let timeline = build_timeline("p1", &records, DEFAULT_DAY_START_HOUR).unwrap();

        assert_eq!(timeline.segments[0].start_time, at(8, 0));
        assert_eq!(timeline.gap_segments().count(), 1);
        let gap = timeline.gap_segments().next().unwrap();
        assert_eq!((gap.start_time, gap.end_time), (at(12, 0), at(13, 0)));
    }

    #[test]
    fn test_empty_schedule_fails() {
        match build_timeline("p1", &[], DEFAULT_DAY_START_HOUR) {
            Err(TimelineError::EmptySchedule { person_id }) => assert_eq!(person_id, "p1"),
            other => panic!("expected empty schedule error, got {other:?}"),
        }
    }

    #[test]
    fn test_reversed_record_fails() {
        let records = vec![record(at(9, 0), at(8, 0), "Backwards")];
        assert!(matches!(
            build_timeline("p1", &records, DEFAULT_DAY_START_HOUR),
            Err(TimelineError::ReversedInterval { position: 0, .. })
        ));
    }

    #[test]
    fn test_overlapping_records_fail() {
        let records = vec![
            record(at(8, 0), at(10, 0), "First"),
            record(at(9, 30), at(11, 0), "Second"),
        ];
        assert!(matches!(
            build_timeline("p1", &records, DEFAULT_DAY_START_HOUR),
            Err(TimelineError::OverlappingRecords {
                first_position: 0,
                second_position: 1,
            })
        ));
    }

    #[test]
    fn test_zero_duration_record_is_legal() {
        let records = vec![
            record(at(8, 0), at(8, 0), "Ping"),
            record(at(8, 0), at(9, 0), "Work"),
        ];
        let timeline = build_timeline("p1", &records, DEFAULT_DAY_START_HOUR).unwrap();

        assert_eq!(timeline.busy_segments().count(), 2);
        assert_eq!(timeline.segments[0].minutes(), 0);
        assert_eq!(timeline.gap_segments().count(), 0);
    }

    #[test]
    fn test_zero_duration_record_is_accepted_in_any_order() {
        // A zero-duration record sharing its start with a longer one must
        // not read as an overlap, whichever record the input lists first.
        let ping_first = vec![
            record(at(8, 0), at(8, 0), "Ping"),
            record(at(8, 0), at(9, 0), "Work"),
        ];
        let work_first = vec![
            record(at(8, 0), at(9, 0), "Work"),
            record(at(8, 0), at(8, 0), "Ping"),
        ];

        let a = build_timeline("p1", &ping_first, DEFAULT_DAY_START_HOUR).unwrap();
        let b = build_timeline("p1", &work_first, DEFAULT_DAY_START_HOUR).unwrap();

        assert_eq!(a.segments, b.segments);
        assert_eq!(a.busy_segments().count(), 2);
        assert_eq!(a.segments[0].label, Some("Ping".to_string()));
    }

    #[test]
    fn test_label_strips_parenthesized_suffix() {
        assert_eq!(derive_label("Sleep (core)"), Some("Sleep".to_string()));
        assert_eq!(derive_label("Work"), Some("Work".to_string()));
        assert_eq!(derive_label("  Walk  (dog) "), Some("Walk".to_string()));
        assert_eq!(derive_label("(anonymous)"), None);
        assert_eq!(derive_label(""), None);
    }

    #[test]
    fn test_segments_are_not_clipped_to_the_window() {
        // The window only sets the visible axis range; a late-night record
        // keeps its true extent in the model.
        let records = vec![
            record(at(8, 0), at(9, 0), "Morning"),
            record(
                at(23, 0) + Duration::days(1),
                at(23, 30) + Duration::days(1),
                "Far out",
            ),
        ];
        let timeline = build_timeline("p1", &records, DEFAULT_DAY_START_HOUR).unwrap();
        let last = timeline.segments.last().unwrap();

        assert!(last.end_time > timeline.window.end);
    }
}
