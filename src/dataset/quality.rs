//! Dataset quality scanning.
//!
//! The timeline builder refuses schedules with reversed or overlapping
//! records. The scanner walks a whole [`Dataset`] up front and enumerates
//! every such problem so the data can be fixed in one pass.

use crate::dataset::loader::Dataset;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A single problem found in one person's schedule.
///
/// Positions are indices into the person's records after sorting by start
/// time (end time breaks ties), matching what the timeline builder sees.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    /// A record whose end precedes its start.
    ReversedInterval {
        person_id: String,
        position: usize,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    },
    /// A record that begins before its predecessor has ended.
    OverlappingRecords {
        person_id: String,
        first_position: usize,
        second_position: usize,
        overlap_minutes: i64,
    },
}

impl DataIssue {
    /// The person whose schedule the issue belongs to.
    pub fn person_id(&self) -> &str {
        match self {
            DataIssue::ReversedInterval { person_id, .. } => person_id,
            DataIssue::OverlappingRecords { person_id, .. } => person_id,
        }
    }
}

impl std::fmt::Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataIssue::ReversedInterval {
                person_id,
                position,
                start_time,
                end_time,
            } => write!(
                f,
                "{person_id}: record #{position} is reversed (starts {}, ends {})",
                start_time.format("%Y-%m-%d %H:%M"),
                end_time.format("%Y-%m-%d %H:%M"),
            ),
            DataIssue::OverlappingRecords {
                person_id,
                first_position,
                second_position,
                overlap_minutes,
            } => write!(
                f,
                "{person_id}: records #{first_position} and #{second_position} overlap by {overlap_minutes} minutes"
            ),
        }
    }
}

/// Outcome of scanning a whole dataset.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub people_scanned: usize,
    pub records_scanned: usize,
    pub issues: Vec<DataIssue>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Human-readable report, one line per issue.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Scanned {} people, {} records: ",
            self.people_scanned, self.records_scanned
        );
        if self.is_clean() {
            out.push_str("no issues found");
        } else {
            out.push_str(&format!("{} issue(s)", self.issues.len()));
            for issue in &self.issues {
                out.push_str(&format!("\n  - {issue}"));
            }
        }
        out
    }
}

/// Scan every schedule in the dataset for reversed and overlapping records.
pub fn scan_dataset(dataset: &Dataset) -> QualityReport {
    let mut issues = Vec::new();
    let mut records_scanned = 0;

    for person_id in dataset.people() {
        let Some(records) = dataset.schedule(person_id) else {
            continue;
        };
        records_scanned += records.len();

        let mut sorted = records.to_vec();
        sorted.sort_by_key(|r| (r.start_time, r.end_time));

        for (position, record) in sorted.iter().enumerate() {
            if record.end_time < record.start_time {
                issues.push(DataIssue::ReversedInterval {
                    person_id: person_id.clone(),
                    position,
                    start_time: record.start_time,
                    end_time: record.end_time,
                });
            }
            if position > 0 {
                let previous = &sorted[position - 1];
                if record.start_time < previous.end_time {
                    issues.push(DataIssue::OverlappingRecords {
                        person_id: person_id.clone(),
                        first_position: position - 1,
                        second_position: position,
                        overlap_minutes: (previous.end_time - record.start_time).num_minutes(),
                    });
                }
            }
        }
    }

    QualityReport {
        people_scanned: dataset.person_count(),
        records_scanned,
        issues,
    }
}
