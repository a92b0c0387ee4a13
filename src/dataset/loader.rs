//! CSV loading and per-person grouping.
//!
//! The loader turns a CSV table into a [`Dataset`]: records grouped by
//! person with the person list kept in first-seen order. Loading is always
//! explicit; nothing is memoized behind the caller's back.

use crate::dataset::record::{derive_person_id, parse_timestamp, ActivityRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

/// Required time/name columns.
pub const COLUMN_START: &str = "startTime";
pub const COLUMN_END: &str = "endTime";
pub const COLUMN_ACTIVITY: &str = "activityName";

/// Person identity columns: `person_id` wins, else `id` + `member`.
pub const COLUMN_PERSON: &str = "person_id";
pub const COLUMN_ID: &str = "id";
pub const COLUMN_MEMBER: &str = "member";

/// Sample dataset compiled into the binary, used when no CSV is supplied.
const SAMPLE_CSV: &str = include_str!("../../data/sample_activities.csv");

/// One CSV row as read from the wire. Column presence is validated against
/// the header before any row is deserialized.
#[derive(Debug, Deserialize)]
struct RawActivityRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    member: Option<String>,
    #[serde(default)]
    person_id: Option<String>,
    #[serde(default, rename = "startTime")]
    start_time: Option<String>,
    #[serde(default, rename = "endTime")]
    end_time: Option<String>,
    #[serde(default, rename = "activityName")]
    activity_name: Option<String>,
}

/// A parsed activity table grouped by person.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Identity of this load; regenerated whenever the table is replaced
    pub dataset_id: Uuid,
    people: Vec<String>,
    schedules: HashMap<String, Vec<ActivityRecord>>,
}

impl Dataset {
    /// Load from any reader producing CSV text with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| DatasetError::Csv(e.to_string()))?
            .clone();

        for required in [COLUMN_START, COLUMN_END, COLUMN_ACTIVITY] {
            if !headers.iter().any(|h| h == required) {
                return Err(DatasetError::MissingColumn(required.to_string()));
            }
        }
        let has_person = headers.iter().any(|h| h == COLUMN_PERSON);
        let has_id = headers.iter().any(|h| h == COLUMN_ID);
        let has_member = headers.iter().any(|h| h == COLUMN_MEMBER);
        if !has_person && !(has_id && has_member) {
            return Err(DatasetError::MissingPersonColumns);
        }

        let mut people: Vec<String> = Vec::new();
        let mut schedules: HashMap<String, Vec<ActivityRecord>> = HashMap::new();

        for result in csv_reader.records() {
            let record = result.map_err(|e| DatasetError::Csv(e.to_string()))?;
            // Line on which the record starts; quoted fields may span several.
            let line = record.position().map_or(0, |p| p.line());
            let row: RawActivityRow = record
                .deserialize(Some(&headers))
                .map_err(|e| DatasetError::Csv(e.to_string()))?;

            let person_id = derive_person_id(
                row.person_id.as_deref(),
                row.id.as_deref(),
                row.member.as_deref(),
            )
            .ok_or(DatasetError::MissingPersonId { line })?;

            let start_time = parse_time_cell(row.start_time.as_deref(), COLUMN_START, line)?;
            let end_time = parse_time_cell(row.end_time.as_deref(), COLUMN_END, line)?;
            let activity_name = row.activity_name.unwrap_or_default();

            if !schedules.contains_key(&person_id) {
                people.push(person_id.clone());
            }
            schedules
                .entry(person_id.clone())
                .or_default()
                .push(ActivityRecord::new(
                    person_id,
                    start_time,
                    end_time,
                    activity_name,
                ));
        }

        if people.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self {
            dataset_id: Uuid::new_v4(),
            people,
            schedules,
        })
    }

    /// Load from a CSV string.
    pub fn from_csv_str(text: &str) -> Result<Self, DatasetError> {
        Self::from_csv_reader(text.as_bytes())
    }

    /// Load from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)
            .map_err(|e| DatasetError::Io(format!("{}: {e}", path.display())))?;
        Self::from_csv_reader(file)
    }

    /// Load the sample dataset compiled into the binary.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_csv_str(SAMPLE_CSV)
    }

    /// Person ids in first-seen order.
    pub fn people(&self) -> &[String] {
        &self.people
    }

    /// Records for one person, in input order. `None` for unknown ids.
    pub fn schedule(&self, person_id: &str) -> Option<&[ActivityRecord]> {
        self.schedules.get(person_id).map(Vec::as_slice)
    }

    /// Total number of records across all people.
    pub fn record_count(&self) -> usize {
        self.schedules.values().map(Vec::len).sum()
    }

    /// Number of distinct people.
    pub fn person_count(&self) -> usize {
        self.people.len()
    }
}

fn parse_time_cell(
    cell: Option<&str>,
    column: &str,
    line: u64,
) -> Result<chrono::NaiveDateTime, DatasetError> {
    let value = cell.unwrap_or_default();
    parse_timestamp(value).ok_or_else(|| DatasetError::Timestamp {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Errors produced while loading a dataset.
#[derive(Debug)]
pub enum DatasetError {
    Io(String),
    Csv(String),
    MissingColumn(String),
    MissingPersonColumns,
    MissingPersonId { line: u64 },
    Timestamp { line: u64, column: String, value: String },
    Empty,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "IO error: {e}"),
            DatasetError::Csv(e) => write!(f, "CSV error: {e}"),
            DatasetError::MissingColumn(name) => {
                write!(f, "required column `{name}` is missing")
            }
            DatasetError::MissingPersonColumns => write!(
                f,
                "no `{COLUMN_PERSON}` column, and no `{COLUMN_ID}`/`{COLUMN_MEMBER}` columns to derive it from"
            ),
            DatasetError::MissingPersonId { line } => {
                write!(f, "line {line}: person id cannot be derived (empty cells)")
            }
            DatasetError::Timestamp { line, column, value } => {
                write!(f, "line {line}: unparseable `{column}` value {value:?}")
            }
            DatasetError::Empty => write!(f, "the table contains no data rows"),
        }
    }
}

impl std::error::Error for DatasetError {}
