//! Activity data: records, CSV loading, and quality scanning.

pub mod loader;
pub mod quality;
pub mod record;

pub use loader::{Dataset, DatasetError};
pub use quality::{scan_dataset, DataIssue, QualityReport};
pub use record::{derive_person_id, parse_timestamp, ActivityRecord};
