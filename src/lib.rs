//! Dayline Viewer - per-person daily activity timelines from CSV data.
//!
//! This library loads tables of activity intervals, lays each person's day
//! out as busy and gap segments inside a fixed 24-hour window, and renders
//! the result as an SVG chart.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Dayline Viewer                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │   Dataset   │──▶│  Timeline   │──▶│  Renderer   │       │
//! │  │ (CSV load)  │   │ (gap scan)  │   │   (SVG)     │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │         │                                    │              │
//! │         ▼                                    ▼              │
//! │  ┌─────────────┐                     ┌─────────────┐       │
//! │  │   Quality   │                     │    HTML     │       │
//! │  │    Scan     │                     │   Viewer    │       │
//! │  └─────────────┘                     └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dayline_viewer::dataset::Dataset;
//! use dayline_viewer::timeline::{build_timeline, DEFAULT_DAY_START_HOUR};
//!
//! let dataset = Dataset::bundled().expect("bundled sample is valid");
//! let person = &dataset.people()[0];
//! let records = dataset.schedule(person).expect("listed people have records");
//! let timeline = build_timeline(person, records, DEFAULT_DAY_START_HOUR)
//!     .expect("sample data is clean");
//! println!("{} segments", timeline.segments.len());
//! ```

pub mod config;
pub mod dataset;
pub mod render;
pub mod timeline;

#[cfg(feature = "server")]
pub mod server;

// Re-export key types at crate root for convenience
pub use config::{ChartConfig, Config};
pub use dataset::{scan_dataset, ActivityRecord, Dataset, DatasetError, QualityReport};
pub use render::{TimelineRenderer, TimelineTheme};
pub use timeline::{
    build_timeline, summarize, DisplayWindow, PersonTimeline, Segment, SegmentKind,
    TimelineError, TimelineSummary,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Input format description that can be displayed to users.
pub const CSV_FORMAT_HELP: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║               DAYLINE VIEWER - EXPECTED CSV FORMAT               ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  One row per recorded activity, with a header row.               ║
║                                                                  ║
║  REQUIRED COLUMNS:                                               ║
║    • startTime      when the activity began                      ║
║    • endTime        when the activity ended                      ║
║    • activityName   free text; a parenthesized suffix is         ║
║                     stripped for the chart label                 ║
║                                                                  ║
║  PERSON IDENTITY (one of):                                       ║
║    • person_id      used as-is when present and non-empty        ║
║    • id + member    joined as "id-member" otherwise              ║
║                                                                  ║
║  Timestamps accept RFC 3339 and common date-time layouts such    ║
║  as "2024-01-22 08:30:00" or "01/22/2024 08:30". A bare date     ║
║  is read as midnight.                                            ║
║                                                                  ║
║  Check a file before serving it with:                            ║
║    dayline check --data activities.csv                           ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_format_help_contents() {
        assert!(CSV_FORMAT_HELP.contains("CSV FORMAT"));
        assert!(CSV_FORMAT_HELP.contains("startTime"));
        assert!(CSV_FORMAT_HELP.contains("id-member"));
    }
}
