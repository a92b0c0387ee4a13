//! Timeline layout: display windows, segment construction, summaries.

pub mod builder;
pub mod summary;
pub mod window;

pub use builder::{build_timeline, derive_label, PersonTimeline, Segment, SegmentKind, TimelineError};
pub use summary::{summarize, TimelineSummary};
pub use window::{DisplayWindow, DEFAULT_DAY_START_HOUR};
