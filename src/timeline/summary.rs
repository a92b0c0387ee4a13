//! Day-level statistics over a built timeline.

use crate::timeline::builder::{PersonTimeline, SegmentKind};
use serde::{Deserialize, Serialize};

/// Aggregate numbers for one person's day.
///
/// Only segments intersecting the display window contribute, and minutes
/// are clipped to it, so off-window extents do not inflate the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub busy_count: usize,
    pub gap_count: usize,
    pub busy_minutes: i64,
    pub gap_minutes: i64,
    pub longest_gap_minutes: i64,
}

/// Compute window-clipped totals for a timeline.
pub fn summarize(timeline: &PersonTimeline) -> TimelineSummary {
    let mut summary = TimelineSummary {
        busy_count: 0,
        gap_count: 0,
        busy_minutes: 0,
        gap_minutes: 0,
        longest_gap_minutes: 0,
    };

    for segment in &timeline.segments {
        let Some((start, end)) = timeline.window.clip(segment.start_time, segment.end_time)
        else {
            continue;
        };
        let minutes = (end - start).num_minutes();
        match segment.kind {
            SegmentKind::Busy => {
                summary.busy_count += 1;
                summary.busy_minutes += minutes;
            }
            SegmentKind::Gap => {
                summary.gap_count += 1;
                summary.gap_minutes += minutes;
                summary.longest_gap_minutes = summary.longest_gap_minutes.max(minutes);
            }
        }
    }

    summary
}
