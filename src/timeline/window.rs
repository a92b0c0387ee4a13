//! The fixed 24-hour display window a timeline is laid out in.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Hour of day the window opens at. Activity data routinely crosses
/// midnight, so the axis starts in the small hours rather than at 00:00.
pub const DEFAULT_DAY_START_HOUR: u32 = 4;

/// The clipping range for one person's timeline axis.
///
/// The window is anchored on the day of the earliest activity and always
/// spans 23 hours 59 minutes, so `end` lands one minute before the next
/// day's opening hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DisplayWindow {
    /// Anchor a window at `day_start_hour` on the day of `earliest_start`.
    ///
    /// The anchor floors to midnight first, so an activity beginning at
    /// 00:30 still opens the window at the same day's `day_start_hour`
    /// (and thus falls before the visible range).
    pub fn anchored(earliest_start: NaiveDateTime, day_start_hour: u32) -> Self {
        let midnight = earliest_start.date().and_time(NaiveTime::MIN);
        let start = midnight + Duration::hours(i64::from(day_start_hour.min(23)));
        let end = start + Duration::hours(24) - Duration::minutes(1);
        Self { start, end }
    }

    /// Whether `time` falls inside the window, boundaries included.
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        time >= self.start && time <= self.end
    }

    /// Clamp an interval to the window, or `None` when it lies entirely
    /// outside.
    pub fn clip(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let clipped_start = start.max(self.start);
        let clipped_end = end.min(self.end);
        if clipped_start >= clipped_end {
            return None;
        }
        Some((clipped_start, clipped_end))
    }

    /// Window span; always 23 hours 59 minutes.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole-hour axis ticks from the window start, stepping by
    /// `interval_hours`, up to and including the window end.
    pub fn hour_ticks(&self, interval_hours: u32) -> Vec<NaiveDateTime> {
        let step = Duration::hours(i64::from(interval_hours.max(1)));
        let mut ticks = Vec::new();
        let mut tick = self.start;
        while tick <= self.end {
            ticks.push(tick);
            tick += step;
        }
        ticks
    }
}
