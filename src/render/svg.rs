//! SVG timeline renderer.
//!
//! Draws one person's day as a single horizontal lane: busy intervals in
//! blue, gaps in red, activity labels rotated above the bar, and an hour
//! axis with dashed grid lines underneath. Output is a standalone `<svg>`
//! element suitable for embedding or serving as `image/svg+xml`.

use crate::timeline::{PersonTimeline, Segment, SegmentKind};
use chrono::NaiveDateTime;

/// Default spacing of axis ticks, in hours.
pub const DEFAULT_TICK_INTERVAL_HOURS: u32 = 2;

/// SVG timeline renderer configuration.
#[derive(Clone, Debug)]
pub struct TimelineRenderer {
    /// Width of the plotting area (excluding padding) in pixels
    pub chart_width: u32,
    /// Thickness of the activity bar in pixels
    pub bar_height: u32,
    /// Vertical space reserved for rotated activity labels
    pub label_area: u32,
    /// Vertical space under the bar for the axis and tick labels
    pub axis_area: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Height of the title line
    pub title_height: u32,
    /// Hours between axis ticks
    pub tick_interval_hours: u32,
    /// Theme (light or dark)
    pub theme: TimelineTheme,
    /// Draw activity labels above busy segments
    pub show_labels: bool,
}

/// Color theme for the timeline chart.
#[derive(Clone, Debug)]
pub struct TimelineTheme {
    pub busy_color: String,
    pub gap_color: String,
    pub background_color: String,
    pub grid_color: String,
    pub axis_color: String,
    pub text_color: String,
}

impl Default for TimelineTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl TimelineTheme {
    pub fn light() -> Self {
        Self {
            busy_color: "#3498db".into(),
            gap_color: "#e74c3c".into(),
            background_color: "#ffffff".into(),
            grid_color: "#b0b8bf".into(),
            axis_color: "#2c3e50".into(),
            text_color: "#2c3e50".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            busy_color: "#3498db".into(),
            gap_color: "#e74c3c".into(),
            background_color: "#1a1a2e".into(),
            grid_color: "#2d2d44".into(),
            axis_color: "#95a5a6".into(),
            text_color: "#eaeaea".into(),
        }
    }
}

impl Default for TimelineRenderer {
    fn default() -> Self {
        Self {
            chart_width: 1100,
            bar_height: 12,
            label_area: 150,
            axis_area: 46,
            padding: 24,
            title_height: 28,
            tick_interval_hours: DEFAULT_TICK_INTERVAL_HOURS,
            theme: TimelineTheme::default(),
            show_labels: true,
        }
    }
}

impl TimelineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use dark theme
    pub fn dark_theme(mut self) -> Self {
        self.theme = TimelineTheme::dark();
        self
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure tick spacing in hours
    pub fn tick_interval_hours(mut self, hours: u32) -> Self {
        self.tick_interval_hours = hours;
        self
    }

    /// Skip activity labels
    pub fn hide_labels(mut self) -> Self {
        self.show_labels = false;
        self
    }

    /// Render a built timeline to a standalone SVG document.
    pub fn render_svg(&self, timeline: &PersonTimeline) -> String {
        let window = timeline.window;
        let window_minutes = window.duration().num_minutes().max(1) as f64;
        let px_per_minute = f64::from(self.chart_width) / window_minutes;

        let chart_left = f64::from(self.padding);
        let grid_top = f64::from(self.padding + self.title_height);
        let lane_y = grid_top + f64::from(self.label_area);
        let axis_y = lane_y + f64::from(self.bar_height) + 10.0;
        let total_width = self.chart_width + 2 * self.padding;
        let total_height =
            self.padding + self.title_height + self.label_area + self.bar_height + self.axis_area
                + self.padding;

        let time_to_x = |time: NaiveDateTime| -> f64 {
            let minutes = (time - window.start).num_minutes().clamp(0, window_minutes as i64);
            chart_left + minutes as f64 * px_per_minute
        };

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{total_width}\" height=\"{total_height}\" \
             viewBox=\"0 0 {total_width} {total_height}\" font-family=\"system-ui, sans-serif\">\n"
        ));
        svg.push_str(&format!(
            "  <rect width=\"{total_width}\" height=\"{total_height}\" fill=\"{}\"/>\n",
            self.theme.background_color
        ));
        svg.push_str(&format!(
            "  <text x=\"{chart_left:.1}\" y=\"{:.1}\" font-size=\"16\" fill=\"{}\">{} on {}</text>\n",
            f64::from(self.padding) + 16.0,
            self.theme.text_color,
            html_escape(&timeline.person_id),
            window.start.format("%Y-%m-%d"),
        ));

        self.render_grid(&mut svg, timeline, grid_top, axis_y, &time_to_x);

        for segment in &timeline.segments {
            self.render_segment(&mut svg, segment, lane_y, &time_to_x);
        }

        svg.push_str(&format!(
            "  <line x1=\"{chart_left:.1}\" y1=\"{axis_y:.1}\" x2=\"{:.1}\" y2=\"{axis_y:.1}\" \
             stroke=\"{}\" stroke-width=\"1\"/>\n",
            chart_left + f64::from(self.chart_width),
            self.theme.axis_color,
        ));
        svg.push_str("</svg>\n");
        svg
    }

    fn render_grid(
        &self,
        svg: &mut String,
        timeline: &PersonTimeline,
        grid_top: f64,
        axis_y: f64,
        time_to_x: &dyn Fn(NaiveDateTime) -> f64,
    ) {
        for tick in timeline.window.hour_ticks(self.tick_interval_hours) {
            let x = time_to_x(tick);
            svg.push_str(&format!(
                "  <line x1=\"{x:.1}\" y1=\"{grid_top:.1}\" x2=\"{x:.1}\" y2=\"{axis_y:.1}\" \
                 stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"4,3\"/>\n",
                self.theme.grid_color,
            ));
            // Tick labels read bottom to top, ending just under the axis.
            let tick_y = axis_y + 8.0;
            svg.push_str(&format!(
                "  <text x=\"{x:.1}\" y=\"{tick_y:.1}\" font-size=\"11\" text-anchor=\"end\" \
                 fill=\"{}\" transform=\"rotate(-90 {x:.1} {tick_y:.1})\">{}</text>\n",
                self.theme.text_color,
                tick.format("%H:%M"),
            ));
        }
    }

    fn render_segment(
        &self,
        svg: &mut String,
        segment: &Segment,
        lane_y: f64,
        time_to_x: &dyn Fn(NaiveDateTime) -> f64,
    ) {
        let x = time_to_x(segment.start_time);
        let width = time_to_x(segment.end_time) - x;
        if width <= 0.0 {
            return;
        }

        let (color, tooltip_name) = match segment.kind {
            SegmentKind::Busy => (
                &self.theme.busy_color,
                segment.label.as_deref().unwrap_or("Activity"),
            ),
            SegmentKind::Gap => (&self.theme.gap_color, "Gap"),
        };
        svg.push_str(&format!(
            "  <rect x=\"{x:.1}\" y=\"{lane_y:.1}\" width=\"{width:.1}\" height=\"{}\" fill=\"{color}\">\
             <title>{}: {} to {} ({} min)</title></rect>\n",
            self.bar_height,
            html_escape(tooltip_name),
            segment.start_time.format("%H:%M"),
            segment.end_time.format("%H:%M"),
            segment.minutes(),
        ));

        if self.show_labels && segment.kind == SegmentKind::Busy {
            if let Some(label) = segment.label.as_deref() {
                // Rotated 90 degrees counter-clockwise, rising from the
                // segment's left edge.
                let label_x = x + 4.0;
                let label_y = lane_y - 6.0;
                svg.push_str(&format!(
                    "  <text x=\"{label_x:.1}\" y=\"{label_y:.1}\" font-size=\"12\" text-anchor=\"start\" \
                     fill=\"{}\" transform=\"rotate(-90 {label_x:.1} {label_y:.1})\">{}</text>\n",
                    self.theme.text_color,
                    html_escape(label),
                ));
            }
        }
    }
}

/// HTML-escape a string for SVG/HTML text nodes and attributes.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
