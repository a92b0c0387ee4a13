//! Chart output: SVG drawing and the HTML pages around it.

pub mod page;
pub mod svg;

pub use page::{chart_page, viewer_page};
pub use svg::{TimelineRenderer, TimelineTheme, DEFAULT_TICK_INTERVAL_HOURS};
