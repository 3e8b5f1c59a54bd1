/// Output image size in pixels (14x10 inches at 150 dpi)
pub const CHART_WIDTH: u32 = 2100;
pub const CHART_HEIGHT: u32 = 1500;

pub const TITLE_FONT_SIZE: u32 = 44;
/// Space above the figure title so tall glyphs are not cut at the image edge
pub const TITLE_TOP_MARGIN: i32 = 16;
pub const PANEL_TITLE_FONT_SIZE: u32 = 30;
pub const AXIS_LABEL_FONT_SIZE: u32 = 22;
pub const TICK_LABEL_FONT_SIZE: u32 = 18;

/// Histogram bins per latency panel
pub const HISTOGRAM_BINS: usize = 50;

/// Latency panels in the 2x2 distribution chart
pub const MAX_DISTRIBUTION_PANELS: usize = 4;

pub const LINE_WIDTH: u32 = 3;
pub const MARKER_SIZE: i32 = 6;

/// Share of a bar group's slot covered by bars
pub const GROUP_BAR_WIDTH: f64 = 0.8;
pub const VOLUME_BAR_WIDTH: f64 = 0.35;

/// Console rule width
pub const SUMMARY_RULE_WIDTH: usize = 80;
