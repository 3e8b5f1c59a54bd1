use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::fonts::FONT_FAMILY;
use crate::common::helpers::format_thousands;
use crate::config::{
    AXIS_LABEL_FONT_SIZE, GROUP_BAR_WIDTH, LINE_WIDTH, MARKER_SIZE, PANEL_TITLE_FONT_SIZE,
    TICK_LABEL_FONT_SIZE, TITLE_FONT_SIZE, TITLE_TOP_MARGIN, VOLUME_BAR_WIDTH,
};
use crate::error::ReportError;
use crate::report::{Histogram, ThreadScaling, ThreadSeries, VolumeBar};
use crate::results::LatencyStats;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const MEAN_COLOR: RGBColor = RED;
const MEDIAN_COLOR: RGBColor = RGBColor(0, 160, 0);

pub fn render_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Render(e.to_string())
}

fn figure_title_font() -> FontDesc<'static> {
    (FONT_FAMILY, TITLE_FONT_SIZE).into_font().style(FontStyle::Bold)
}

/// White canvas with a bold figure title; returns the area below the title
pub fn titled_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
) -> Result<DrawingArea<DB, Shift>> {
    root.fill(&WHITE).map_err(render_err)?;
    let area = root
        .margin(TITLE_TOP_MARGIN, 0, 0, 0)
        .titled(title, figure_title_font())
        .map_err(render_err)?;
    Ok(area)
}

fn panel_title_font() -> FontDesc<'static> {
    (FONT_FAMILY, PANEL_TITLE_FONT_SIZE).into_font().style(FontStyle::Bold)
}

fn axis_font() -> FontDesc<'static> {
    (FONT_FAMILY, AXIS_LABEL_FONT_SIZE).into_font()
}

fn tick_font() -> FontDesc<'static> {
    (FONT_FAMILY, TICK_LABEL_FONT_SIZE).into_font()
}

fn series_color(idx: usize) -> RGBAColor {
    Palette99::pick(idx).to_rgba()
}

/// Upper bound leaving 10% headroom above the tallest value
fn headroom(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Widen a range by 5% each side, or by one unit when it is a single point
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span > 0.0 {
        (min - span * 0.05, max + span * 0.05)
    } else {
        let pad = (min.abs() * 0.1).max(1.0);
        (min - pad, max + pad)
    }
}

/// Label for integer slot positions on a categorical axis
fn slot_label<T: ToString>(slots: &[T], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    slots
        .get(nearest as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy)]
pub enum Marker {
    Circle,
    Square,
}

pub struct LinePanel<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub x_range: (f64, f64),
    pub series: &'a [ThreadSeries],
    pub marker: Marker,
}

/// One line per thread count over the market-data rate
pub fn draw_line_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &LinePanel<'_>,
) -> Result<()> {
    let (x_min, x_max) = padded_range(panel.x_range.0, panel.x_range.1);
    let y_max = panel
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, panel_title_font())
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(110)
        .build_cartesian_2d(x_min..x_max, 0.0..headroom(y_max))
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .axis_desc_style(axis_font())
        .label_style(tick_font())
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.1}", y))
        .draw()
        .map_err(render_err)?;

    for (idx, series) in panel.series.iter().enumerate() {
        let color = series_color(idx);
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(LINE_WIDTH),
            ))
            .map_err(render_err)?
            .label(series.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(LINE_WIDTH))
            });

        match panel.marker {
            Marker::Circle => {
                chart
                    .draw_series(
                        series
                            .points
                            .iter()
                            .map(|&p| Circle::new(p, MARKER_SIZE, color.filled())),
                    )
                    .map_err(render_err)?;
            }
            Marker::Square => {
                chart
                    .draw_series(series.points.iter().map(|&p| {
                        EmptyElement::at(p)
                            + Rectangle::new(
                                [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                                color.filled(),
                            )
                    }))
                    .map_err(render_err)?;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(tick_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;

    Ok(())
}

/// Groups per thread count, one bar per market rate inside a group
pub fn draw_grouped_bar_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scaling: &ThreadScaling,
) -> Result<()> {
    let groups = scaling.threads.len().max(1);
    let mut chart = ChartBuilder::on(area)
        .caption("Thread Scaling Analysis", panel_title_font())
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.5..(groups as f64 - 0.5), 0.0..headroom(scaling.max_value()))
        .map_err(render_err)?;

    let thread_labels = &scaling.threads;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Number of Strategy Threads")
        .y_desc("Throughput (orders/s)")
        .axis_desc_style(axis_font())
        .label_style(tick_font())
        .x_labels(groups)
        .x_label_formatter(&|x| slot_label(thread_labels, *x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(render_err)?;

    let rates = scaling.rates.len().max(1);
    let bar_width = GROUP_BAR_WIDTH / rates as f64;
    for (rate_idx, rate) in scaling.rates.iter().enumerate() {
        let color = series_color(rate_idx);
        let bars = scaling
            .values
            .iter()
            .enumerate()
            .filter_map(|(group, row)| row[rate_idx].map(|v| (group, v)))
            .map(|(group, value)| {
                let left = group as f64 - GROUP_BAR_WIDTH / 2.0 + rate_idx as f64 * bar_width;
                Rectangle::new([(left, 0.0), (left + bar_width, value)], color.filled())
            });

        chart
            .draw_series(bars)
            .map_err(render_err)?
            .label(format!("Market Rate {}", format_thousands(*rate)))
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(tick_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;

    Ok(())
}

/// One bar per configuration, coloured by relative thread count
pub fn draw_volume_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    bars: &[VolumeBar],
) -> Result<()> {
    let slots = bars.len().max(1);
    let y_max = bars.iter().map(|b| b.total_orders).fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption("Order Volume by Configuration", panel_title_font())
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.5..(slots as f64 - 0.5), 0.0..headroom(y_max))
        .map_err(render_err)?;

    let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Configuration")
        .y_desc("Total Orders Processed")
        .axis_desc_style(axis_font())
        .label_style(tick_font())
        .x_labels(slots)
        .x_label_formatter(&|x| slot_label(&labels, *x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(idx, bar)| {
            let color: RGBColor = ViridisRGB.get_color(bar.intensity as f32);
            let x = idx as f64;
            Rectangle::new(
                [
                    (x - VOLUME_BAR_WIDTH / 2.0, 0.0),
                    (x + VOLUME_BAR_WIDTH / 2.0, bar.total_orders),
                ],
                color.filled(),
            )
        }))
        .map_err(render_err)?;

    Ok(())
}

/// Latency histogram with dashed mean and median markers
pub fn draw_histogram_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    histogram: &Histogram,
    stats: Option<&LatencyStats>,
) -> Result<()> {
    let y_max = headroom(histogram.max_count() as f64);
    let mut chart = ChartBuilder::on(area)
        .caption(title, panel_title_font())
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(histogram.min..histogram.max, 0.0..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Latency (μs)")
        .y_desc("Frequency")
        .axis_desc_style(axis_font())
        .label_style(tick_font())
        .x_label_formatter(&|x| format!("{:.1}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(histogram.bins().map(|(left, right, count)| {
            Rectangle::new([(left, 0.0), (right, count as f64)], SKY_BLUE.mix(0.7).filled())
        }))
        .map_err(render_err)?;
    chart
        .draw_series(histogram.bins().filter(|(_, _, c)| *c > 0).map(|(left, right, count)| {
            Rectangle::new([(left, 0.0), (right, count as f64)], BLACK.stroke_width(1))
        }))
        .map_err(render_err)?;

    if let Some(stats) = stats {
        for (value, label, color) in [
            (stats.mean, format!("Mean: {:.1}", stats.mean), MEAN_COLOR),
            (stats.median, format!("Median: {:.1}", stats.median), MEDIAN_COLOR),
        ] {
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(value, 0.0), (value, y_max)],
                    12,
                    8,
                    color.stroke_width(LINE_WIDTH),
                ))
                .map_err(render_err)?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(LINE_WIDTH))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(tick_font())
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}

/// Placeholder for a configuration whose order log has no samples
pub fn draw_empty_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, title: &str) -> Result<()> {
    let area = area.titled(title, panel_title_font()).map_err(render_err)?;
    let (width, height) = area.dim_in_pixel();
    let style = TextStyle::from(axis_font()).pos(Pos::new(HPos::Center, VPos::Center));
    area.draw_text("no samples", &style, (width as i32 / 2, height as i32 / 2))
        .map_err(render_err)?;
    Ok(())
}
