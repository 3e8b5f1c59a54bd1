use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

use super::renderer::{
    draw_grouped_bar_panel, draw_line_panel, draw_volume_panel, render_err, titled_figure,
    LinePanel, Marker,
};
use crate::config::{CHART_HEIGHT, CHART_WIDTH};
use crate::report::ComparisonData;

/// 2x2 performance comparison written as PNG
pub fn render_comparison_chart(output: &Path, data: &ComparisonData) -> Result<()> {
    let root = BitMapBackend::new(output, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    let figure = titled_figure(&root, "HFT System Performance Analysis")?;

    let panels = figure.split_evenly((2, 2));
    let x_range = data.rate_range();

    draw_line_panel(
        &panels[0],
        &LinePanel {
            title: "Throughput vs Market Data Rate",
            x_desc: "Market Data Rate (updates/s)",
            y_desc: "Throughput (orders/s)",
            x_range,
            series: &data.throughput,
            marker: Marker::Circle,
        },
    )?;

    draw_line_panel(
        &panels[1],
        &LinePanel {
            title: "Latency vs Market Data Rate",
            x_desc: "Market Data Rate (updates/s)",
            y_desc: "Average Latency (μs)",
            x_range,
            series: &data.latency,
            marker: Marker::Square,
        },
    )?;

    draw_grouped_bar_panel(&panels[2], &data.scaling)?;
    draw_volume_panel(&panels[3], &data.volume)?;

    root.present().map_err(render_err)?;
    Ok(())
}
