use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

use super::renderer::{draw_empty_panel, draw_histogram_panel, render_err, titled_figure};
use crate::config::{CHART_HEIGHT, CHART_WIDTH, MAX_DISTRIBUTION_PANELS};
use crate::report::DistributionPanel;

/// 2x2 latency histograms written as PNG; unused cells stay blank
pub fn render_distribution_chart(output: &Path, panels: &[DistributionPanel]) -> Result<()> {
    let root = BitMapBackend::new(output, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    let figure = titled_figure(&root, "Latency Distribution Analysis")?;

    let areas = figure.split_evenly((2, 2));
    for (panel, area) in panels.iter().take(MAX_DISTRIBUTION_PANELS).zip(areas.iter()) {
        match &panel.histogram {
            Some(histogram) => {
                draw_histogram_panel(area, &panel.title, histogram, panel.stats.as_ref())?
            }
            None => draw_empty_panel(area, &panel.title)?,
        }
    }

    root.present().map_err(render_err)?;
    Ok(())
}
