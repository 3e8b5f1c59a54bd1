use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::charts::{register_chart_font, render_distribution_chart};
use crate::common::DataLoader;
use crate::config::{
    csv_pattern, HISTOGRAM_BINS, LATENCY_CHART_FILE, MAX_DISTRIBUTION_PANELS, ORDERS_FILE_PREFIX,
};
use crate::display::LatencyTable;
use crate::results::load_order_log;

use super::DistributionPanel;

/// Panels for the first four order logs in sorted order.
/// `Ok(None)` when no order log exists.
pub fn load_distribution_panels(results_dir: &Path) -> Result<Option<Vec<DistributionPanel>>> {
    let pattern = csv_pattern(results_dir, ORDERS_FILE_PREFIX);
    let files = DataLoader::load_files(&pattern)?;
    if files.is_empty() {
        return Ok(None);
    }

    let mut panels = Vec::with_capacity(MAX_DISTRIBUTION_PANELS);
    for file in files.iter().take(MAX_DISTRIBUTION_PANELS) {
        let log = load_order_log(file)?;
        info!("{}: {} latency samples", file.display(), log.latencies.len());
        panels.push(DistributionPanel::from_order_log(&log, HISTOGRAM_BINS));
    }

    Ok(Some(panels))
}

/// Render latency histograms and print per-configuration statistics
pub fn plot_latency_distribution(
    results_dir: &Path,
    font: Option<&Path>,
) -> Result<Option<LatencyTable>> {
    let Some(panels) = load_distribution_panels(results_dir)? else {
        println!("No order logs found!");
        return Ok(None);
    };

    register_chart_font(font)?;
    let output = results_dir.join(LATENCY_CHART_FILE);
    render_distribution_chart(&output, &panels)?;
    println!("✓ Saved: {}", output.display());

    let mut table = LatencyTable::default();
    for panel in &panels {
        table.push(panel.label.clone(), panel.stats);
    }
    table.display();

    Ok(Some(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::chart_font_available;
    use std::fs;

    fn write_log(dir: &Path, name: &str, latencies: &[f64]) {
        let mut body = String::from("Side,Price,Latency_us\n");
        for lat in latencies {
            body.push_str(&format!("BUY,100.0,{}\n", lat));
        }
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_first_four_logs_only() {
        let dir = tempfile::tempdir().unwrap();
        for (i, rate) in [1000, 2000, 3000, 4000, 5000].iter().enumerate() {
            write_log(dir.path(), &format!("orders_{}_{}.csv", rate, i + 1), &[1.0, 2.0]);
        }

        let panels = load_distribution_panels(dir.path()).unwrap().unwrap();
        assert_eq!(panels.len(), MAX_DISTRIBUTION_PANELS);
        assert_eq!(panels[0].title, "Rate: 1,000/s | Threads: 1");
        assert_eq!(panels[3].title, "Rate: 4,000/s | Threads: 4");
    }

    #[test]
    fn test_panel_statistics() {
        let dir = tempfile::tempdir().unwrap();
        write_log(dir.path(), "orders_10000_4.csv", &[10.0, 20.0, 30.0, 100.0]);

        let panels = load_distribution_panels(dir.path()).unwrap().unwrap();
        let stats = panels[0].stats.unwrap();
        assert_eq!(stats.mean, 40.0);
        assert_eq!(stats.median, 25.0);

        let histogram = panels[0].histogram.as_ref().unwrap();
        assert_eq!(histogram.counts.len(), HISTOGRAM_BINS);
        assert_eq!(histogram.counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_no_order_logs() {
        let dir = tempfile::tempdir().unwrap();

        assert!(plot_latency_distribution(dir.path(), None).unwrap().is_none());
        assert!(!dir.path().join(LATENCY_CHART_FILE).exists());
    }

    #[test]
    fn test_renders_latency_chart() {
        if !chart_font_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        write_log(dir.path(), "orders_10000_4.csv", &[10.0, 20.0, 30.0, 100.0]);
        write_log(dir.path(), "orders_20000_4.csv", &[]);
        // range too wide for f64 bins; drawn as an empty panel
        write_log(dir.path(), "orders_30000_4.csv", &[-1e308, 1e308]);

        let table = plot_latency_distribution(dir.path(), None).unwrap().unwrap();

        let printed = table.to_string();
        assert!(printed.contains("10,000/s, 4T"));
        assert!(printed.contains("30,000/s, 4T"));
        let chart = dir.path().join(LATENCY_CHART_FILE);
        assert!(fs::metadata(&chart).unwrap().len() > 0);
    }
}
