use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::charts::{register_chart_font, render_comparison_chart};
use crate::common::DataLoader;
use crate::config::{csv_pattern, PERFORMANCE_CHART_FILE, PERFORMANCE_FILE_PREFIX};
use crate::display::SummaryTable;
use crate::results::load_performance_record;

use super::ComparisonData;

/// Parse every `performance_*.csv` with a well-formed name.
/// `Ok(None)` when nothing usable was found.
pub fn load_comparison_data(results_dir: &Path) -> Result<Option<ComparisonData>> {
    let pattern = csv_pattern(results_dir, PERFORMANCE_FILE_PREFIX);
    let files = DataLoader::load_files(&pattern)?;

    let mut records = Vec::with_capacity(files.len());
    for file in &files {
        match load_performance_record(file)? {
            Some(record) => {
                debug!(
                    rate = record.rate,
                    threads = record.threads,
                    duration_s = ?record.duration_s,
                    min_latency_us = ?record.min_latency_us,
                    max_latency_us = ?record.max_latency_us,
                    "Loaded {}",
                    file.display()
                );
                records.push(record);
            }
            None => debug!("Skipping {}: no rate/threads in name", file.display()),
        }
    }

    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(ComparisonData::from_records(records)))
}

/// Render the comparison chart and print the summary table.
/// Missing results are reported on stdout and yield `Ok(None)`.
pub fn plot_performance_comparison(
    results_dir: &Path,
    font: Option<&Path>,
) -> Result<Option<SummaryTable>> {
    let Some(data) = load_comparison_data(results_dir)? else {
        println!("No benchmark results found!");
        println!("Run ./benchmark.sh first");
        return Ok(None);
    };
    info!("Loaded {} benchmark configuration(s)", data.records.len());

    register_chart_font(font)?;
    let output = results_dir.join(PERFORMANCE_CHART_FILE);
    render_comparison_chart(&output, &data)?;
    println!("✓ Saved: {}", output.display());

    let summary = SummaryTable::from_records(&data.records);
    summary.display();

    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::chart_font_available;
    use std::fs;

    #[test]
    fn test_summary_row_from_results_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("performance_10000_4.csv"),
            "Metric,Value\nThroughput(orders/s),1234.5\nAvgLatency(us),12.3\nTotalOrders,50000\n",
        )
        .unwrap();

        let data = load_comparison_data(dir.path()).unwrap().unwrap();
        let summary = SummaryTable::from_records(&data.records);

        let row = summary.find("10,000", "4").unwrap();
        assert_eq!(row.throughput, "1234.5");
        assert_eq!(row.avg_latency, "12.30");
        assert_eq!(row.total_orders, "50000");
    }

    #[test]
    fn test_records_sorted_and_bad_names_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let body = "Metric,Value\nThroughput(orders/s),1\n";
        fs::write(dir.path().join("performance_50000_2.csv"), body).unwrap();
        fs::write(dir.path().join("performance_1000_8.csv"), body).unwrap();
        fs::write(dir.path().join("performance_1000_2.csv"), body).unwrap();
        fs::write(dir.path().join("performance_old.csv"), body).unwrap();

        let data = load_comparison_data(dir.path()).unwrap().unwrap();
        let configs: Vec<(u64, u32)> = data.records.iter().map(|r| (r.rate, r.threads)).collect();
        assert_eq!(configs, vec![(1000, 2), (1000, 8), (50000, 2)]);
    }

    #[test]
    fn test_empty_results_dir_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let summary = plot_performance_comparison(dir.path(), None).unwrap();

        assert!(summary.is_none());
        assert!(!dir.path().join(PERFORMANCE_CHART_FILE).exists());
    }

    #[test]
    fn test_only_malformed_names_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("performance_latest.csv"), "Metric,Value\n").unwrap();

        assert!(plot_performance_comparison(dir.path(), None).unwrap().is_none());
        assert!(!dir.path().join(PERFORMANCE_CHART_FILE).exists());
    }

    #[test]
    fn test_malformed_csv_propagates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("performance_1000_1.csv"),
            "Metric,Value\nTotalOrders,many\n",
        )
        .unwrap();

        assert!(load_comparison_data(dir.path()).is_err());
    }

    #[test]
    fn test_renders_performance_chart() {
        if !chart_font_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        for (rate, threads, throughput) in [(10000, 4, 1234.5), (20000, 4, 2100.0), (10000, 8, 1900.0)] {
            fs::write(
                dir.path().join(format!("performance_{}_{}.csv", rate, threads)),
                format!(
                    "Metric,Value\nThroughput(orders/s),{}\nAvgLatency(us),12.3\nTotalOrders,50000\n",
                    throughput
                ),
            )
            .unwrap();
        }

        let summary = plot_performance_comparison(dir.path(), None).unwrap().unwrap();

        assert_eq!(summary.rows.len(), 3);
        let chart = dir.path().join(PERFORMANCE_CHART_FILE);
        assert!(fs::metadata(&chart).unwrap().len() > 0);
    }
}
