use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::common::helpers::parse_filename;
use crate::error::ReportError;

pub const THROUGHPUT_METRIC: &str = "Throughput(orders/s)";
pub const AVG_LATENCY_METRIC: &str = "AvgLatency(us)";
pub const TOTAL_ORDERS_METRIC: &str = "TotalOrders";
pub const DURATION_METRIC: &str = "Duration(s)";
pub const MIN_LATENCY_METRIC: &str = "MinLatency(us)";
pub const MAX_LATENCY_METRIC: &str = "MaxLatency(us)";

const METRIC_COLUMN: &str = "Metric";
const VALUE_COLUMN: &str = "Value";

/// Metric name -> value, one entry per distinct name
pub type MetricMap = BTreeMap<String, f64>;

#[derive(Debug, Deserialize)]
struct MetricRow {
    #[serde(rename = "Metric")]
    metric: String,
    #[serde(rename = "Value")]
    value: String,
}

/// One benchmark configuration reduced to the metrics the report shows
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub rate: u64,
    pub threads: u32,
    pub throughput: f64,
    pub avg_latency_us: f64,
    pub total_orders: f64,
    pub duration_s: Option<f64>,
    pub min_latency_us: Option<f64>,
    pub max_latency_us: Option<f64>,
}

impl PerformanceRecord {
    /// Missing display metrics count as zero
    pub fn from_metrics(rate: u64, threads: u32, metrics: &MetricMap) -> Self {
        let get = |key: &str| metrics.get(key).copied();
        Self {
            rate,
            threads,
            throughput: get(THROUGHPUT_METRIC).unwrap_or(0.0),
            avg_latency_us: get(AVG_LATENCY_METRIC).unwrap_or(0.0),
            total_orders: get(TOTAL_ORDERS_METRIC).unwrap_or(0.0),
            duration_s: get(DURATION_METRIC),
            min_latency_us: get(MIN_LATENCY_METRIC),
            max_latency_us: get(MAX_LATENCY_METRIC),
        }
    }

    /// Short label used on the order-volume axis, e.g. `10K/4T`
    pub fn config_label(&self) -> String {
        format!("{}K/{}T", self.rate / 1000, self.threads)
    }
}

/// Parse `Metric,Value` rows. Later rows overwrite earlier ones with the same name.
pub fn parse_metrics<R: Read>(reader: R, path: &Path) -> Result<MetricMap> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .clone();
    for column in [METRIC_COLUMN, VALUE_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(ReportError::MissingColumn {
                path: path.to_path_buf(),
                column,
            }
            .into());
        }
    }

    let mut metrics = MetricMap::new();
    for (idx, row) in rdr.deserialize::<MetricRow>().enumerate() {
        let row = row.with_context(|| format!("Failed to read {}", path.display()))?;
        let value: f64 = row.value.parse().map_err(|_| ReportError::InvalidValue {
            path: path.to_path_buf(),
            row: idx + 1,
            value: row.value.clone(),
        })?;
        metrics.insert(row.metric, value);
    }

    Ok(metrics)
}

pub fn parse_performance_file(path: &Path) -> Result<MetricMap> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_metrics(file, path)
}

/// `Ok(None)` when the filename does not encode a configuration
pub fn load_performance_record(path: &Path) -> Result<Option<PerformanceRecord>> {
    let Some((rate, threads)) = parse_filename(path) else {
        return Ok(None);
    };
    let metrics = parse_performance_file(path)?;
    Ok(Some(PerformanceRecord::from_metrics(rate, threads, &metrics)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "Metric,Value\n\
        Duration(s),10.02\n\
        TotalOrders,50000\n\
        Throughput(orders/s),1234.5\n\
        AvgLatency(us),12.3\n\
        MinLatency(us),1.5\n\
        MaxLatency(us),250\n\
        MarketDataRate,10000\n\
        StrategyThreads,4\n";

    #[test]
    fn test_parse_metrics() {
        let metrics = parse_metrics(SAMPLE.as_bytes(), Path::new("sample.csv")).unwrap();
        assert_eq!(metrics.len(), 8);
        assert_eq!(metrics[THROUGHPUT_METRIC], 1234.5);
        assert_eq!(metrics[AVG_LATENCY_METRIC], 12.3);
        assert_eq!(metrics[TOTAL_ORDERS_METRIC], 50000.0);
        assert_eq!(metrics["StrategyThreads"], 4.0);
    }

    #[test]
    fn test_parse_metrics_duplicate_name_keeps_last() {
        let csv = "Metric,Value\nTotalOrders,10\nTotalOrders,20\n";
        let metrics = parse_metrics(csv.as_bytes(), Path::new("dup.csv")).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[TOTAL_ORDERS_METRIC], 20.0);
    }

    #[test]
    fn test_parse_metrics_missing_column() {
        let csv = "Name,Value\nTotalOrders,10\n";
        let err = parse_metrics(csv.as_bytes(), Path::new("bad.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::MissingColumn { column: "Metric", .. })
        ));
    }

    #[test]
    fn test_parse_metrics_invalid_value() {
        let csv = "Metric,Value\nTotalOrders,lots\n";
        let err = parse_metrics(csv.as_bytes(), Path::new("bad.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::InvalidValue { row: 1, .. })
        ));
    }

    #[test]
    fn test_record_defaults_missing_metrics() {
        let csv = "Metric,Value\nTotalOrders,42\n";
        let metrics = parse_metrics(csv.as_bytes(), Path::new("partial.csv")).unwrap();
        let record = PerformanceRecord::from_metrics(2000, 2, &metrics);
        assert_eq!(record.throughput, 0.0);
        assert_eq!(record.avg_latency_us, 0.0);
        assert_eq!(record.total_orders, 42.0);
        assert_eq!(record.duration_s, None);
        assert_eq!(record.config_label(), "2K/2T");
    }

    #[test]
    fn test_load_performance_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("performance_10000_4.csv");
        fs::write(&path, SAMPLE).unwrap();

        let record = load_performance_record(&path).unwrap().unwrap();
        assert_eq!(record.rate, 10000);
        assert_eq!(record.threads, 4);
        assert_eq!(record.throughput, 1234.5);
        assert_eq!(record.min_latency_us, Some(1.5));
        assert_eq!(record.max_latency_us, Some(250.0));
    }

    #[test]
    fn test_load_performance_record_skips_bad_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("performance_latest.csv");
        fs::write(&path, "not,even\ncsv").unwrap();
        assert_eq!(load_performance_record(&path).unwrap(), None);
    }
}
