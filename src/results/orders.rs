use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::common::helpers::{mean, median, parse_filename, percentile};
use crate::error::ReportError;

const LATENCY_COLUMN: &str = "Latency_us";

#[derive(Debug, Deserialize)]
struct OrderRow {
    #[serde(rename = "Latency_us")]
    latency_us: String,
}

/// Latencies of one order log plus the configuration from its filename
#[derive(Debug, Clone)]
pub struct OrderLog {
    pub config: Option<(u64, u32)>,
    pub latencies: Vec<f64>,
}

impl OrderLog {
    pub fn stats(&self) -> Option<LatencyStats> {
        LatencyStats::from_latencies(&self.latencies)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
    pub p99: f64,
}

impl LatencyStats {
    /// `None` for an empty sequence
    pub fn from_latencies(latencies: &[f64]) -> Option<Self> {
        let mut sorted = latencies.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            count: sorted.len(),
            mean: mean(&sorted)?,
            median: median(&sorted)?,
            min: *sorted.first()?,
            max: *sorted.last()?,
            p95: percentile(&sorted, 95.0)?,
            p99: percentile(&sorted, 99.0)?,
        })
    }
}

/// Read the `Latency_us` column; other columns are ignored
pub fn parse_latencies<R: Read>(reader: R, path: &Path) -> Result<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?;
    if !headers.iter().any(|h| h == LATENCY_COLUMN) {
        return Err(ReportError::MissingColumn {
            path: path.to_path_buf(),
            column: LATENCY_COLUMN,
        }
        .into());
    }

    let mut latencies = Vec::new();
    for (idx, row) in rdr.deserialize::<OrderRow>().enumerate() {
        let row = row.with_context(|| format!("Failed to read {}", path.display()))?;
        let latency: f64 = row.latency_us.parse().map_err(|_| ReportError::InvalidValue {
            path: path.to_path_buf(),
            row: idx + 1,
            value: row.latency_us.clone(),
        })?;
        latencies.push(latency);
    }

    Ok(latencies)
}

pub fn load_order_log(path: &Path) -> Result<OrderLog> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let latencies = parse_latencies(file, path)?;

    Ok(OrderLog {
        config: parse_filename(path),
        latencies,
    })
}
