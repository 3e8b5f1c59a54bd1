use std::fmt;

use crate::common::helpers::format_thousands;
use crate::config::SUMMARY_RULE_WIDTH;
use crate::results::{LatencyStats, PerformanceRecord};

const SUMMARY_HEADERS: [&str; 5] = [
    "Market Rate",
    "Threads",
    "Throughput (ord/s)",
    "Avg Latency (μs)",
    "Total Orders",
];

const LATENCY_HEADERS: [&str; 8] = [
    "Configuration",
    "Samples",
    "Mean (μs)",
    "Median (μs)",
    "P95 (μs)",
    "P99 (μs)",
    "Min (μs)",
    "Max (μs)",
];

/// One formatted summary row, cells already rendered for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub market_rate: String,
    pub threads: String,
    pub throughput: String,
    pub avg_latency: String,
    pub total_orders: String,
}

impl SummaryRow {
    pub fn from_record(record: &PerformanceRecord) -> Self {
        Self {
            market_rate: format_thousands(record.rate),
            threads: record.threads.to_string(),
            throughput: format!("{:.1}", record.throughput),
            avg_latency: format!("{:.2}", record.avg_latency_us),
            total_orders: format!("{:.0}", record.total_orders),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [
            self.market_rate.as_str(),
            self.threads.as_str(),
            self.throughput.as_str(),
            self.avg_latency.as_str(),
            self.total_orders.as_str(),
        ]
    }
}

/// Console performance summary, one row per configuration
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Rows follow the order of `records`
    pub fn from_records(records: &[PerformanceRecord]) -> Self {
        Self {
            rows: records.iter().map(SummaryRow::from_record).collect(),
        }
    }

    #[cfg(test)]
    pub fn find(&self, market_rate: &str, threads: &str) -> Option<&SummaryRow> {
        self.rows
            .iter()
            .find(|r| r.market_rate == market_rate && r.threads == threads)
    }

    /// Print framed by `=` rules under the PERFORMANCE SUMMARY heading
    pub fn display(&self) {
        println!("\n{}", "=".repeat(SUMMARY_RULE_WIDTH));
        println!("PERFORMANCE SUMMARY");
        println!("{}", "=".repeat(SUMMARY_RULE_WIDTH));
        print!("{}", self);
        println!("{}", "=".repeat(SUMMARY_RULE_WIDTH));
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<&str>> = self.rows.iter().map(|r| r.cells().to_vec()).collect();
        write_aligned(f, &SUMMARY_HEADERS, &rows)
    }
}

/// Latency statistics of the plotted order logs
#[derive(Debug, Clone, Default)]
pub struct LatencyTable {
    rows: Vec<(String, Option<LatencyStats>)>,
}

impl LatencyTable {
    pub fn push(&mut self, label: impl Into<String>, stats: Option<LatencyStats>) {
        self.rows.push((label.into(), stats));
    }

    pub fn display(&self) {
        println!("\n{}", "=".repeat(SUMMARY_RULE_WIDTH));
        println!("LATENCY STATISTICS");
        println!("{}", "=".repeat(SUMMARY_RULE_WIDTH));
        print!("{}", self);
        println!("{}", "=".repeat(SUMMARY_RULE_WIDTH));
    }
}

impl fmt::Display for LatencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|(label, stats)| match stats {
                Some(s) => vec![
                    label.clone(),
                    s.count.to_string(),
                    format!("{:.2}", s.mean),
                    format!("{:.2}", s.median),
                    format!("{:.2}", s.p95),
                    format!("{:.2}", s.p99),
                    format!("{:.2}", s.min),
                    format!("{:.2}", s.max),
                ],
                None => {
                    let mut row = vec![label.clone(), "0".to_string()];
                    row.extend(std::iter::repeat("-".to_string()).take(6));
                    row
                }
            })
            .collect();
        let rows: Vec<Vec<&str>> = formatted
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect();
        write_aligned(f, &LATENCY_HEADERS, &rows)
    }
}

/// Right-aligned columns, two spaces apart, widths from header and cells
fn write_aligned(f: &mut fmt::Formatter<'_>, headers: &[&str], rows: &[Vec<&str>]) -> fmt::Result {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(f, headers, &widths)?;
    for row in rows {
        write_row(f, row, &widths)?;
    }
    Ok(())
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[&str], widths: &[usize]) -> fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:>width$}", cell, width = width))
        .collect();
    writeln!(f, "{}", line.join("  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PerformanceRecord {
        PerformanceRecord {
            rate: 10000,
            threads: 4,
            throughput: 1234.5,
            avg_latency_us: 12.3,
            total_orders: 50000.0,
            duration_s: Some(40.5),
            min_latency_us: None,
            max_latency_us: None,
        }
    }

    #[test]
    fn test_summary_row_formatting() {
        let row = SummaryRow::from_record(&record());
        assert_eq!(row.market_rate, "10,000");
        assert_eq!(row.threads, "4");
        assert_eq!(row.throughput, "1234.5");
        assert_eq!(row.avg_latency, "12.30");
        assert_eq!(row.total_orders, "50000");
    }

    #[test]
    fn test_summary_table_render() {
        let table = SummaryTable::from_records(&[record()]);
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Market Rate  Threads  Throughput (ord/s)"));
        let cells: Vec<&str> = lines[1].split_whitespace().collect();
        assert_eq!(cells, vec!["10,000", "4", "1234.5", "12.30", "50000"]);
        // right-aligned under the header
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
        assert!(table.find("10,000", "4").is_some());
    }

    #[test]
    fn test_latency_table_render() {
        let mut table = LatencyTable::default();
        table.push("10,000/s, 4T", LatencyStats::from_latencies(&[1.0, 3.0]));
        table.push("?/s, ?T", None);

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_start().starts_with("10,000/s, 4T"));
        assert!(lines[1].contains("2.00"));
        assert!(lines[2].trim_end().ends_with('-'));
    }
}
