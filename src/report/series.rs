use std::collections::BTreeMap;
use tracing::warn;

use crate::common::helpers::format_thousands;
use crate::results::{LatencyStats, OrderLog, PerformanceRecord};

/// One line on a rate-axis chart
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadSeries {
    pub threads: u32,
    pub points: Vec<(f64, f64)>,
}

impl ThreadSeries {
    pub fn label(&self) -> String {
        format!("{} threads", self.threads)
    }
}

/// Throughput pivoted to threads (groups) x rate (bars within a group)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadScaling {
    pub threads: Vec<u32>,
    pub rates: Vec<u64>,
    /// `values[thread_idx][rate_idx]`
    pub values: Vec<Vec<Option<f64>>>,
}

impl ThreadScaling {
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeBar {
    pub label: String,
    pub total_orders: f64,
    /// `threads / max_threads`, drives the bar colour
    pub intensity: f64,
}

/// Everything the comparison chart draws, derived once from the records
#[derive(Debug, Clone)]
pub struct ComparisonData {
    pub records: Vec<PerformanceRecord>,
    pub throughput: Vec<ThreadSeries>,
    pub latency: Vec<ThreadSeries>,
    pub scaling: ThreadScaling,
    pub volume: Vec<VolumeBar>,
}

impl ComparisonData {
    pub fn from_records(mut records: Vec<PerformanceRecord>) -> Self {
        sort_records(&mut records);
        Self {
            throughput: series_by_threads(&records, |r| r.throughput),
            latency: series_by_threads(&records, |r| r.avg_latency_us),
            scaling: thread_scaling(&records),
            volume: volume_bars(&records),
            records,
        }
    }

    pub fn rate_range(&self) -> (f64, f64) {
        let min = self.records.iter().map(|r| r.rate as f64).fold(f64::INFINITY, f64::min);
        let max = self.records.iter().map(|r| r.rate as f64).fold(f64::NEG_INFINITY, f64::max);
        if min.is_finite() && max.is_finite() {
            (min, max)
        } else {
            (0.0, 1.0)
        }
    }
}

/// Ascending by rate, then by thread count
pub fn sort_records(records: &mut [PerformanceRecord]) {
    records.sort_by(|a, b| (a.rate, a.threads).cmp(&(b.rate, b.threads)));
}

/// One series per distinct thread count (ascending), points in record order.
/// Expects `records` sorted by rate.
pub fn series_by_threads<F>(records: &[PerformanceRecord], value: F) -> Vec<ThreadSeries>
where
    F: Fn(&PerformanceRecord) -> f64,
{
    let mut grouped: BTreeMap<u32, Vec<(f64, f64)>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.threads)
            .or_default()
            .push((record.rate as f64, value(record)));
    }

    grouped
        .into_iter()
        .map(|(threads, points)| ThreadSeries { threads, points })
        .collect()
}

/// Duplicate (threads, rate) cells keep the last record
pub fn thread_scaling(records: &[PerformanceRecord]) -> ThreadScaling {
    let mut cells: BTreeMap<(u32, u64), f64> = BTreeMap::new();
    for record in records {
        if cells.insert((record.threads, record.rate), record.throughput).is_some() {
            warn!(
                "Duplicate results for rate {} / {} threads, keeping the last one",
                record.rate, record.threads
            );
        }
    }

    let mut threads: Vec<u32> = cells.keys().map(|(t, _)| *t).collect();
    threads.dedup();
    let mut rates: Vec<u64> = cells.keys().map(|(_, r)| *r).collect();
    rates.sort_unstable();
    rates.dedup();

    let values = threads
        .iter()
        .map(|t| rates.iter().map(|r| cells.get(&(*t, *r)).copied()).collect())
        .collect();

    ThreadScaling {
        threads,
        rates,
        values,
    }
}

pub fn volume_bars(records: &[PerformanceRecord]) -> Vec<VolumeBar> {
    let max_threads = records.iter().map(|r| r.threads).max().unwrap_or(0);
    records
        .iter()
        .map(|r| VolumeBar {
            label: r.config_label(),
            total_orders: r.total_orders,
            intensity: if max_threads > 0 {
                r.threads as f64 / max_threads as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// Equal-width bins over `[min, max]`; the last bin includes `max`
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `None` when there is no finite value to bin or the range overflows `f64`
    pub fn new(values: &[f64], bins: usize) -> Option<Self> {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if finite.is_empty() {
            return None;
        }
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / bins as f64;
        if !width.is_finite() {
            return None;
        }
        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { min, max, counts })
    }

    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }

    /// `(left, right, count)` per bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        let width = self.bin_width();
        self.counts.iter().enumerate().map(move |(i, &count)| {
            let left = self.min + i as f64 * width;
            (left, left + width, count)
        })
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// One latency panel of the distribution chart
#[derive(Debug, Clone)]
pub struct DistributionPanel {
    pub title: String,
    pub label: String,
    pub histogram: Option<Histogram>,
    pub stats: Option<LatencyStats>,
}

impl DistributionPanel {
    pub fn from_order_log(log: &OrderLog, bins: usize) -> Self {
        let (rate, threads) = match log.config {
            Some((rate, threads)) => (format_thousands(rate), threads.to_string()),
            None => ("?".to_string(), "?".to_string()),
        };
        Self {
            title: format!("Rate: {}/s | Threads: {}", rate, threads),
            label: format!("{}/s, {}T", rate, threads),
            histogram: Histogram::new(&log.latencies, bins),
            stats: log.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rate: u64, threads: u32, throughput: f64) -> PerformanceRecord {
        PerformanceRecord {
            rate,
            threads,
            throughput,
            avg_latency_us: throughput / 100.0,
            total_orders: throughput * 10.0,
            duration_s: None,
            min_latency_us: None,
            max_latency_us: None,
        }
    }

    #[test]
    fn test_series_grouped_by_threads_sorted_by_rate() {
        let data = ComparisonData::from_records(vec![
            record(20000, 4, 300.0),
            record(10000, 2, 100.0),
            record(10000, 4, 200.0),
            record(20000, 2, 150.0),
        ]);

        assert_eq!(data.throughput.len(), 2);
        assert_eq!(data.throughput[0].threads, 2);
        assert_eq!(data.throughput[0].points, vec![(10000.0, 100.0), (20000.0, 150.0)]);
        assert_eq!(data.throughput[1].label(), "4 threads");
        assert_eq!(data.latency[1].points, vec![(10000.0, 2.0), (20000.0, 3.0)]);
        assert_eq!(data.rate_range(), (10000.0, 20000.0));
    }

    #[test]
    fn test_thread_scaling_pivot() {
        let mut records = vec![
            record(5000, 1, 50.0),
            record(10000, 1, 90.0),
            record(10000, 8, 400.0),
        ];
        sort_records(&mut records);
        let scaling = thread_scaling(&records);

        assert_eq!(scaling.threads, vec![1, 8]);
        assert_eq!(scaling.rates, vec![5000, 10000]);
        assert_eq!(scaling.values[0], vec![Some(50.0), Some(90.0)]);
        assert_eq!(scaling.values[1], vec![None, Some(400.0)]);
        assert_eq!(scaling.max_value(), 400.0);
    }

    #[test]
    fn test_thread_scaling_duplicate_keeps_last() {
        let records = vec![record(1000, 2, 10.0), record(1000, 2, 20.0)];
        let scaling = thread_scaling(&records);
        assert_eq!(scaling.values, vec![vec![Some(20.0)]]);
    }

    #[test]
    fn test_volume_bars() {
        let bars = volume_bars(&[record(10000, 2, 1.0), record(50000, 8, 2.0)]);
        assert_eq!(bars[0].label, "10K/2T");
        assert_eq!(bars[0].intensity, 0.25);
        assert_eq!(bars[1].label, "50K/8T");
        assert_eq!(bars[1].intensity, 1.0);
        assert_eq!(bars[1].total_orders, 20.0);
    }

    #[test]
    fn test_histogram_counts_all_samples() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        let hist = Histogram::new(&values, 50).unwrap();

        assert_eq!(hist.counts.len(), 50);
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        assert_eq!(hist.bin_width(), 2.0);
        // max lands in the last bin
        assert_eq!(hist.counts[49], 3);

        let (left, right, _) = hist.bins().last().unwrap();
        assert_eq!((left, right), (98.0, 100.0));
    }

    #[test]
    fn test_histogram_constant_and_empty() {
        let hist = Histogram::new(&[5.0, 5.0, 5.0], 10).unwrap();
        assert_eq!((hist.min, hist.max), (4.5, 5.5));
        assert_eq!(hist.max_count(), 3);

        assert_eq!(Histogram::new(&[], 10), None);
        assert_eq!(Histogram::new(&[f64::NAN], 10), None);
    }

    #[test]
    fn test_histogram_range_overflow() {
        assert_eq!(Histogram::new(&[-1e308, 1e308], 50), None);
        assert_eq!(Histogram::new(&[f64::MIN, 0.0, f64::MAX], 50), None);

        let hist = Histogram::new(&[-1e307, 1e307], 50).unwrap();
        assert!(hist.bin_width().is_finite());
        assert_eq!(hist.counts.iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_distribution_panel_titles() {
        let log = OrderLog {
            config: Some((10000, 4)),
            latencies: vec![1.0, 2.0, 3.0],
        };
        let panel = DistributionPanel::from_order_log(&log, 50);
        assert_eq!(panel.title, "Rate: 10,000/s | Threads: 4");
        assert_eq!(panel.stats.unwrap().mean, 2.0);

        let unnamed = OrderLog {
            config: None,
            latencies: vec![],
        };
        let panel = DistributionPanel::from_order_log(&unnamed, 50);
        assert_eq!(panel.title, "Rate: ?/s | Threads: ?");
        assert!(panel.histogram.is_none());
    }
}
