use std::path::Path;
use tracing::warn;

/// Rate and thread count encoded as `<prefix>_<rate>_<threads>.csv`
pub fn parse_filename(path: &Path) -> Option<(u64, u32)> {
    let basename = path.file_name()?.to_string_lossy();
    let stem = basename.replace(".csv", "");
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 3 {
        return None;
    }

    match (parts[1].parse::<u64>(), parts[2].parse::<u32>()) {
        (Ok(rate), Ok(threads)) => Some((rate, threads)),
        _ => {
            warn!("Skipping {}: rate/threads are not integers", basename);
            None
        }
    }
}

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Expects `sorted` in ascending order
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Linear interpolation between closest ranks, `pct` in [0, 100].
/// Expects `sorted` in ascending order.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}
