use std::env;
use std::path::{Path, PathBuf};

/// Directory the benchmark harness writes its CSV files into
pub const DEFAULT_RESULTS_DIR: &str = "benchmark_results";

pub const PERFORMANCE_FILE_PREFIX: &str = "performance_";
pub const ORDERS_FILE_PREFIX: &str = "orders_";

pub const PERFORMANCE_CHART_FILE: &str = "performance_analysis.png";
pub const LATENCY_CHART_FILE: &str = "latency_distributions.png";

pub const RESULTS_DIR_ENV: &str = "BENCH_RESULTS_DIR";
pub const FONT_PATH_ENV: &str = "BENCH_VIZ_FONT";

/// Fonts tried in order when neither `--font` nor `BENCH_VIZ_FONT` is set
pub const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    r"C:\Windows\Fonts\arial.ttf",
];

pub fn get_results_dir() -> PathBuf {
    PathBuf::from(env::var(RESULTS_DIR_ENV).unwrap_or_else(|_| DEFAULT_RESULTS_DIR.to_string()))
}

pub fn get_font_path() -> Option<PathBuf> {
    env::var(FONT_PATH_ENV).ok().map(PathBuf::from)
}

/// Glob pattern for `<prefix>*.csv` inside the results directory
pub fn csv_pattern(results_dir: &Path, prefix: &str) -> String {
    results_dir
        .join(format!("{}*.csv", prefix))
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_pattern_joins_results_dir() {
        let pattern = csv_pattern(Path::new("benchmark_results"), PERFORMANCE_FILE_PREFIX);
        let expected = Path::new("benchmark_results").join("performance_*.csv");
        assert_eq!(pattern, expected.to_string_lossy());
    }
}
