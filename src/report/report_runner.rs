use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use super::{plot_latency_distribution, plot_performance_comparison};
use crate::config::SUMMARY_RULE_WIDTH as BANNER_WIDTH;

/// 리포트 생성을 담당하는 구조체 (Single Responsibility Principle)
pub struct ReportRunner {
    results_dir: PathBuf,
    font_path: Option<PathBuf>,
}

impl ReportRunner {
    pub fn new(results_dir: PathBuf, font_path: Option<PathBuf>) -> Self {
        Self {
            results_dir,
            font_path,
        }
    }

    #[cfg(any(test, feature = "viewer"))]
    pub fn results_dir(&self) -> &std::path::Path {
        &self.results_dir
    }

    /// Comparison chart and summary, then latency distributions
    pub fn run(&self) -> Result<()> {
        let start_time = Instant::now();
        info!("Reading benchmark results from {}", self.results_dir.display());

        println!("\n{}", "=".repeat(BANNER_WIDTH));
        println!("HFT PERFORMANCE VISUALIZATION");
        println!("{}\n", "=".repeat(BANNER_WIDTH));

        let font = self.font_path.as_deref();
        plot_performance_comparison(&self.results_dir, font)?;
        println!();
        plot_latency_distribution(&self.results_dir, font)?;

        println!("\n{}", "=".repeat(BANNER_WIDTH));
        println!("Visualization complete!");
        println!("{}\n", "=".repeat(BANNER_WIDTH));

        info!("Report finished in {:.2}s", start_time.elapsed().as_secs_f64());
        Ok(())
    }
}
