mod charts;
mod common;
mod config;
mod display;
mod error;
mod logging;
mod report;
mod results;
#[cfg(feature = "viewer")]
mod ui;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use config::get_results_dir;
use report::ReportRunner;

/// Charts and summaries for HFT benchmark results
#[derive(Parser, Debug)]
#[command(name = "bench-viz", version, about)]
struct Cli {
    /// Directory holding performance_*.csv and orders_*.csv
    /// (defaults to $BENCH_RESULTS_DIR or ./benchmark_results)
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// TTF/OTF font used for chart text (defaults to $BENCH_VIZ_FONT or a system font)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Open the interactive viewer after writing the report
    #[cfg(feature = "viewer")]
    #[arg(long, default_value_t = false)]
    view: bool,
}

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let results_dir = cli.results_dir.clone().unwrap_or_else(get_results_dir);
    let runner = ReportRunner::new(results_dir, cli.font.clone());
    runner.run()?;

    open_viewer(&cli, &runner)
}

#[cfg(feature = "viewer")]
fn open_viewer(cli: &Cli, runner: &ReportRunner) -> Result<()> {
    if cli.view {
        ui::launch_viewer(runner.results_dir().to_path_buf())?;
    }
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn open_viewer(_cli: &Cli, _runner: &ReportRunner) -> Result<()> {
    Ok(())
}
