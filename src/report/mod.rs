mod comparison;
mod distribution;
mod report_runner;
mod series;

pub use comparison::plot_performance_comparison;
pub use distribution::plot_latency_distribution;
#[cfg(feature = "viewer")]
pub use comparison::load_comparison_data;
#[cfg(feature = "viewer")]
pub use distribution::load_distribution_panels;
pub use report_runner::ReportRunner;
pub use series::{
    ComparisonData, DistributionPanel, Histogram, ThreadScaling, ThreadSeries, VolumeBar,
};
