mod orders;
mod performance;

pub use orders::{load_order_log, LatencyStats, OrderLog};
pub use performance::{load_performance_record, PerformanceRecord};
