mod paths;
mod chart;

pub use paths::*;
pub use chart::*;
