use std::path::PathBuf;
use thiserror::Error;

/// Failures tied to the content of a benchmark result file
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{path}: row {row}: '{value}' is not a number")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("no usable font found (set --font or BENCH_VIZ_FONT)")]
    FontUnavailable,

    #[error("chart rendering failed: {0}")]
    Render(String),
}
