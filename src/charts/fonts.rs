use anyhow::{anyhow, Context, Result};
use plotters::style::{register_font, FontStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::config::{get_font_path, FALLBACK_FONT_PATHS};
use crate::error::ReportError;

/// Family name every chart text style refers to
pub const FONT_FAMILY: &str = "sans-serif";

static REGISTERED_FONT: OnceLock<PathBuf> = OnceLock::new();

/// Explicit path, then `BENCH_VIZ_FONT`, then the first existing system font
pub fn resolve_font_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = get_font_path() {
        return Some(path);
    }
    FALLBACK_FONT_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// plotters keeps a 'static reference for the lifetime of the process
fn load_font(path: &Path) -> Result<&'static [u8]> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
    Ok(Box::leak(bytes.into_boxed_slice()))
}

/// Load a TTF/OTF font once per process and register it for chart text
pub fn register_chart_font(explicit: Option<&Path>) -> Result<()> {
    if let Some(path) = REGISTERED_FONT.get() {
        debug!("Chart font already registered: {}", path.display());
        return Ok(());
    }

    let path = resolve_font_path(explicit).ok_or(ReportError::FontUnavailable)?;
    let bytes = load_font(&path)?;

    for style in [FontStyle::Normal, FontStyle::Bold] {
        register_font(FONT_FAMILY, style, bytes)
            .map_err(|_| anyhow!("Invalid font {}", path.display()))?;
    }

    info!("Using chart font {}", path.display());
    let _ = REGISTERED_FONT.set(path);
    Ok(())
}

/// Registers a system font for tests that draw; `false` when none is installed
#[cfg(test)]
pub fn chart_font_available() -> bool {
    resolve_font_path(None).is_some() && register_chart_font(None).is_ok()
}
