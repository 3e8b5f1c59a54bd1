mod app;
mod charts;
mod stats_panel;

pub use app::ReportViewer;

use std::path::PathBuf;

pub fn launch_viewer(results_dir: PathBuf) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_title(format!("HFT Benchmark Viewer - {}", results_dir.display())),
        ..Default::default()
    };

    eframe::run_native(
        "HFT Benchmark Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(ReportViewer::new(results_dir)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}
