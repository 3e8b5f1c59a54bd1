use eframe::egui;
use egui_plot::MarkerShape;
use std::path::PathBuf;
use tracing::{info, warn};

use super::charts::ChartRenderer;
use super::stats_panel::StatsPanel;
use crate::display::SummaryTable;
use crate::report::{load_comparison_data, load_distribution_panels, ComparisonData, DistributionPanel};

/// Interactive view over one results directory
pub struct ReportViewer {
    results_dir: PathBuf,
    comparison: Option<ComparisonData>,
    summary: Option<SummaryTable>,
    distributions: Vec<DistributionPanel>,
    last_error: Option<String>,
}

impl ReportViewer {
    pub fn new(results_dir: PathBuf) -> Self {
        let mut viewer = Self {
            results_dir,
            comparison: None,
            summary: None,
            distributions: Vec::new(),
            last_error: None,
        };
        viewer.reload();
        viewer
    }

    fn reload(&mut self) {
        info!("Loading results from {}", self.results_dir.display());
        self.last_error = None;

        match load_comparison_data(&self.results_dir) {
            Ok(data) => {
                self.summary = data.as_ref().map(|d| SummaryTable::from_records(&d.records));
                self.comparison = data;
            }
            Err(e) => {
                warn!("Failed to load performance results: {:#}", e);
                self.comparison = None;
                self.summary = None;
                self.last_error = Some(format!("{:#}", e));
            }
        }

        match load_distribution_panels(&self.results_dir) {
            Ok(panels) => self.distributions = panels.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load order logs: {:#}", e);
                self.distributions.clear();
                self.last_error = Some(format!("{:#}", e));
            }
        }
    }

    fn select_folder(&mut self) {
        if let Some(dir) = rfd::FileDialog::new()
            .set_title("Select Benchmark Results Folder")
            .set_directory(&self.results_dir)
            .pick_folder()
        {
            self.results_dir = dir;
            self.reload();
        }
    }

    fn render_comparison(&self, ui: &mut egui::Ui) {
        ui.heading("📈 Performance Analysis");
        ui.add_space(10.0);

        let Some(data) = &self.comparison else {
            ui.label("Run ./benchmark.sh first");
            return;
        };

        ui.columns(2, |columns| {
            ChartRenderer::render_rate_chart(
                &mut columns[0],
                "throughput_plot",
                "Throughput vs Market Data Rate",
                &data.throughput,
                "Throughput (orders/s)",
                MarkerShape::Circle,
            );
            ChartRenderer::render_rate_chart(
                &mut columns[1],
                "latency_plot",
                "Latency vs Market Data Rate",
                &data.latency,
                "Average Latency (μs)",
                MarkerShape::Square,
            );
        });

        ui.add_space(15.0);

        ui.columns(2, |columns| {
            ChartRenderer::render_thread_scaling(&mut columns[0], &data.scaling);
            ChartRenderer::render_volume(&mut columns[1], &data.volume);
        });
    }

    fn render_distributions(&self, ui: &mut egui::Ui) {
        ui.heading("⏱ Latency Distributions");
        ui.add_space(10.0);

        if self.distributions.is_empty() {
            ui.label("No order logs found!");
            return;
        }

        for (row, pair) in self.distributions.chunks(2).enumerate() {
            ui.columns(2, |columns| {
                for (col, panel) in pair.iter().enumerate() {
                    let id = format!("latency_hist_{}", row * 2 + col);
                    ChartRenderer::render_distribution(&mut columns[col], &id, panel);
                }
            });
            ui.add_space(15.0);
        }
    }
}

impl eframe::App for ReportViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("📊 HFT Benchmark Viewer");
                ui.label(self.results_dir.display().to_string());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("📂 Open Folder").clicked() {
                        self.select_folder();
                    }
                    if ui.button("🔄 Reload").clicked() {
                        self.reload();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(err) = &self.last_error {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.separator();
                }

                StatsPanel::render(ui, self.summary.as_ref());
                ui.separator();
                self.render_comparison(ui);
                ui.separator();
                self.render_distributions(ui);
            });
        });
    }
}
