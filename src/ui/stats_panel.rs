use eframe::egui;

use crate::display::SummaryTable;

pub struct StatsPanel;

impl StatsPanel {
    pub fn render(ui: &mut egui::Ui, summary: Option<&SummaryTable>) {
        ui.group(|ui| {
            ui.heading("📊 Performance Summary");
            ui.separator();

            let Some(summary) = summary else {
                ui.label("No benchmark results found!");
                return;
            };

            egui::Grid::new("summary_grid")
                .striped(true)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    for header in [
                        "Market Rate",
                        "Threads",
                        "Throughput (ord/s)",
                        "Avg Latency (μs)",
                        "Total Orders",
                    ] {
                        ui.label(egui::RichText::new(header).strong());
                    }
                    ui.end_row();

                    for row in &summary.rows {
                        for cell in [
                            &row.market_rate,
                            &row.threads,
                            &row.throughput,
                            &row.avg_latency,
                            &row.total_orders,
                        ] {
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.monospace(cell.as_str());
                            });
                        }
                        ui.end_row();
                    }
                });
        });
    }
}
