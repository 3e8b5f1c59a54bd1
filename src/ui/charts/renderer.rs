use eframe::egui;
use egui_plot::{
    AxisHints, Bar, BarChart, Corner, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints,
    Points, VLine,
};

use crate::common::helpers::format_thousands;
use crate::report::{DistributionPanel, ThreadScaling, ThreadSeries, VolumeBar};

const CHART_HEIGHT: f32 = 260.0;

const SERIES_COLORS: [egui::Color32; 6] = [
    egui::Color32::from_rgb(31, 119, 180),
    egui::Color32::from_rgb(255, 127, 14),
    egui::Color32::from_rgb(44, 160, 44),
    egui::Color32::from_rgb(214, 39, 40),
    egui::Color32::from_rgb(148, 103, 189),
    egui::Color32::from_rgb(140, 86, 75),
];

fn series_color(idx: usize) -> egui::Color32 {
    SERIES_COLORS[idx % SERIES_COLORS.len()]
}

/// Dark purple to yellow, roughly the viridis endpoints
fn intensity_color(t: f64) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    egui::Color32::from_rgb(lerp(68, 253), lerp(1, 231), lerp(84, 37))
}

pub struct ChartRenderer;

impl ChartRenderer {
    fn format_slot(labels: &[String], value: f64) -> String {
        let nearest = value.round();
        if (value - nearest).abs() > 1e-6 || nearest < 0.0 {
            return String::new();
        }
        labels.get(nearest as usize).cloned().unwrap_or_default()
    }

    /// One line per thread count over the market-data rate
    pub fn render_rate_chart(
        ui: &mut egui::Ui,
        id: &str,
        title: &str,
        series: &[ThreadSeries],
        y_label: &str,
        marker: MarkerShape,
    ) {
        ui.label(egui::RichText::new(title).strong().size(14.0));

        if series.is_empty() {
            ui.label("No data available");
            return;
        }

        let x_axis = AxisHints::new_x()
            .label("Market Data Rate (updates/s)")
            .formatter(|mark, _range| format_thousands(mark.value.max(0.0) as u64));
        let y_axis = AxisHints::new_y().label(y_label);

        Plot::new(id)
            .legend(Legend::default().position(Corner::LeftTop))
            .height(CHART_HEIGHT)
            .custom_x_axes(vec![x_axis])
            .custom_y_axes(vec![y_axis])
            .show(ui, |plot_ui| {
                for (idx, s) in series.iter().enumerate() {
                    let color = series_color(idx);
                    let points: Vec<[f64; 2]> = s.points.iter().map(|(x, y)| [*x, *y]).collect();
                    plot_ui.line(
                        Line::new(PlotPoints::from(points.clone()))
                            .color(color)
                            .name(s.label())
                            .width(2.0),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .color(color)
                            .shape(marker)
                            .radius(4.0)
                            .name(s.label()),
                    );
                }
            });
    }

    /// Bars grouped by thread count, one colour per market rate
    pub fn render_thread_scaling(ui: &mut egui::Ui, scaling: &ThreadScaling) {
        ui.label(egui::RichText::new("Thread Scaling Analysis").strong().size(14.0));

        let labels: Vec<String> = scaling.threads.iter().map(|t| t.to_string()).collect();
        let rates = scaling.rates.len().max(1);
        let bar_width = 0.8 / rates as f64;

        let x_axis = AxisHints::new_x()
            .label("Number of Strategy Threads")
            .formatter(move |mark, _range| Self::format_slot(&labels, mark.value));

        Plot::new("thread_scaling_plot")
            .legend(Legend::default().position(Corner::LeftTop))
            .height(CHART_HEIGHT)
            .custom_x_axes(vec![x_axis])
            .show(ui, |plot_ui| {
                for (rate_idx, rate) in scaling.rates.iter().enumerate() {
                    let bars: Vec<Bar> = scaling
                        .values
                        .iter()
                        .enumerate()
                        .filter_map(|(group, row)| row[rate_idx].map(|v| (group, v)))
                        .map(|(group, value)| {
                            let center = group as f64 - 0.4 + (rate_idx as f64 + 0.5) * bar_width;
                            Bar::new(center, value).width(bar_width)
                        })
                        .collect();
                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .color(series_color(rate_idx))
                            .name(format!("Market Rate {}", format_thousands(*rate))),
                    );
                }
            });
    }

    pub fn render_volume(ui: &mut egui::Ui, bars: &[VolumeBar]) {
        ui.label(egui::RichText::new("Order Volume by Configuration").strong().size(14.0));

        let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
        let x_axis = AxisHints::new_x()
            .label("Configuration")
            .formatter(move |mark, _range| Self::format_slot(&labels, mark.value));

        let chart_bars: Vec<Bar> = bars
            .iter()
            .enumerate()
            .map(|(idx, bar)| {
                Bar::new(idx as f64, bar.total_orders)
                    .width(0.35)
                    .fill(intensity_color(bar.intensity))
                    .name(&bar.label)
            })
            .collect();

        Plot::new("volume_plot")
            .height(CHART_HEIGHT)
            .custom_x_axes(vec![x_axis])
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(chart_bars).name("Total Orders"));
            });
    }

    pub fn render_distribution(ui: &mut egui::Ui, id: &str, panel: &DistributionPanel) {
        ui.label(egui::RichText::new(&panel.title).strong().size(14.0));

        let Some(histogram) = &panel.histogram else {
            ui.label("no samples");
            return;
        };

        let width = histogram.bin_width();
        let bars: Vec<Bar> = histogram
            .bins()
            .map(|(left, right, count)| Bar::new((left + right) / 2.0, count as f64).width(width))
            .collect();

        Plot::new(id)
            .legend(Legend::default().position(Corner::RightTop))
            .height(CHART_HEIGHT)
            .custom_x_axes(vec![AxisHints::new_x().label("Latency (μs)")])
            .custom_y_axes(vec![AxisHints::new_y().label("Frequency")])
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(egui::Color32::from_rgb(135, 206, 235))
                        .name("Latency"),
                );
                if let Some(stats) = &panel.stats {
                    plot_ui.vline(
                        VLine::new(stats.mean)
                            .color(egui::Color32::RED)
                            .style(LineStyle::Dashed { length: 10.0 })
                            .name(format!("Mean: {:.1}", stats.mean)),
                    );
                    plot_ui.vline(
                        VLine::new(stats.median)
                            .color(egui::Color32::GREEN)
                            .style(LineStyle::Dashed { length: 10.0 })
                            .name(format!("Median: {:.1}", stats.median)),
                    );
                }
            });
    }
}
