mod comparison_chart;
mod distribution_chart;
mod fonts;
mod renderer;

pub use comparison_chart::render_comparison_chart;
pub use distribution_chart::render_distribution_chart;
pub use fonts::register_chart_font;
#[cfg(test)]
pub use fonts::chart_font_available;
