mod renderer;

pub use renderer::ChartRenderer;
