pub mod range_service;
pub mod chart_service;
pub mod plot_service;

pub use chart_service::{ChartRenderer, ChartSurface, RenderOutcome};
pub use plot_service::PngPainter;
pub use range_service::RangeSelector;
