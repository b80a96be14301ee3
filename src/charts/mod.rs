//! Charts module - chart specifications and egui rendering

pub mod palette;
mod plotter;
mod spec;
pub mod us_states;

pub use palette::ColorScale;
pub use plotter::ChartPlotter;
pub use spec::{BarChartSpec, BarColoring, ChoroplethSpec, HeatmapSpec, LineChartSpec};
