//! Chart Specifications
//! Toolkit-independent descriptions of the charts each page shows.
//! The plotter turns them into egui drawing calls.

use super::palette::{ColorScale, Rgb};
use super::us_states;

/// Line series with one point per category along the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(String, f64)>,
    pub markers: bool,
    /// Tick label rotation in degrees, 0 for horizontal.
    pub x_tick_angle: f32,
}

/// How bars are colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarColoring {
    /// One color per bar, evenly spaced along the scale in bar order.
    Palette(ColorScale),
    /// Color by magnitude on a continuous scale.
    ByValue(ColorScale),
}

/// Horizontal bar chart, first bar drawn at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    pub value_label: String,
    pub category_label: String,
    pub bars: Vec<(String, f64)>,
    pub coloring: BarColoring,
}

impl BarChartSpec {
    /// Fill color of every bar, in bar order.
    pub fn bar_colors(&self) -> Vec<Rgb> {
        match self.coloring {
            BarColoring::Palette(scale) => scale.discrete(self.bars.len()),
            BarColoring::ByValue(scale) => {
                let (min, max) = value_range(self.bars.iter().map(|(_, v)| *v));
                self.bars
                    .iter()
                    .map(|(_, v)| scale.sample_value(*v, min, max))
                    .collect()
            }
        }
    }
}

/// Dense matrix of cells colored by value.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
    pub scale: ColorScale,
}

impl HeatmapSpec {
    pub fn value_range(&self) -> (f64, f64) {
        value_range(self.values.iter().flatten().copied())
    }
}

/// One state's value on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethEntry {
    /// State as it appears in the data.
    pub state: String,
    /// Postal code, `None` when the name is not a US state.
    pub code: Option<&'static str>,
    pub value: f64,
}

/// US states shaded by value. States without an entry stay unshaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethSpec {
    pub title: String,
    pub value_label: String,
    pub entries: Vec<ChoroplethEntry>,
    pub scale: ColorScale,
}

impl ChoroplethSpec {
    pub fn new(
        title: impl Into<String>,
        value_label: impl Into<String>,
        totals: impl IntoIterator<Item = (String, f64)>,
        scale: ColorScale,
    ) -> Self {
        let entries = totals
            .into_iter()
            .map(|(state, value)| ChoroplethEntry {
                code: us_states::state_code(&state),
                state,
                value,
            })
            .collect();
        Self {
            title: title.into(),
            value_label: value_label.into(),
            entries,
            scale,
        }
    }

    /// Entry for a postal code, if the data has one.
    pub fn entry_for_code(&self, code: &str) -> Option<&ChoroplethEntry> {
        self.entries.iter().find(|e| e.code == Some(code))
    }

    /// Range over the entries that land on the map.
    pub fn value_range(&self) -> (f64, f64) {
        value_range(
            self.entries
                .iter()
                .filter(|e| e.code.is_some())
                .map(|e| e.value),
        )
    }

    /// States in the data that could not be placed on the map.
    pub fn unmapped(&self) -> impl Iterator<Item = &ChoroplethEntry> {
        self.entries.iter().filter(|e| e.code.is_none())
    }
}

/// `(min, max)` of the values, `(0, 0)` when empty.
pub fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}
