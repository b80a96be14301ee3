//! Chart Plotter Module
//! Draws chart specifications with egui_plot and the egui painter.

use super::palette::{ColorScale, Rgb};
use super::spec::{BarChartSpec, ChoroplethSpec, HeatmapSpec, LineChartSpec};
use super::us_states::{self, GRID_COLUMNS, GRID_ROWS};
use crate::format;
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, RichText, Sense, Shape, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoint, PlotPoints, Points};

const CHART_HEIGHT: f32 = 360.0;
const LINE_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
/// Fill for map tiles without data.
const UNSHADED: Color32 = Color32::from_rgb(228, 228, 228);

// Painter-drawn charts
const ROW_LABEL_WIDTH: f32 = 110.0;
const COLUMN_LABEL_BAND: f32 = 120.0;
const HEATMAP_CELL_HEIGHT: f32 = 40.0;
const COLOR_BAR_GAP: f32 = 16.0;
const COLOR_BAR_WIDTH: f32 = 16.0;
const COLOR_BAR_LABELS: f32 = 70.0;
const TICK_BAND: f32 = 56.0;
const LABEL_FONT: f32 = 11.0;

fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Black or white, whichever reads better on `fill`.
fn contrast_text(fill: Rgb) -> Color32 {
    let luminance = 0.299 * fill[0] as f32 + 0.587 * fill[1] as f32 + 0.114 * fill[2] as f32;
    if luminance > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

/// Category label for an integer-valued axis mark.
fn tick_label(labels: &[String], value: f64) -> String {
    if (value - value.round()).abs() > 1e-6 || value < 0.0 {
        return String::new();
    }
    labels.get(value.round() as usize).cloned().unwrap_or_default()
}

/// Draws the dashboard's chart specifications.
pub struct ChartPlotter;

impl ChartPlotter {
    fn draw_title(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(16.0).strong());
        ui.add_space(4.0);
    }

    fn draw_empty(ui: &mut egui::Ui) {
        ui.label(
            RichText::new("No data for the current selection")
                .italics()
                .color(Color32::GRAY),
        );
    }

    /// Line chart with categorical x axis; tick labels are painted rotated when requested.
    pub fn draw_line_chart(ui: &mut egui::Ui, spec: &LineChartSpec) {
        Self::draw_title(ui, &spec.title);
        if spec.points.is_empty() {
            Self::draw_empty(ui);
            return;
        }

        let coords: Vec<[f64; 2]> = spec
            .points
            .iter()
            .enumerate()
            .map(|(i, (_, value))| [i as f64, *value])
            .collect();
        let labels: Vec<String> = spec.points.iter().map(|(label, _)| label.clone()).collect();
        let axis_labels = labels.clone();
        let rotated = spec.x_tick_angle != 0.0;

        let response = Plot::new(format!("line_{}", spec.title))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .x_axis_formatter(move |mark, _range| {
                if rotated {
                    String::new()
                } else {
                    tick_label(&axis_labels, mark.value)
                }
            })
            .y_axis_formatter(|mark, _range| format::compact(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(coords.clone()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name(&spec.y_label),
                );
                if spec.markers {
                    plot_ui.points(
                        Points::new(PlotPoints::from(coords))
                            .radius(3.5)
                            .color(LINE_COLOR),
                    );
                }
            });

        if rotated {
            let painter = ui.painter().clone();
            let transform = response.transform;
            let frame = *transform.frame();
            let top = response.response.rect.bottom() + 4.0;
            let color = ui.visuals().text_color();

            // Thin out labels so rotated text does not overlap
            let max_labels = ((frame.width() / 18.0).max(1.0)) as usize;
            let step = labels.len().div_ceil(max_labels).max(1);

            for (i, label) in labels.iter().enumerate().step_by(step) {
                let x = transform
                    .position_from_point(&PlotPoint::new(i as f64, 0.0))
                    .x;
                if x < frame.left() || x > frame.right() {
                    continue;
                }
                draw_rotated_label(
                    &painter,
                    Pos2::new(x, top),
                    label,
                    spec.x_tick_angle.to_radians(),
                    color,
                );
            }
            ui.add_space(TICK_BAND);
        }
    }

    /// Horizontal bar chart, first bar on top.
    pub fn draw_bar_chart(ui: &mut egui::Ui, spec: &BarChartSpec) {
        Self::draw_title(ui, &spec.title);
        if spec.bars.is_empty() {
            Self::draw_empty(ui);
            return;
        }

        let n = spec.bars.len();
        let colors = spec.bar_colors();
        // Bar i sits at position n-1-i so the ranking reads top-down
        let names: Vec<String> = spec.bars.iter().rev().map(|(name, _)| name.clone()).collect();

        let bars: Vec<Bar> = spec
            .bars
            .iter()
            .zip(colors)
            .enumerate()
            .map(|(i, ((name, value), rgb))| {
                Bar::new((n - 1 - i) as f64, *value)
                    .name(name)
                    .fill(to_color32(rgb))
                    .width(0.7)
            })
            .collect();

        Plot::new(format!("bar_{}", spec.title))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .allow_drag(false)
            .allow_zoom(false)
            .x_axis_label(spec.value_label.clone())
            .y_axis_label(spec.category_label.clone())
            .x_axis_formatter(|mark, _range| format::compact(mark.value))
            .y_axis_formatter(move |mark, _range| tick_label(&names, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name(&spec.value_label));
            });
    }

    /// Region × State heatmap painted as a grid of cells with a color bar.
    pub fn draw_heatmap(ui: &mut egui::Ui, spec: &HeatmapSpec) {
        Self::draw_title(ui, &spec.title);
        if spec.rows.is_empty() || spec.columns.is_empty() {
            Self::draw_empty(ui);
            return;
        }

        let (min, max) = spec.value_range();
        let n_rows = spec.rows.len();
        let n_cols = spec.columns.len();
        let reserved = ROW_LABEL_WIDTH + COLOR_BAR_GAP + COLOR_BAR_WIDTH + COLOR_BAR_LABELS;
        let cell_w = ((ui.available_width() - reserved) / n_cols as f32).clamp(10.0, 48.0);
        let grid_size = Vec2::new(cell_w * n_cols as f32, HEATMAP_CELL_HEIGHT * n_rows as f32);
        let size = Vec2::new(grid_size.x + reserved, grid_size.y + COLUMN_LABEL_BAND);

        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();
        let origin = rect.left_top() + Vec2::new(ROW_LABEL_WIDTH, 0.0);

        for (r, (row, values)) in spec.rows.iter().zip(&spec.values).enumerate() {
            let y = origin.y + r as f32 * HEATMAP_CELL_HEIGHT;
            painter.text(
                Pos2::new(origin.x - 6.0, y + HEATMAP_CELL_HEIGHT / 2.0),
                Align2::RIGHT_CENTER,
                row,
                FontId::proportional(12.0),
                text_color,
            );
            for (c, value) in values.iter().enumerate() {
                let cell = Rect::from_min_size(
                    Pos2::new(origin.x + c as f32 * cell_w, y),
                    Vec2::new(cell_w, HEATMAP_CELL_HEIGHT),
                );
                painter.rect_filled(cell, 0.0, to_color32(spec.scale.sample_value(*value, min, max)));
            }
        }

        // State names run downwards under their column
        let label_top = origin.y + grid_size.y + 4.0;
        for (c, column) in spec.columns.iter().enumerate() {
            let x = origin.x + (c as f32 + 0.5) * cell_w + LABEL_FONT / 2.0;
            draw_rotated_label(
                &painter,
                Pos2::new(x, label_top),
                column,
                std::f32::consts::FRAC_PI_2,
                text_color,
            );
        }

        painter.text(
            Pos2::new(rect.left(), rect.top()),
            Align2::LEFT_TOP,
            &spec.y_label,
            FontId::proportional(LABEL_FONT),
            Color32::GRAY,
        );
        painter.text(
            Pos2::new(origin.x + grid_size.x / 2.0, rect.bottom()),
            Align2::CENTER_BOTTOM,
            &spec.x_label,
            FontId::proportional(LABEL_FONT),
            Color32::GRAY,
        );

        let bar_rect = Rect::from_min_size(
            Pos2::new(origin.x + grid_size.x + COLOR_BAR_GAP, origin.y),
            Vec2::new(COLOR_BAR_WIDTH, grid_size.y),
        );
        draw_color_bar(&painter, bar_rect, spec.scale, min, max, text_color);

        if let Some(pos) = response.hover_pos() {
            let local = pos - origin;
            if local.x >= 0.0 && local.y >= 0.0 {
                let c = (local.x / cell_w) as usize;
                let r = (local.y / HEATMAP_CELL_HEIGHT) as usize;
                if r < n_rows && c < n_cols {
                    let text = format!(
                        "{} / {}\n{}",
                        spec.rows[r],
                        spec.columns[c],
                        format::currency(spec.values[r][c])
                    );
                    response.on_hover_text_at_pointer(text);
                }
            }
        }
    }

    /// USA choropleth drawn as a tile-grid map. States without data stay unshaded.
    pub fn draw_choropleth(ui: &mut egui::Ui, spec: &ChoroplethSpec) {
        Self::draw_title(ui, &spec.title);

        let (min, max) = spec.value_range();
        let reserved = COLOR_BAR_GAP + COLOR_BAR_WIDTH + COLOR_BAR_LABELS;
        let tile = ((ui.available_width() - reserved) / GRID_COLUMNS as f32).clamp(26.0, 56.0);
        let gap = 3.0;
        let map_size = Vec2::new(tile * GRID_COLUMNS as f32, tile * GRID_ROWS as f32);

        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(map_size.x + reserved, map_size.y), Sense::hover());
        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();

        let tile_rect = |col: u8, row: u8| {
            Rect::from_min_size(
                rect.left_top() + Vec2::new(col as f32 * tile, row as f32 * tile),
                Vec2::splat(tile - gap),
            )
        };

        for state in us_states::STATES.iter() {
            let cell = tile_rect(state.col, state.row);
            let (fill, label) = match spec.entry_for_code(state.code) {
                Some(entry) => {
                    let rgb = spec.scale.sample_value(entry.value, min, max);
                    (to_color32(rgb), contrast_text(rgb))
                }
                None => (UNSHADED, Color32::GRAY),
            };
            painter.rect_filled(cell, 3.0, fill);
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                state.code,
                FontId::proportional(LABEL_FONT),
                label,
            );
        }

        let bar_rect = Rect::from_min_size(
            Pos2::new(rect.left() + map_size.x + COLOR_BAR_GAP, rect.top()),
            Vec2::new(COLOR_BAR_WIDTH, map_size.y - gap),
        );
        draw_color_bar(&painter, bar_rect, spec.scale, min, max, text_color);

        if let Some(pos) = response.hover_pos() {
            let hovered = us_states::STATES
                .iter()
                .find(|state| tile_rect(state.col, state.row).contains(pos));
            if let Some(state) = hovered {
                let value = spec
                    .entry_for_code(state.code)
                    .map(|entry| format::currency(entry.value))
                    .unwrap_or_else(|| "no sales".to_string());
                response.on_hover_text_at_pointer(format!(
                    "{} ({})\n{}: {}",
                    state.name, state.code, spec.value_label, value
                ));
            }
        }

        let unmapped: Vec<&str> = spec.unmapped().map(|e| e.state.as_str()).collect();
        if !unmapped.is_empty() {
            ui.label(
                RichText::new(format!("Not on map: {}", unmapped.join(", ")))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
    }
}

/// Paint `text` with its top-left corner at `pos`, rotated clockwise by `angle` radians.
fn draw_rotated_label(painter: &Painter, pos: Pos2, text: &str, angle: f32, color: Color32) {
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(LABEL_FONT), color);
    painter.add(Shape::Text(TextShape::new(pos, galley, color).with_angle(angle)));
}

/// Vertical gradient, high values on top, with min/max labels.
fn draw_color_bar(
    painter: &Painter,
    rect: Rect,
    scale: ColorScale,
    min: f64,
    max: f64,
    text_color: Color32,
) {
    const STEPS: usize = 32;
    let step_h = rect.height() / STEPS as f32;
    for i in 0..STEPS {
        let t = 1.0 - (i as f64 + 0.5) / STEPS as f64;
        let band = Rect::from_min_size(
            Pos2::new(rect.left(), rect.top() + i as f32 * step_h),
            Vec2::new(rect.width(), step_h + 0.5),
        );
        painter.rect_filled(band, 0.0, to_color32(scale.sample(t)));
    }

    let label_x = rect.right() + 4.0;
    painter.text(
        Pos2::new(label_x, rect.top()),
        Align2::LEFT_TOP,
        format::compact(max),
        FontId::proportional(LABEL_FONT),
        text_color,
    );
    painter.text(
        Pos2::new(label_x, rect.bottom()),
        Align2::LEFT_BOTTOM,
        format::compact(min),
        FontId::proportional(LABEL_FONT),
        text_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_labels_only_on_integer_marks() {
        let labels = vec!["2023-01".to_string(), "2023-03".to_string()];
        assert_eq!(tick_label(&labels, 0.0), "2023-01");
        assert_eq!(tick_label(&labels, 1.0), "2023-03");
        assert_eq!(tick_label(&labels, 0.5), "");
        assert_eq!(tick_label(&labels, 2.0), "");
        assert_eq!(tick_label(&labels, -1.0), "");
    }

    #[test]
    fn text_contrasts_with_fill() {
        assert_eq!(contrast_text([247, 251, 255]), Color32::BLACK);
        assert_eq!(contrast_text([8, 48, 107]), Color32::WHITE);
    }
}
