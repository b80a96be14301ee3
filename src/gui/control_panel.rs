//! Control Panel Widget
//! Left sidebar with the page selector and the Year/Region filters.

use crate::data::{SalesTable, Selection};
use crate::format;
use crate::pages::Page;
use egui::{Color32, ComboBox, RichText, ScrollArea};
use polars::prelude::PolarsResult;
use std::path::{Path, PathBuf};

/// Sidebar state: selected page, filter options and their checkboxes.
pub struct ControlPanel {
    pub page: Page,
    pub data_path: Option<PathBuf>,
    pub years: Vec<i32>,
    pub regions: Vec<String>,
    pub selected_years: Vec<bool>,
    pub selected_regions: Vec<bool>,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            page: Page::default(),
            data_path: None,
            years: Vec::new(),
            regions: Vec::new(),
            selected_years: Vec::new(),
            selected_regions: Vec::new(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer every year and region of a freshly loaded table, all selected.
    pub fn set_dataset(&mut self, path: &Path, table: &SalesTable) -> PolarsResult<()> {
        let all = Selection::all(table)?;
        self.data_path = Some(path.to_path_buf());
        self.years = all.years.into_iter().collect();
        self.regions = all.regions.into_iter().collect();
        self.selected_years = vec![true; self.years.len()];
        self.selected_regions = vec![true; self.regions.len()];
        self.status = format!("Loaded {} rows", format::count(table.height()));
        Ok(())
    }

    /// Years and regions currently ticked.
    pub fn selection(&self) -> Selection {
        Selection {
            years: self
                .years
                .iter()
                .zip(&self.selected_years)
                .filter(|(_, &selected)| selected)
                .map(|(year, _)| *year)
                .collect(),
            regions: self
                .regions
                .iter()
                .zip(&self.selected_regions)
                .filter(|(_, &selected)| selected)
                .map(|(region, _)| region.clone())
                .collect(),
        }
    }

    /// Set status line
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the sidebar
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Sales Dashboard Filters")
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .data_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file loaded".to_string());
                    ui.label(RichText::new(path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Page =====
        ui.label(RichText::new("Select Page").size(14.0).strong());
        ui.add_space(5.0);
        ComboBox::from_id_salt("page")
            .width(200.0)
            .selected_text(self.page.label())
            .show_ui(ui, |ui| {
                for page in Page::ALL {
                    if ui.selectable_label(self.page == page, page.label()).clicked()
                        && self.page != page
                    {
                        self.page = page;
                        action = ControlPanelAction::PageChanged;
                    }
                }
            });

        ui.add_space(15.0);

        // ===== Filters =====
        ui.label(RichText::new("Select Year(s)").size(14.0).strong());
        if Self::multi_select(ui, "years", &self.years, &mut self.selected_years) {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(10.0);

        ui.label(RichText::new("Select Region(s)").size(14.0).strong());
        if Self::multi_select(ui, "regions", &self.regions, &mut self.selected_regions) {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        ui.add_space(10.0);
        ui.label(
            RichText::new("Built with egui, egui_plot and Polars")
                .size(10.0)
                .color(Color32::GRAY),
        );

        action
    }

    /// Checkbox list with All/None buttons. Returns true when the selection changed.
    fn multi_select<T: ToString>(
        ui: &mut egui::Ui,
        id: &str,
        options: &[T],
        selected: &mut [bool],
    ) -> bool {
        let mut changed = false;

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(140.0)
                    .show(ui, |ui| {
                        for (option, checked) in options.iter().zip(selected.iter_mut()) {
                            if ui.checkbox(checked, option.to_string()).changed() {
                                changed = true;
                            }
                        }
                    });
            });

        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() && selected.iter().any(|v| !v) {
                selected.iter_mut().for_each(|v| *v = true);
                changed = true;
            }
            if ui.small_button("Clear All").clicked() && selected.iter().any(|v| *v) {
                selected.iter_mut().for_each(|v| *v = false);
                changed = true;
            }
        });

        changed
    }
}

/// Actions triggered by the sidebar
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    PageChanged,
    FiltersChanged,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{sample_table, Row};

    #[test]
    fn new_dataset_selects_everything() {
        let table = sample_table(&[
            Row::new("A1", "01/01/2015", "West", "California", "Chairs", 1.0, 1),
            Row::new("A2", "01/01/2016", "East", "New York", "Chairs", 1.0, 1),
        ]);
        let mut panel = ControlPanel::new();
        panel.set_dataset(Path::new("train.csv"), &table).unwrap();

        assert_eq!(panel.years, [2015, 2016]);
        assert_eq!(panel.regions, ["East", "West"]);
        assert_eq!(panel.selection(), Selection::all(&table).unwrap());
        assert_eq!(panel.status, "Loaded 2 rows");
    }

    #[test]
    fn unticked_options_leave_the_selection() {
        let table = sample_table(&[
            Row::new("A1", "01/01/2015", "West", "California", "Chairs", 1.0, 1),
            Row::new("A2", "01/01/2016", "East", "New York", "Chairs", 1.0, 1),
        ]);
        let mut panel = ControlPanel::new();
        panel.set_dataset(Path::new("train.csv"), &table).unwrap();
        panel.selected_years[0] = false;
        panel.selected_regions = vec![false, false];

        let selection = panel.selection();
        assert_eq!(selection.years.into_iter().collect::<Vec<_>>(), [2016]);
        assert!(selection.regions.is_empty());
    }
}
