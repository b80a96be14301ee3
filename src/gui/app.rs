//! Sales Dashboard Main Application
//! Main window with the filter sidebar and the page viewer.

use crate::data::{filter_records, DataLoader, SalesTable};
use crate::gui::{ControlPanel, ControlPanelAction, PageViewer};
use crate::pages;
use crate::stats::StatsError;
use egui::SidePanel;
use polars::prelude::PolarsResult;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Main application window.
pub struct DashboardApp {
    loader: DataLoader,
    table: SalesTable,
    control_panel: ControlPanel,
    page_viewer: PageViewer,
}

impl DashboardApp {
    /// Build the app around an already loaded table and render the default page.
    pub fn new(loader: DataLoader, table: SalesTable, data_path: &Path) -> PolarsResult<Self> {
        let mut control_panel = ControlPanel::new();
        control_panel.set_dataset(data_path, &table)?;

        let mut app = Self {
            loader,
            table,
            control_panel,
            page_viewer: PageViewer::new(),
        };
        app.refresh();
        Ok(app)
    }

    /// Re-run filter and page renderer from scratch for the current sidebar state.
    fn refresh(&mut self) {
        let page = self.control_panel.page;
        let selection = self.control_panel.selection();

        let result = filter_records(&self.table, &selection)
            .map_err(StatsError::from)
            .and_then(|filtered| {
                debug!(
                    page = page.label(),
                    years = selection.years.len(),
                    regions = selection.regions.len(),
                    rows = filtered.height(),
                    "rendering page"
                );
                if filtered.is_empty() {
                    debug!(page = page.label(), "selection matches no rows");
                }
                pages::render(page, &filtered)
            });

        match result {
            Ok(view) => self.page_viewer.set_view(view),
            Err(e) => {
                error!(page = page.label(), error = %e, "page render failed");
                self.page_viewer.set_error(e.to_string());
            }
        }
    }

    /// Open another CSV through the memoized loader. Failures keep the current data.
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        let loaded = self.loader.load(&path).map_err(|e| e.to_string()).and_then(|table| {
            self.control_panel
                .set_dataset(&path, &table)
                .map(|_| table)
                .map_err(|e| e.to_string())
        });

        match loaded {
            Ok(table) => {
                info!(
                    path = %path.display(),
                    rows = table.height(),
                    cached = self.loader.cached_len(),
                    "switched data source"
                );
                self.table = table;
                self.refresh();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to open CSV");
                self.control_panel.set_status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::PageChanged | ControlPanelAction::FiltersChanged => {
                            self.refresh()
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.page_viewer.show(ui);
        });
    }
}
