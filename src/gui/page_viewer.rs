//! Page Viewer Widget
//! Central panel that draws the currently rendered page.

use crate::charts::ChartPlotter;
use crate::format;
use crate::pages::{HomeView, MetricCard, PageView, ProductsView, RegionalView, RevenueView};
use crate::stats::{PreviewTable, RankedItem};
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 20.0;

#[derive(Default)]
pub struct PageViewer {
    view: Option<PageView>,
    error: Option<String>,
}

impl PageViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_view(&mut self, view: PageView) {
        self.view = Some(view);
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.view = None;
        self.error = Some(error);
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if let Some(error) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(format!("Error: {error}"))
                        .size(16.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            });
            return;
        }

        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(view.title()).size(26.0).strong());
                ui.add_space(10.0);

                match view {
                    PageView::Home(home) => Self::show_home(ui, home),
                    PageView::RevenueTrends(revenue) => Self::show_revenue(ui, revenue),
                    PageView::BestSellingProducts(products) => Self::show_products(ui, products),
                    PageView::RegionalAnalysis(regional) => Self::show_regional(ui, regional),
                }
            });
    }

    fn show_home(ui: &mut egui::Ui, view: &HomeView) {
        ui.label(&view.intro);
        ui.add_space(SECTION_SPACING);

        Self::show_metric_cards(ui, &view.metrics);
        ui.add_space(SECTION_SPACING);

        ui.label(RichText::new("Dataset Preview").size(18.0).strong());
        ui.add_space(6.0);
        Self::show_preview(ui, &view.preview);
    }

    fn show_metric_cards(ui: &mut egui::Ui, cards: &[MetricCard]) {
        ui.columns(cards.len(), |columns| {
            for (column, card) in columns.iter_mut().zip(cards) {
                egui::Frame::none()
                    .fill(column.visuals().widgets.noninteractive.bg_fill)
                    .rounding(8.0)
                    .inner_margin(12.0)
                    .show(column, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(card.label).size(13.0).color(Color32::GRAY));
                        ui.label(RichText::new(&card.value).size(28.0).strong());
                    });
            }
        });
    }

    fn show_preview(ui: &mut egui::Ui, preview: &PreviewTable) {
        if preview.rows.is_empty() {
            ui.label(RichText::new("No rows match the current filters").italics());
            return;
        }

        ScrollArea::horizontal().id_salt("preview").show(ui, |ui| {
            egui::Grid::new("preview_grid")
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for column in &preview.columns {
                        ui.label(RichText::new(column).strong());
                    }
                    ui.end_row();

                    for row in &preview.rows {
                        for cell in row {
                            ui.label(cell);
                        }
                        ui.end_row();
                    }
                });
        });
    }

    fn show_revenue(ui: &mut egui::Ui, view: &RevenueView) {
        ChartPlotter::draw_line_chart(ui, &view.chart);
    }

    fn show_products(ui: &mut egui::Ui, view: &ProductsView) {
        ChartPlotter::draw_bar_chart(ui, &view.by_sales);
        ui.add_space(SECTION_SPACING);
        ChartPlotter::draw_bar_chart(ui, &view.by_quantity);
    }

    fn show_regional(ui: &mut egui::Ui, view: &RegionalView) {
        Self::show_region_totals(ui, &view.region_totals);
        ui.add_space(SECTION_SPACING);
        ChartPlotter::draw_heatmap(ui, &view.heatmap);
        ui.add_space(SECTION_SPACING);
        ChartPlotter::draw_choropleth(ui, &view.choropleth);
    }

    fn show_region_totals(ui: &mut egui::Ui, totals: &[RankedItem]) {
        if totals.is_empty() {
            return;
        }
        ui.label(RichText::new("Sales by Region").size(16.0).strong());
        egui::Grid::new("region_totals")
            .striped(true)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                for item in totals {
                    ui.label(&item.name);
                    ui.label(format::currency(item.value));
                    ui.end_row();
                }
            });
    }
}
