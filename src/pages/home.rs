//! Home page: headline metrics and a preview of the filtered records.

use crate::data::SalesTable;
use crate::format;
use crate::stats::{PreviewTable, SalesAggregator, SalesSummary, StatsError, PREVIEW_ROWS};

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub title: String,
    pub intro: String,
    pub summary: SalesSummary,
    pub metrics: [MetricCard; 3],
    pub preview: PreviewTable,
}

pub fn render(filtered: &SalesTable) -> Result<HomeView, StatsError> {
    let summary = SalesAggregator::summary(filtered)?;
    let preview = SalesAggregator::preview(filtered, PREVIEW_ROWS)?;

    Ok(HomeView {
        title: "Superstore Sales Dashboard".to_string(),
        intro: "Explore sales data with interactive visualizations. \
                Use the sidebar to navigate and filter data."
            .to_string(),
        metrics: [
            MetricCard {
                label: "Total Sales",
                value: format::currency(summary.total_sales),
            },
            MetricCard {
                label: "Total Orders",
                value: format::count(summary.total_orders),
            },
            MetricCard {
                label: "Avg. Order Value",
                value: format::currency(summary.avg_order_value),
            },
        ],
        summary,
        preview,
    })
}
