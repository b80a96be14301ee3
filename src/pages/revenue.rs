//! Revenue Trends page: monthly sales as a line chart.

use crate::charts::LineChartSpec;
use crate::data::SalesTable;
use crate::stats::{SalesAggregator, StatsError};

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueView {
    pub title: String,
    pub chart: LineChartSpec,
}

pub fn render(filtered: &SalesTable) -> Result<RevenueView, StatsError> {
    let points = SalesAggregator::monthly_sales(filtered)?
        .into_iter()
        .map(|(month, total)| (month.to_string(), total))
        .collect();

    Ok(RevenueView {
        title: "Revenue Trends Over Time".to_string(),
        chart: LineChartSpec {
            title: "Monthly Sales Trend".to_string(),
            x_label: "Month".to_string(),
            y_label: "Total Sales ($)".to_string(),
            points,
            markers: true,
            x_tick_angle: 45.0,
        },
    })
}
