//! Best-Selling Products page: top sub-categories by sales and by quantity.

use crate::charts::{BarChartSpec, BarColoring, ColorScale};
use crate::data::SalesTable;
use crate::stats::{RankedItem, SalesAggregator, StatsError, TOP_N};

#[derive(Debug, Clone, PartialEq)]
pub struct ProductsView {
    pub title: String,
    pub by_sales: BarChartSpec,
    pub by_quantity: BarChartSpec,
}

pub fn render(filtered: &SalesTable) -> Result<ProductsView, StatsError> {
    let top_sales = SalesAggregator::top_by_sales(filtered, TOP_N)?;
    let top_quantity = SalesAggregator::top_by_quantity(filtered, TOP_N)?;

    Ok(ProductsView {
        title: "Best-Selling Products".to_string(),
        by_sales: BarChartSpec {
            title: format!("Top {TOP_N} Products by Sales"),
            value_label: "Total Sales ($)".to_string(),
            category_label: "Product Sub-Category".to_string(),
            bars: bars(top_sales),
            coloring: BarColoring::Palette(ColorScale::Viridis),
        },
        by_quantity: BarChartSpec {
            title: format!("Top {TOP_N} Products by Quantity Sold"),
            value_label: "Total Quantity Sold".to_string(),
            category_label: "Product Sub-Category".to_string(),
            bars: bars(top_quantity),
            coloring: BarColoring::ByValue(ColorScale::Blues),
        },
    })
}

fn bars(items: Vec<RankedItem>) -> Vec<(String, f64)> {
    items.into_iter().map(|item| (item.name, item.value)).collect()
}
