//! Pages module - the four dashboard views
//!
//! Each page is a pure function of the filtered table: it computes its
//! aggregates and returns chart specifications for the viewer to draw.

mod home;
mod products;
mod regional;
mod revenue;

pub use home::{HomeView, MetricCard};
pub use products::ProductsView;
pub use regional::RegionalView;
pub use revenue::RevenueView;

use crate::data::SalesTable;
use crate::stats::StatsError;

/// Page selectable in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    RevenueTrends,
    BestSellingProducts,
    RegionalAnalysis,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Home,
        Page::RevenueTrends,
        Page::BestSellingProducts,
        Page::RegionalAnalysis,
    ];

    /// Name shown in the page selector.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::RevenueTrends => "Revenue Trends",
            Page::BestSellingProducts => "Best-Selling Products",
            Page::RegionalAnalysis => "Regional Analysis",
        }
    }
}

/// Everything one page displays.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Home(HomeView),
    RevenueTrends(RevenueView),
    BestSellingProducts(ProductsView),
    RegionalAnalysis(RegionalView),
}

impl PageView {
    pub fn title(&self) -> &str {
        match self {
            PageView::Home(view) => &view.title,
            PageView::RevenueTrends(view) => &view.title,
            PageView::BestSellingProducts(view) => &view.title,
            PageView::RegionalAnalysis(view) => &view.title,
        }
    }
}

/// Compute the selected page from the filtered records.
pub fn render(page: Page, filtered: &SalesTable) -> Result<PageView, StatsError> {
    Ok(match page {
        Page::Home => PageView::Home(home::render(filtered)?),
        Page::RevenueTrends => PageView::RevenueTrends(revenue::render(filtered)?),
        Page::BestSellingProducts => PageView::BestSellingProducts(products::render(filtered)?),
        Page::RegionalAnalysis => PageView::RegionalAnalysis(regional::render(filtered)?),
    })
}
