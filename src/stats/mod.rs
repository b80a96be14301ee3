//! Stats module - sales aggregates

mod aggregates;

pub use aggregates::{
    PreviewTable, RankedItem, SalesAggregator, SalesSummary, StatsError, PREVIEW_ROWS, TOP_N,
};
