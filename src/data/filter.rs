//! Record Filter Module
//! Narrows the sales table to the Year/Region selections made in the sidebar.

use super::loader::SalesTable;
use super::schema::{REGION, YEAR};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Years and regions currently selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub regions: BTreeSet<String>,
}

impl Selection {
    /// Every year and region observed in the table.
    pub fn all(table: &SalesTable) -> PolarsResult<Self> {
        Ok(Self {
            years: table.years()?.into_iter().collect(),
            regions: table.regions()?.into_iter().collect(),
        })
    }
}

/// Rows whose Year AND Region are both selected.
///
/// An empty set on either side matches nothing.
pub fn filter_records(table: &SalesTable, selection: &Selection) -> PolarsResult<SalesTable> {
    let years: Vec<i32> = selection.years.iter().copied().collect();
    let regions: Vec<&str> = selection.regions.iter().map(String::as_str).collect();

    let filtered = table
        .frame()
        .clone()
        .lazy()
        .filter(
            col(YEAR)
                .is_in(lit(Series::new(YEAR.into(), years)))
                .and(col(REGION).is_in(lit(Series::new(REGION.into(), regions)))),
        )
        .collect()?;

    Ok(SalesTable::from_prepared(filtered))
}
