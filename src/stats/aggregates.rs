//! Sales Aggregates Module
//! Group-by / sum / rank / pivot queries behind every dashboard page.

use crate::data::schema::{
    ParseYearMonthError, YearMonth, MONTH, ORDER_ID, QUANTITY, REGION, SALES, STATE,
    SUB_CATEGORY,
};
use crate::data::SalesTable;
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Rows shown in the dataset preview.
pub const PREVIEW_ROWS: usize = 5;

/// Entries kept by the product rankings.
pub const TOP_N: usize = 10;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(transparent)]
    InvalidMonth(#[from] ParseYearMonthError),
}

/// Headline metrics of the Home page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesSummary {
    pub total_sales: f64,
    pub total_orders: usize,
    pub avg_order_value: f64,
}

/// One entry of a ranking or a keyed total.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    pub name: String,
    pub value: f64,
}

/// Dense Region × State matrix of summed sales.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `values[row][column]`, 0 where no record exists.
    pub values: Vec<Vec<f64>>,
}

/// First rows of a table rendered as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Computes the aggregates the pages display.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Total sales, distinct orders and average order value.
    pub fn summary(table: &SalesTable) -> Result<SalesSummary, StatsError> {
        let df = table.frame();
        let total_sales = df.column(SALES)?.f64()?.sum().unwrap_or(0.0);
        let total_orders = df
            .column(ORDER_ID)?
            .as_materialized_series()
            .drop_nulls()
            .n_unique()?;

        Ok(SalesSummary {
            total_sales,
            total_orders,
            avg_order_value: Self::average_order_value(total_sales, total_orders),
        })
    }

    /// Sales per order, 0 when there are no orders.
    pub fn average_order_value(total_sales: f64, total_orders: usize) -> f64 {
        if total_orders > 0 {
            total_sales / total_orders as f64
        } else {
            0.0
        }
    }

    /// Summed sales per month in chronological order. Empty months are absent.
    pub fn monthly_sales(table: &SalesTable) -> Result<Vec<(YearMonth, f64)>, StatsError> {
        let grouped = table
            .frame()
            .clone()
            .lazy()
            .group_by([col(MONTH)])
            .agg([col(SALES).sum()])
            .collect()?;

        let months = string_values(&grouped, MONTH)?;
        let sales = f64_values(&grouped, SALES)?;

        let mut series = months
            .iter()
            .zip(sales)
            .map(|(month, total)| -> Result<_, StatsError> {
                Ok((month.parse::<YearMonth>()?, total))
            })
            .collect::<Result<Vec<_>, StatsError>>()?;
        series.sort_by_key(|(month, _)| *month);
        Ok(series)
    }

    /// Sub-categories ranked by summed sales.
    pub fn top_by_sales(table: &SalesTable, n: usize) -> Result<Vec<RankedItem>, StatsError> {
        Self::top_sub_categories(table, SALES, n)
    }

    /// Sub-categories ranked by summed quantity.
    pub fn top_by_quantity(table: &SalesTable, n: usize) -> Result<Vec<RankedItem>, StatsError> {
        Self::top_sub_categories(table, QUANTITY, n)
    }

    /// Rank sub-categories by a summed column, descending.
    ///
    /// Equal totals come out in alphabetical order of sub-category.
    fn top_sub_categories(
        table: &SalesTable,
        value_col: &str,
        n: usize,
    ) -> Result<Vec<RankedItem>, StatsError> {
        let ranked = table
            .frame()
            .clone()
            .lazy()
            .filter(col(SUB_CATEGORY).is_not_null())
            .group_by([col(SUB_CATEGORY)])
            .agg([col(value_col).sum().cast(DataType::Float64)])
            .sort(
                [value_col, SUB_CATEGORY],
                SortMultipleOptions::default()
                    .with_order_descending_multi([true, false])
                    .with_maintain_order(true),
            )
            .limit(n as IdxSize)
            .collect()?;

        let names = string_values(&ranked, SUB_CATEGORY)?;
        let values = f64_values(&ranked, value_col)?;
        Ok(names
            .into_iter()
            .zip(values)
            .map(|(name, value)| RankedItem { name, value })
            .collect())
    }

    /// Region × State sales with every missing combination filled with 0.
    ///
    /// Rows and columns are sorted alphabetically.
    pub fn region_state_matrix(table: &SalesTable) -> Result<SalesMatrix, StatsError> {
        let grouped = table
            .frame()
            .clone()
            .lazy()
            .filter(col(REGION).is_not_null().and(col(STATE).is_not_null()))
            .group_by([col(REGION), col(STATE)])
            .agg([col(SALES).sum()])
            .collect()?;

        let regions = string_values(&grouped, REGION)?;
        let states = string_values(&grouped, STATE)?;
        let sales = f64_values(&grouped, SALES)?;

        let rows: Vec<String> = regions.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let columns: Vec<String> = states.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let row_index: HashMap<&str, usize> =
            rows.iter().enumerate().map(|(i, r)| (r.as_str(), i)).collect();
        let col_index: HashMap<&str, usize> =
            columns.iter().enumerate().map(|(i, c)| (c.as_str(), i)).collect();

        let mut values = vec![vec![0.0; columns.len()]; rows.len()];
        for ((region, state), total) in regions.iter().zip(&states).zip(sales) {
            let r = row_index[region.as_str()];
            let c = col_index[state.as_str()];
            values[r][c] = total;
        }

        Ok(SalesMatrix {
            rows,
            columns,
            values,
        })
    }

    /// Summed sales per state, sorted by state. Only states with records appear.
    pub fn state_totals(table: &SalesTable) -> Result<Vec<RankedItem>, StatsError> {
        Self::totals_by(table, STATE)
    }

    /// Summed sales per region, sorted by region.
    pub fn region_totals(table: &SalesTable) -> Result<Vec<RankedItem>, StatsError> {
        Self::totals_by(table, REGION)
    }

    fn totals_by(table: &SalesTable, key: &str) -> Result<Vec<RankedItem>, StatsError> {
        let grouped = table
            .frame()
            .clone()
            .lazy()
            .filter(col(key).is_not_null())
            .group_by([col(key)])
            .agg([col(SALES).sum()])
            .sort([key], SortMultipleOptions::default())
            .collect()?;

        let names = string_values(&grouped, key)?;
        let values = f64_values(&grouped, SALES)?;
        Ok(names
            .into_iter()
            .zip(values)
            .map(|(name, value)| RankedItem { name, value })
            .collect())
    }

    /// First `n` rows, every column, as display strings.
    pub fn preview(table: &SalesTable, n: usize) -> Result<PreviewTable, StatsError> {
        let head = table.frame().head(Some(n));
        let columns = head
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = Vec::with_capacity(head.height());
        for i in 0..head.height() {
            let row = head
                .get_columns()
                .iter()
                .map(|column| column.get(i).map(|v| display_value(&v)))
                .collect::<PolarsResult<Vec<String>>>()?;
            rows.push(row);
        }

        Ok(PreviewTable { columns, rows })
    }
}

fn display_value(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string().trim_matches('"').to_string(),
    }
}

fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    Ok(df
        .column(name)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{sample_table, Row};

    fn cell(matrix: &SalesMatrix, row: &str, column: &str) -> Option<f64> {
        let r = matrix.rows.iter().position(|v| v == row)?;
        let c = matrix.columns.iter().position(|v| v == column)?;
        Some(matrix.values[r][c])
    }

    #[test]
    fn single_order_summary() {
        let table = sample_table(&[
            Row::new("A1", "01/02/2023", "West", "California", "Chairs", 100.0, 1),
            Row::new("A1", "01/02/2023", "West", "California", "Tables", 200.0, 1),
            Row::new("A1", "01/02/2023", "West", "California", "Phones", 50.0, 1),
        ]);
        let summary = SalesAggregator::summary(&table).unwrap();
        assert_eq!(summary.total_sales, 350.0);
        assert_eq!(summary.total_orders, 1);
        assert!((summary.avg_order_value - 350.0).abs() < 1e-9);
    }

    #[test]
    fn average_order_value_divides_by_distinct_orders() {
        let table = sample_table(&[
            Row::new("A1", "01/02/2023", "West", "California", "Chairs", 100.0, 1),
            Row::new("A2", "01/02/2023", "West", "California", "Tables", 200.0, 1),
            Row::new("A2", "01/02/2023", "West", "California", "Phones", 60.0, 1),
        ]);
        let summary = SalesAggregator::summary(&table).unwrap();
        assert_eq!(summary.total_orders, 2);
        assert!((summary.avg_order_value - 180.0).abs() < 1e-9);
    }

    #[test]
    fn empty_table_has_zero_average() {
        let table = sample_table(&[]);
        let summary = SalesAggregator::summary(&table).unwrap();
        assert_eq!(summary.total_sales, 0.0);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.avg_order_value, 0.0);
        assert_eq!(SalesAggregator::average_order_value(125.0, 0), 0.0);
    }

    #[test]
    fn monthly_sales_skip_empty_months() {
        let table = sample_table(&[
            Row::new("A1", "15/03/2023", "West", "California", "Chairs", 50.0, 1),
            Row::new("A2", "10/01/2023", "West", "California", "Chairs", 60.0, 1),
            Row::new("A3", "20/01/2023", "East", "New York", "Chairs", 40.0, 1),
        ]);
        let series = SalesAggregator::monthly_sales(&table).unwrap();
        let labels: Vec<(String, f64)> = series
            .iter()
            .map(|(month, total)| (month.to_string(), *total))
            .collect();
        assert_eq!(
            labels,
            [("2023-01".to_string(), 100.0), ("2023-03".to_string(), 50.0)]
        );
    }

    #[test]
    fn monthly_sales_cross_year_boundaries_in_order() {
        let table = sample_table(&[
            Row::new("A1", "02/01/2024", "West", "California", "Chairs", 1.0, 1),
            Row::new("A2", "02/12/2023", "West", "California", "Chairs", 2.0, 1),
            Row::new("A3", "02/02/2023", "West", "California", "Chairs", 3.0, 1),
        ]);
        let months: Vec<String> = SalesAggregator::monthly_sales(&table)
            .unwrap()
            .iter()
            .map(|(m, _)| m.to_string())
            .collect();
        assert_eq!(months, ["2023-02", "2023-12", "2024-01"]);
    }

    fn many_sub_categories() -> Vec<Row> {
        const NAMES: [&str; 12] = [
            "Art", "Binders", "Chairs", "Copiers", "Envelopes", "Fasteners", "Labels", "Machines",
            "Paper", "Phones", "Storage", "Tables",
        ];
        NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Row::new(
                    "A1",
                    "01/01/2020",
                    "West",
                    "California",
                    name,
                    (i as f64 + 1.0) * 10.0,
                    (12 - i) as i64,
                )
            })
            .collect()
    }

    #[test]
    fn rankings_are_descending_and_capped() {
        let table = sample_table(&many_sub_categories());

        let by_sales = SalesAggregator::top_by_sales(&table, TOP_N).unwrap();
        assert_eq!(by_sales.len(), TOP_N);
        assert!(by_sales.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(by_sales[0].name, "Tables");
        assert_eq!(by_sales[0].value, 120.0);

        let by_quantity = SalesAggregator::top_by_quantity(&table, TOP_N).unwrap();
        assert_eq!(by_quantity.len(), TOP_N);
        assert!(by_quantity.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(by_quantity[0].name, "Art");
        assert_eq!(by_quantity[0].value, 12.0);
    }

    #[test]
    fn ranking_sums_line_items_and_orders_ties_by_name() {
        let table = sample_table(&[
            Row::new("A1", "01/01/2020", "West", "California", "Phones", 30.0, 2),
            Row::new("A2", "01/01/2020", "West", "California", "Chairs", 50.0, 5),
            Row::new("A3", "01/01/2020", "West", "California", "Phones", 20.0, 3),
            Row::new("A4", "01/01/2020", "West", "California", "Binders", 10.0, 1),
        ]);
        let by_sales = SalesAggregator::top_by_sales(&table, TOP_N).unwrap();
        let names: Vec<&str> = by_sales.iter().map(|r| r.name.as_str()).collect();
        // Phones and Chairs tie at 50
        assert_eq!(names, ["Chairs", "Phones", "Binders"]);

        let by_quantity = SalesAggregator::top_by_quantity(&table, TOP_N).unwrap();
        let names: Vec<&str> = by_quantity.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Chairs", "Phones", "Binders"]);
    }

    #[test]
    fn tied_rankings_ignore_row_order() {
        let table = sample_table(&[
            Row::new("A1", "01/01/2020", "West", "California", "Phones", 50.0, 4),
            Row::new("A2", "01/01/2020", "West", "California", "Chairs", 50.0, 4),
            Row::new("A3", "01/01/2020", "West", "California", "Binders", 50.0, 4),
        ]);
        let by_sales = SalesAggregator::top_by_sales(&table, TOP_N).unwrap();
        let names: Vec<&str> = by_sales.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Binders", "Chairs", "Phones"]);

        let by_quantity = SalesAggregator::top_by_quantity(&table, 2).unwrap();
        let names: Vec<&str> = by_quantity.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Binders", "Chairs"]);
    }

    #[test]
    fn region_state_matrix_is_dense() {
        let table = sample_table(&[
            Row::new("A1", "01/01/2020", "West", "California", "Chairs", 100.0, 1),
            Row::new("A2", "01/01/2020", "West", "California", "Chairs", 20.0, 1),
            Row::new("A3", "01/01/2020", "East", "New York", "Chairs", 70.0, 1),
            Row::new("A4", "01/01/2020", "Central", "Texas", "Chairs", 30.0, 1),
        ]);
        let matrix = SalesAggregator::region_state_matrix(&table).unwrap();
        assert_eq!(matrix.rows, ["Central", "East", "West"]);
        assert_eq!(matrix.columns, ["California", "New York", "Texas"]);
        assert!(matrix.values.iter().all(|row| row.len() == matrix.columns.len()));
        assert_eq!(cell(&matrix, "West", "California"), Some(120.0));
        assert_eq!(cell(&matrix, "West", "Texas"), Some(0.0));
        assert_eq!(cell(&matrix, "East", "California"), Some(0.0));
        assert!(matrix.values.iter().flatten().all(|v| *v <= 120.0));
    }

    #[test]
    fn state_and_region_totals_are_sorted_by_key() {
        let table = sample_table(&[
            Row::new("A1", "01/01/2020", "West", "Washington", "Chairs", 5.0, 1),
            Row::new("A2", "01/01/2020", "West", "California", "Chairs", 7.0, 1),
            Row::new("A3", "01/01/2020", "East", "California", "Chairs", 1.0, 1),
        ]);
        let states = SalesAggregator::state_totals(&table).unwrap();
        assert_eq!(
            states,
            [
                RankedItem { name: "California".into(), value: 8.0 },
                RankedItem { name: "Washington".into(), value: 5.0 },
            ]
        );
        let regions = SalesAggregator::region_totals(&table).unwrap();
        assert_eq!(regions[0].name, "East");
        assert_eq!(regions[1].value, 12.0);
    }

    #[test]
    fn preview_shows_first_rows_of_every_column() {
        let table = sample_table(&many_sub_categories());
        let preview = SalesAggregator::preview(&table, PREVIEW_ROWS).unwrap();
        assert_eq!(preview.rows.len(), PREVIEW_ROWS);
        assert_eq!(preview.columns.len(), table.frame().width());
        let date_idx = preview.columns.iter().position(|c| c == "Order Date").unwrap();
        assert_eq!(preview.rows[0][date_idx], "2020-01-01");
        let cat_idx = preview.columns.iter().position(|c| c == "Sub-Category").unwrap();
        assert_eq!(preview.rows[1][cat_idx], "Binders");
    }
}
