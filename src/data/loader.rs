//! CSV Data Loader Module
//! Loads the order CSV with Polars, derives Year/Month and memoizes the result per path.

use super::schema::{
    days_since_epoch, parse_order_date, YearMonth, MONTH, ORDER_DATE, ORDER_ID, QUANTITY,
    REGION, REQUIRED_COLUMNS, SALES, STATE, SUB_CATEGORY, YEAR,
};
use chrono::Datelike;
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Record {record}: invalid Order Date '{value}' (expected DD/MM/YYYY)")]
    DateParse { record: usize, value: String },
}

/// Immutable handle to a table of order records.
///
/// Cloning is cheap: every clone shares the same frame. Filters and aggregates
/// always build new frames, the shared one is never mutated.
#[derive(Clone)]
pub struct SalesTable {
    df: Arc<DataFrame>,
}

impl SalesTable {
    /// Wrap a frame that already has the derived columns.
    pub(crate) fn from_prepared(df: DataFrame) -> Self {
        Self { df: Arc::new(df) }
    }

    /// Cast the required columns, parse `Order Date` and derive `Year`/`Month`.
    ///
    /// Columns outside the schema are kept as read. A `Sales` or `Quantity`
    /// value that is not numeric fails the conversion.
    pub fn from_raw(raw: DataFrame) -> Result<Self, LoaderError> {
        for name in REQUIRED_COLUMNS {
            if raw.get_column_index(name).is_none() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }

        let mut df = raw
            .lazy()
            .with_columns([
                col(ORDER_ID).cast(DataType::String),
                col(ORDER_DATE).cast(DataType::String),
                col(REGION).cast(DataType::String),
                col(STATE).cast(DataType::String),
                col(SUB_CATEGORY).cast(DataType::String),
                col(SALES).strict_cast(DataType::Float64),
                col(QUANTITY).strict_cast(DataType::Int64),
            ])
            .collect()?;

        let height = df.height();
        let mut days: Vec<i32> = Vec::with_capacity(height);
        let mut years: Vec<i32> = Vec::with_capacity(height);
        let mut months: Vec<String> = Vec::with_capacity(height);

        {
            let dates = df.column(ORDER_DATE)?.str()?;
            for (idx, value) in dates.into_iter().enumerate() {
                let raw_value = value.unwrap_or_default();
                let date = parse_order_date(raw_value).map_err(|_| LoaderError::DateParse {
                    record: idx + 1,
                    value: raw_value.to_string(),
                })?;
                days.push(days_since_epoch(date));
                years.push(date.year());
                months.push(YearMonth::from_date(date).to_string());
            }
        }

        let order_dates = Column::new(ORDER_DATE.into(), days).cast(&DataType::Date)?;
        df.with_column(order_dates)?;
        df.with_column(Column::new(YEAR.into(), years))?;
        df.with_column(Column::new(MONTH.into(), months))?;

        Ok(Self::from_prepared(df))
    }

    /// Get a reference to the underlying DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Get the number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Sorted distinct years present in the data.
    pub fn years(&self) -> PolarsResult<Vec<i32>> {
        let years: BTreeSet<i32> = self.df.column(YEAR)?.i32()?.into_iter().flatten().collect();
        Ok(years.into_iter().collect())
    }

    /// Sorted distinct regions present in the data.
    pub fn regions(&self) -> PolarsResult<Vec<String>> {
        let regions: BTreeSet<String> = self
            .df
            .column(REGION)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        Ok(regions.into_iter().collect())
    }
}

/// Loads order CSVs with Polars and keeps every loaded table for the process lifetime.
#[derive(Default)]
pub struct DataLoader {
    cache: HashMap<PathBuf, SalesTable>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a CSV file, returning the cached table when this path was loaded before.
    pub fn load(&mut self, path: &Path) -> Result<SalesTable, LoaderError> {
        if let Some(table) = self.cache.get(path) {
            debug!(path = %path.display(), "sales table cache hit");
            return Ok(table.clone());
        }

        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        info!(path = %path.display(), "reading sales CSV");
        let raw = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let table = SalesTable::from_raw(raw)?;
        info!(
            path = %path.display(),
            rows = table.height(),
            columns = table.frame().width(),
            "sales table loaded"
        );

        self.cache.insert(path.to_path_buf(), table.clone());
        Ok(table)
    }

    /// Number of distinct paths held in the cache.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
