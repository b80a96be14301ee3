//! Sales Table Schema
//! Column names of the order CSV and the date fields derived from `Order Date`.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const ORDER_ID: &str = "Order ID";
pub const ORDER_DATE: &str = "Order Date";
pub const REGION: &str = "Region";
pub const STATE: &str = "State";
pub const SUB_CATEGORY: &str = "Sub-Category";
pub const SALES: &str = "Sales";
pub const QUANTITY: &str = "Quantity";

// Derived at load time
pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";

/// Columns every input CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    ORDER_ID,
    ORDER_DATE,
    REGION,
    STATE,
    SUB_CATEGORY,
    SALES,
    QUANTITY,
];

/// Day/month/year, e.g. `08/11/2016`.
pub const ORDER_DATE_FORMAT: &str = "%d/%m/%Y";

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parse an `Order Date` cell.
pub fn parse_order_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), ORDER_DATE_FORMAT)
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid year-month '{0}', expected YYYY-MM")]
pub struct ParseYearMonthError(pub String);

/// Calendar month of a given year. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseYearMonthError(s.to_string());
        // Split on the last dash so negative years survive a round trip
        let (year, month) = s.trim().rsplit_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        Self::new(year, month).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_month_year() {
        let date = parse_order_date("08/11/2016").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2016, 11, 8).unwrap());

        let ym = YearMonth::from_date(date);
        assert_eq!(ym, YearMonth::new(2016, 11).unwrap());
        assert_eq!(ym.to_string(), "2016-11");
    }

    #[test]
    fn derived_fields_follow_the_calendar_date() {
        for (raw, year, month) in [
            ("01/01/2015", 2015, 1),
            ("31/12/2018", 2018, 12),
            ("29/02/2016", 2016, 2),
            (" 15/07/2017 ", 2017, 7),
        ] {
            let date = parse_order_date(raw).unwrap();
            assert_eq!(date.year(), year, "{raw}");
            assert_eq!(YearMonth::from_date(date), YearMonth::new(year, month).unwrap());
        }
    }

    #[test]
    fn rejects_other_date_layouts() {
        assert!(parse_order_date("2016-11-08").is_err());
        assert!(parse_order_date("31/02/2017").is_err());
        assert!(parse_order_date("13/13/2017").is_err());
        assert!(parse_order_date("").is_err());
    }

    #[test]
    fn epoch_offset() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(days_since_epoch(epoch), 0);
        let next = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(days_since_epoch(next), 1);
    }

    #[test]
    fn year_month_orders_chronologically() {
        let mut months: Vec<YearMonth> = ["2023-10", "2022-12", "2023-02"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        months.sort();
        let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, ["2022-12", "2023-02", "2023-10"]);
    }

    #[test]
    fn year_month_rejects_garbage() {
        assert!("2023".parse::<YearMonth>().is_err());
        assert!("2023-13".parse::<YearMonth>().is_err());
        assert!("abcd-01".parse::<YearMonth>().is_err());
        assert!(YearMonth::new(2023, 0).is_none());
    }
}
