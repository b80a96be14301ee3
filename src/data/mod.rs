//! Data module - CSV loading and filtering

mod filter;
mod loader;
pub mod schema;

pub use filter::{filter_records, Selection};
pub use loader::{DataLoader, LoaderError, SalesTable};
