//! Metric table for auto export time series.
//!
//! The metric source is a wide table whose columns encode
//! `(category, entity, unit)`. This crate parses those headers into an
//! immutable [`MetricTable`] that answers "latest value" and "trailing
//! series" lookups. A missing column is an absent value, never an error.

pub mod column;
mod loader;
pub mod table;
pub mod unit;

pub use table::{MetricTable, SeriesPoint};
pub use unit::Unit;
