//! CSV loading for the metric source.
//!
//! The source is a wide table: one timestamp column plus one column per
//! (category, entity, unit) metric, e.g.
//!
//! ```text
//! Date,"Exports, Autos, Total, Germany, USD m","Exports, Autos, Total, Germany, % of total"
//! 2024-01-31,812.4,6.1
//! ```

use crate::table::MetricTable;
use std::io::Read;

impl MetricTable {
    /// Load the metric table from a CSV string (with headers).
    pub fn from_csv_str(csv_data: &str) -> anyhow::Result<MetricTable> {
        MetricTable::from_reader(csv_data.as_bytes())
    }

    /// Load the metric table from any CSV reader (with headers).
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<MetricTable> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        log::info!(
            "loader: read {} rows x {} columns from metric source",
            rows.len(),
            headers.len()
        );
        Ok(MetricTable::build(&headers, &rows))
    }
}
