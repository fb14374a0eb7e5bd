use crate::column::{is_timestamp_column, parse_column, ColumnId};
use crate::unit::Unit;
use aex_utils::cells::parse_cell;
use aex_utils::dates::parse_timestamp;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// A single (timestamp, value) pair of a metric series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: String,
    pub value: Option<f64>,
}

/// Immutable lookup over `entity -> category -> unit -> series`.
///
/// Values are stored column-major: one vector per metric column, aligned
/// with `timestamps`. Rows are in time order.
#[derive(Debug, Clone, Default)]
pub struct MetricTable {
    timestamps: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
    index: HashMap<String, HashMap<String, HashMap<Unit, usize>>>,
    entity_keys: Vec<String>,
    categories: BTreeSet<String>,
    units: BTreeSet<Unit>,
}

impl MetricTable {
    /// Build the table from source headers and raw text rows.
    ///
    /// Headers outside the metric naming pattern are ignored, except the
    /// first one mentioning "date", which labels each row. Without such a
    /// column the source row index is used as the label. When a metric
    /// column appears twice the later one wins.
    pub fn build<H: AsRef<str>, C: AsRef<str>>(headers: &[H], rows: &[Vec<C>]) -> MetricTable {
        let mut table = MetricTable::default();
        let mut sources: Vec<usize> = Vec::new();
        let mut timestamp_idx = None;
        let mut ignored = 0u32;

        for (i, header) in headers.iter().enumerate() {
            let header = header.as_ref().trim();
            match parse_column(header) {
                Some(id) => table.register(id, i, &mut sources),
                None if timestamp_idx.is_none() && is_timestamp_column(header) => {
                    timestamp_idx = Some(i)
                }
                None => ignored += 1,
            }
        }

        let order = row_order(rows, timestamp_idx);
        table.timestamps = order
            .iter()
            .map(|&r| match timestamp_idx.and_then(|ts| rows[r].get(ts)) {
                Some(cell) => cell.as_ref().trim().to_string(),
                None => r.to_string(),
            })
            .collect();
        table.columns = sources
            .iter()
            .map(|&src| {
                order
                    .iter()
                    .map(|&r| rows[r].get(src).and_then(|cell| parse_cell(cell.as_ref())))
                    .collect()
            })
            .collect();

        log::info!(
            "metric table: {} metric columns, {} entities, {} rows, {} columns ignored",
            table.columns.len(),
            table.entity_keys.len(),
            table.timestamps.len(),
            ignored
        );
        table
    }

    fn register(&mut self, id: ColumnId, source: usize, sources: &mut Vec<usize>) {
        let ColumnId {
            category,
            entity,
            unit,
        } = id;
        if !self.index.contains_key(&entity) {
            self.entity_keys.push(entity.clone());
        }
        self.categories.insert(category.clone());
        self.units.insert(unit);

        let by_unit = self
            .index
            .entry(entity)
            .or_default()
            .entry(category)
            .or_default();
        match by_unit.get(&unit) {
            Some(&existing) => {
                log::warn!(
                    "metric table: duplicate metric column at position {}, replacing position {}",
                    source,
                    sources[existing]
                );
                sources[existing] = source;
            }
            None => {
                by_unit.insert(unit, sources.len());
                sources.push(source);
            }
        }
    }

    fn column(&self, entity: &str, category: &str, unit: Unit) -> Option<&[Option<f64>]> {
        let idx = *self.index.get(entity)?.get(category)?.get(&unit)?;
        self.columns.get(idx).map(Vec::as_slice)
    }

    /// True if the source defines a column for this (entity, category, unit).
    pub fn has_metric(&self, entity: &str, category: &str, unit: Unit) -> bool {
        self.column(entity, category, unit).is_some()
    }

    /// Value of the most recent row, or `None` if the column is absent or
    /// the last value is null.
    pub fn latest(&self, entity: &str, category: &str, unit: Unit) -> Option<f64> {
        self.column(entity, category, unit)?.last().copied().flatten()
    }

    /// The last `last_n` points of a series, oldest first. Empty if the
    /// column does not exist.
    pub fn series(
        &self,
        entity: &str,
        category: &str,
        unit: Unit,
        last_n: usize,
    ) -> Vec<SeriesPoint> {
        let Some(values) = self.column(entity, category, unit) else {
            return Vec::new();
        };
        let start = values.len().saturating_sub(last_n);
        self.timestamps[start..]
            .iter()
            .zip(&values[start..])
            .map(|(timestamp, value)| SeriesPoint {
                timestamp: timestamp.clone(),
                value: *value,
            })
            .collect()
    }

    /// Entity keys in the order their first column appears in the source.
    pub fn entity_keys(&self) -> &[String] {
        &self.entity_keys
    }

    /// Observed categories, sorted.
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Observed units, sorted.
    pub fn units(&self) -> &BTreeSet<Unit> {
        &self.units
    }

    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    pub fn default_category(&self) -> Option<&str> {
        self.categories.iter().next().map(String::as_str)
    }

    pub fn default_unit(&self) -> Option<Unit> {
        self.units.iter().next().copied()
    }
}

/// Row permutation putting the source in time order. Rows are sorted
/// (stably) only when every timestamp parses as a date.
fn row_order<C: AsRef<str>>(rows: &[Vec<C>], timestamp_idx: Option<usize>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(ts) = timestamp_idx else {
        return order;
    };
    let dates: Option<Vec<NaiveDate>> = rows
        .iter()
        .map(|row| row.get(ts).and_then(|cell| parse_timestamp(cell.as_ref()).ok()))
        .collect();
    match dates {
        Some(dates) => order.sort_by_key(|&r| dates[r]),
        None => log::warn!("metric table: timestamps are not all dates, keeping source row order"),
    }
    order
}
