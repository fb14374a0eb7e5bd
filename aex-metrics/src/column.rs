//! Column header parsing for the metric source.
//!
//! Metric columns are named `"Exports, Autos, <Category>, <EntityName>, <Unit>"`.
//! The category is a single word, the entity name may itself contain commas
//! (e.g. "Korea, Rep."), and the unit is one of the [`Unit`] labels.

use crate::unit::Unit;
use once_cell::sync::Lazy;
use regex::Regex;

static METRIC_COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Exports, Autos, (\w+), (.*?), (USD m|% of total)").unwrap()
});

static TIMESTAMP_COLUMN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)date").unwrap());

/// The (category, entity, unit) triple encoded in a metric column header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnId {
    pub category: String,
    pub entity: String,
    pub unit: Unit,
}

/// Parse a column header, returning `None` for columns outside the pattern.
pub fn parse_column(header: &str) -> Option<ColumnId> {
    let caps = METRIC_COLUMN_RE.captures(header)?;
    let unit = Unit::from_label(caps.get(3)?.as_str())?;
    Some(ColumnId {
        category: caps.get(1)?.as_str().to_string(),
        entity: caps.get(2)?.as_str().to_string(),
        unit,
    })
}

/// True if the header names the per-row timestamp column.
pub fn is_timestamp_column(header: &str) -> bool {
    TIMESTAMP_COLUMN_RE.is_match(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency_column() {
        let id = parse_column("Exports, Autos, Total, China, USD m").unwrap();
        assert_eq!(id.category, "Total");
        assert_eq!(id.entity, "China");
        assert_eq!(id.unit, Unit::UsdMillions);
    }

    #[test]
    fn test_parse_share_column() {
        let id = parse_column("Exports, Autos, EV, Germany, % of total").unwrap();
        assert_eq!(id.category, "EV");
        assert_eq!(id.entity, "Germany");
        assert_eq!(id.unit, Unit::ShareOfTotal);
    }

    #[test]
    fn test_entity_with_comma() {
        let id = parse_column("Exports, Autos, Total, Korea, Rep., USD m").unwrap();
        assert_eq!(id.entity, "Korea, Rep.");
    }

    #[test]
    fn test_non_matching_columns_ignored() {
        assert!(parse_column("Date").is_none());
        assert!(parse_column("Imports, Autos, Total, China, USD m").is_none());
        assert!(parse_column("Exports, Autos, Total, China, EUR m").is_none());
        assert!(parse_column("Exports, Autos, Passenger cars, China, USD m").is_none());
    }

    #[test]
    fn test_timestamp_column_detection() {
        assert!(is_timestamp_column("Date"));
        assert!(is_timestamp_column("report_date"));
        assert!(is_timestamp_column("DATE"));
        assert!(!is_timestamp_column("Exports, Autos, Total, China, USD m"));
    }
}
