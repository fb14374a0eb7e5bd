use crate::selection::Selection;
use aex_data::{DataFlag, Gradient, TopEntry};
use aex_metrics::Unit;
use serde::Serialize;

/// Display state of one boundary feature on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturePayload {
    pub name: String,
    pub entity_key: Option<String>,
    pub boundary_index: usize,
    pub display_value: Option<f64>,
    pub note: String,
    pub color: String,
    pub flag: DataFlag,
}

/// The color scale legend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScalePayload {
    pub title: String,
    pub gradient: Gradient,
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopKPayload {
    pub title: String,
    pub entries: Vec<TopEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedValue {
    pub timestamp: String,
    pub display_value: Option<f64>,
}

/// Time series of the selected entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesPayload {
    pub entity: Option<String>,
    pub title: String,
    pub points: Vec<TimedValue>,
    pub latest: Option<f64>,
}

/// Everything the presentation layer needs for one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewPayload {
    pub title: String,
    pub selection: Selection,
    pub features: Vec<FeaturePayload>,
    pub scale: ScalePayload,
    pub top_k: TopKPayload,
    pub series: SeriesPayload,
}

pub fn map_title(category: &str, unit: Unit) -> String {
    format!("Automobile Exports by Country ({}, {})", category, unit)
}

pub fn scale_title(category: &str, unit: Unit) -> String {
    format!("Exports ({}, {})", category, unit)
}

pub fn top_k_title(k: usize, category: &str, unit: Unit) -> String {
    format!("Top {} destinations, {}, {}", k, category, unit)
}

pub fn series_title(entity: &str, category: &str, unit: Unit) -> String {
    format!("{}: {}, {}", entity, category, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(
            map_title("Total", Unit::UsdMillions),
            "Automobile Exports by Country (Total, USD m)"
        );
        assert_eq!(scale_title("EV", Unit::ShareOfTotal), "Exports (EV, % of total)");
        assert_eq!(
            top_k_title(15, "Total", Unit::UsdMillions),
            "Top 15 destinations, Total, USD m"
        );
        assert_eq!(
            series_title("Japan", "Total", Unit::UsdMillions),
            "Japan: Total, USD m"
        );
    }

    #[test]
    fn test_feature_serializes_flag_snake_case() {
        let feature = FeaturePayload {
            name: "China".to_string(),
            entity_key: None,
            boundary_index: 0,
            display_value: None,
            note: "Exporter (no data)".to_string(),
            color: "#bbbbbb".to_string(),
            flag: DataFlag::AnchorExcluded,
        };
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["flag"], "anchor_excluded");
        assert_eq!(json["display_value"], serde_json::Value::Null);
    }
}
