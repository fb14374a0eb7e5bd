//! Raw metric values to display and ranking values.
//!
//! The display value is what the user reads; the ranking value is what the
//! color scale and the top-K selection order by. Currency values are
//! log-compressed for ranking so a handful of very large markets do not wash
//! out the rest of the map.

use aex_metrics::Unit;
use aex_resolve::AnchorEntity;
use serde::Serialize;

/// Note attached to entities without a value.
pub const NO_DATA_NOTE: &str = "No Data";

/// Why an entity has, or lacks, a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFlag {
    Present,
    Missing,
    /// The anchor entity, which never carries metric data.
    AnchorExcluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transformed {
    pub display_value: Option<f64>,
    pub ranking_value: Option<f64>,
    pub flag: DataFlag,
}

impl Transformed {
    pub const MISSING: Transformed = Transformed {
        display_value: None,
        ranking_value: None,
        flag: DataFlag::Missing,
    };

    pub const ANCHOR_EXCLUDED: Transformed = Transformed {
        display_value: None,
        ranking_value: None,
        flag: DataFlag::AnchorExcluded,
    };

    /// Hover note for this value.
    pub fn note(&self, anchor: &AnchorEntity) -> String {
        match self.flag {
            DataFlag::Present => String::new(),
            DataFlag::Missing => NO_DATA_NOTE.to_string(),
            DataFlag::AnchorExcluded => anchor.note.clone(),
        }
    }
}

/// Transform a raw value under the given unit.
///
/// For currency units the ranking value is `ln(1 + raw)` when `raw > 0`
/// and missing otherwise: zero or negative exports carry no rank. Shares
/// rank by their raw value.
pub fn transform(raw_value: Option<f64>, unit: Unit) -> Transformed {
    let Some(raw) = raw_value.filter(|v| v.is_finite()) else {
        return Transformed::MISSING;
    };
    let ranking_value = if unit.is_log_compressed() {
        (raw > 0.0).then(|| raw.ln_1p())
    } else {
        Some(raw)
    };
    Transformed {
        display_value: Some(raw),
        ranking_value,
        flag: DataFlag::Present,
    }
}

/// Transform the value of a named active entity, applying the anchor policy.
pub fn transform_entity(
    name: &str,
    raw_value: Option<f64>,
    unit: Unit,
    anchor: &AnchorEntity,
) -> Transformed {
    if anchor.is_anchor(name) {
        return Transformed::ANCHOR_EXCLUDED;
    }
    transform(raw_value, unit)
}

/// A transformed value for one active boundary entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityValue {
    pub name: String,
    pub value: Transformed,
}
