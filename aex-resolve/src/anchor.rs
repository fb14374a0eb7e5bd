use serde::{Deserialize, Serialize};

pub const DEFAULT_ANCHOR_NAME: &str = "China";
pub const DEFAULT_ANCHOR_COLOR: &str = "#bbbbbb";
pub const DEFAULT_ANCHOR_NOTE: &str = "Exporter (no data)";

/// The reporting entity whose exports the metric source describes.
///
/// It is always shown on the map, never carries metric data of its own,
/// never competes for top-K or the palette range, and is painted with a
/// fixed color. The resolver, the value transform and the color engine all
/// consult this one policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorEntity {
    /// Boundary name identifying the anchor.
    pub name: String,
    /// Fixed hex color of the anchor.
    pub color: String,
    /// Note shown for the anchor instead of a value.
    pub note: String,
}

impl AnchorEntity {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn is_anchor(&self, boundary_name: &str) -> bool {
        self.name == boundary_name
    }
}

impl Default for AnchorEntity {
    fn default() -> Self {
        Self {
            name: DEFAULT_ANCHOR_NAME.to_string(),
            color: DEFAULT_ANCHOR_COLOR.to_string(),
            note: DEFAULT_ANCHOR_NOTE.to_string(),
        }
    }
}
