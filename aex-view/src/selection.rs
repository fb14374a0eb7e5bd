use aex_metrics::{MetricTable, Unit};
use serde::{Deserialize, Serialize};

/// Whether the top-K subset is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    Off,
    TopK,
}

/// The user's current choice of metric and entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub category: String,
    pub unit: Unit,
    /// Boundary name of the entity whose time series is shown.
    pub entity: Option<String>,
    pub highlight: Highlight,
}

/// A discrete user action on the selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    Category { category: String },
    Unit { unit: Unit },
    Entity { entity: Option<String> },
    HighlightTopK,
    ClearHighlight,
    /// Re-run the recomputation with the selection unchanged.
    Refresh,
}

impl Selection {
    /// First category and first unit in sorted order, no entity, no highlight.
    pub fn initial(table: &MetricTable) -> Selection {
        Selection {
            category: table.default_category().unwrap_or_default().to_string(),
            unit: table.default_unit().unwrap_or_default(),
            entity: None,
            highlight: Highlight::Off,
        }
    }

    /// The selection after `event`.
    pub fn apply(&self, event: &SelectionEvent) -> Selection {
        let mut next = self.clone();
        match event {
            SelectionEvent::Category { category } => next.category = category.clone(),
            SelectionEvent::Unit { unit } => next.unit = *unit,
            SelectionEvent::Entity { entity } => next.entity = entity.clone(),
            SelectionEvent::HighlightTopK => next.highlight = Highlight::TopK,
            SelectionEvent::ClearHighlight => next.highlight = Highlight::Off,
            SelectionEvent::Refresh => {}
        }
        next
    }

    /// The part of the selection the time series depends on.
    pub(crate) fn series_key(&self) -> (&str, Unit, Option<&str>) {
        (&self.category, self.unit, self.entity.as_deref())
    }
}
