//! Selection changes to view payloads.
//!
//! Every change runs the same pipeline: transform the latest value of each
//! active entity under the selected (category, unit), pick the normalization
//! range (global, or local to the top-K subset when highlighting), colorize,
//! and refresh the time series only when its own inputs changed.

use crate::config::ViewConfig;
use crate::models::{
    map_title, scale_title, series_title, top_k_title, FeaturePayload, ScalePayload,
    SeriesPayload, TimedValue, TopKPayload, ViewPayload,
};
use crate::selection::{Highlight, Selection, SelectionEvent};
use aex_data::{
    colorize, local_range, select_top_k, transform_entity, ColorError, ColorRange, EntityValue,
    Gradient,
};
use aex_metrics::MetricTable;
use aex_resolve::{ActiveSet, AnchorEntity};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Recomputing,
}

/// Owns the current selection and the view derived from it.
pub struct ViewCoordinator<'a> {
    table: &'a MetricTable,
    active: &'a ActiveSet,
    anchor: &'a AnchorEntity,
    config: ViewConfig,
    gradient: Gradient,
    phase: Phase,
    selection: Selection,
    view: ViewPayload,
}

impl<'a> ViewCoordinator<'a> {
    /// Start on the initial selection of `table`, with the view computed.
    pub fn new(
        table: &'a MetricTable,
        active: &'a ActiveSet,
        anchor: &'a AnchorEntity,
        config: ViewConfig,
    ) -> Result<Self, ColorError> {
        let gradient = config.gradient()?;
        let mut coordinator = ViewCoordinator {
            table,
            active,
            anchor,
            config,
            gradient,
            phase: Phase::Idle,
            selection: Selection::initial(table),
            view: ViewPayload::default(),
        };
        coordinator.recompute(None);
        Ok(coordinator)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &ViewPayload {
        &self.view
    }

    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    /// Active boundary names, sorted, for the entity selector.
    pub fn entity_names(&self) -> Vec<&str> {
        self.active.sorted_names()
    }

    pub fn dispatch(&mut self, event: &SelectionEvent) -> &ViewPayload {
        let next = self.selection.apply(event);
        self.select(next)
    }

    /// Make `selection` current and recompute the view.
    pub fn select(&mut self, selection: Selection) -> &ViewPayload {
        let previous = std::mem::replace(&mut self.selection, selection);
        self.recompute(Some(&previous));
        &self.view
    }

    fn recompute(&mut self, previous: Option<&Selection>) {
        self.phase = Phase::Recomputing;
        log::debug!("view: idle -> recomputing for {:?}", self.selection);

        let Selection {
            category,
            unit,
            highlight,
            ..
        } = &self.selection;
        let (category, unit) = (category.as_str(), *unit);

        let values: Vec<EntityValue> = self
            .active
            .entities()
            .iter()
            .map(|entity| {
                let raw = entity
                    .resolution
                    .entity_key()
                    .and_then(|key| self.table.latest(key, category, unit));
                EntityValue {
                    name: entity.name.clone(),
                    value: transform_entity(&entity.name, raw, unit, self.anchor),
                }
            })
            .collect();

        let (range, top, colors) = match highlight {
            Highlight::Off => {
                let range = ColorRange::from_values(values.iter().map(|v| v.value.ranking_value));
                let colors = colorize(
                    &values,
                    &self.gradient,
                    range,
                    None,
                    self.anchor,
                    &self.config.no_data_color,
                );
                (range, Vec::new(), colors)
            }
            Highlight::TopK => {
                let top = select_top_k(&values, self.config.top_k, self.anchor);
                let range = local_range(&top);
                let colors = {
                    let subset: HashSet<&str> =
                        top.iter().map(|entry| entry.name.as_str()).collect();
                    colorize(
                        &values,
                        &self.gradient,
                        range,
                        Some(&subset),
                        self.anchor,
                        &self.config.no_data_color,
                    )
                };
                (range, top, colors)
            }
        };

        let features = self
            .active
            .entities()
            .iter()
            .zip(&values)
            .map(|(entity, value)| FeaturePayload {
                name: entity.name.clone(),
                entity_key: entity.resolution.entity_key().map(str::to_string),
                boundary_index: entity.boundary_index,
                display_value: value.value.display_value,
                note: value.value.note(self.anchor),
                color: colors
                    .get(&entity.name)
                    .cloned()
                    .unwrap_or_else(|| self.config.no_data_color.clone()),
                flag: value.value.flag,
            })
            .collect();

        let series = match previous {
            Some(prev) if prev.series_key() == self.selection.series_key() => {
                std::mem::take(&mut self.view.series)
            }
            _ => self.build_series(),
        };

        self.view = ViewPayload {
            title: map_title(category, unit),
            selection: self.selection.clone(),
            features,
            scale: ScalePayload {
                title: scale_title(category, unit),
                gradient: self.gradient.clone(),
                range_min: range.map(|r| r.min),
                range_max: range.map(|r| r.max),
            },
            top_k: TopKPayload {
                title: top_k_title(self.config.top_k, category, unit),
                entries: top,
            },
            series,
        };

        self.phase = Phase::Idle;
        log::debug!("view: recomputing -> idle");
    }

    fn build_series(&self) -> SeriesPayload {
        let (category, unit, entity) = self.selection.series_key();
        let Some(name) = entity else {
            return SeriesPayload::default();
        };
        let key = self
            .active
            .get(name)
            .and_then(|entity| entity.resolution.entity_key());
        let points: Vec<TimedValue> = match key {
            Some(key) => self
                .table
                .series(key, category, unit, self.config.series_window)
                .into_iter()
                .map(|point| TimedValue {
                    timestamp: point.timestamp,
                    display_value: point.value,
                })
                .collect(),
            None => {
                log::debug!("view: no series for {:?}", name);
                Vec::new()
            }
        };
        log::debug!("view: series for {:?} has {} points", name, points.len());
        SeriesPayload {
            entity: Some(name.to_string()),
            title: series_title(name, category, unit),
            latest: points.last().and_then(|point| point.display_value),
            points,
        }
    }
}
