//! Ranking values to gradient colors.
//!
//! For each entity, in order of precedence:
//! 1. the anchor gets its fixed color;
//! 2. a missing ranking value gets the no-data gray;
//! 3. with a highlight subset active, entities outside it get the same gray;
//! 4. otherwise the value is min-max normalized over the active range,
//!    clamped to `[0, 1]`, and quantized to a gradient step.
//!
//! A degenerate range (`min == max`) normalizes everything to 0, i.e. the
//! first gradient step.

use crate::palette::Gradient;
use crate::transform::EntityValue;
use aex_resolve::AnchorEntity;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// The normalization range of the color scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

impl ColorRange {
    /// Min and max over the present values, or `None` if there are none.
    pub fn from_values<I: IntoIterator<Item = Option<f64>>>(values: I) -> Option<ColorRange> {
        values
            .into_iter()
            .flatten()
            .fold(None, |range: Option<ColorRange>, v| match range {
                None => Some(ColorRange { min: v, max: v }),
                Some(r) => Some(ColorRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Position of `value` within the range, clamped to `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Gradient index for a normalized position. Halfway cases round to even.
pub fn quantize(t: f64, steps: usize) -> usize {
    if steps == 0 {
        return 0;
    }
    let index = (t.clamp(0.0, 1.0) * (steps - 1) as f64).round_ties_even() as usize;
    index.min(steps - 1)
}

/// Assign a hex color to every entity, keyed by entity name.
///
/// `range` is the normalization range (global, or local to the highlight
/// subset); `highlight` is the subset left undimmed, if any.
pub fn colorize(
    entities: &[EntityValue],
    gradient: &Gradient,
    range: Option<ColorRange>,
    highlight: Option<&HashSet<&str>>,
    anchor: &AnchorEntity,
    no_data_color: &str,
) -> BTreeMap<String, String> {
    if range.is_some_and(|r| r.is_degenerate()) {
        log::debug!("colorize: degenerate range {:?}, using first gradient step", range);
    }
    entities
        .iter()
        .map(|entity| {
            let color = if anchor.is_anchor(&entity.name) {
                anchor.color.as_str()
            } else {
                match entity.value.ranking_value {
                    None => no_data_color,
                    Some(_) if highlight.is_some_and(|h| !h.contains(entity.name.as_str())) => {
                        no_data_color
                    }
                    Some(v) => {
                        let t = range.map_or(0.0, |r| r.normalize(v));
                        gradient
                            .get(quantize(t, gradient.len()))
                            .unwrap_or(no_data_color)
                    }
                }
            };
            (entity.name.clone(), color.to_string())
        })
        .collect()
}
