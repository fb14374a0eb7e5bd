use crate::anchor::AnchorEntity;
use crate::similarity::ratio;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default minimum similarity for accepting a candidate entity key.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.7;

/// How to choose between candidates with the same top score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The candidate listed first in the entity key enumeration wins.
    #[default]
    FirstListed,
    /// The lexically greatest candidate wins.
    GreatestKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Candidates scoring below this are rejected (0..=1, 1 is exact).
    pub min_similarity: f64,
    pub tie_break: TieBreak,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
            tie_break: TieBreak::FirstListed,
        }
    }
}

/// The best scoring entity key for a boundary name.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub key: &'a str,
    pub score: f64,
}

/// How a boundary name maps onto the metric source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Matched a metric entity key.
    Entity { key: String, score: f64 },
    /// The anchor entity, kept without a match. Never an entity key.
    Anchor,
    /// No candidate reached the similarity threshold.
    Unresolved,
}

impl Resolution {
    pub fn entity_key(&self) -> Option<&str> {
        match self {
            Resolution::Entity { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Score every entity key against `boundary_name` and return the best one,
/// whatever its score. `None` only if there are no keys.
pub fn best_candidate<'a>(
    boundary_name: &str,
    entity_keys: &'a [String],
    tie_break: TieBreak,
) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;
    for key in entity_keys {
        // candidate first: the ratio is not symmetric
        let score = ratio(key, boundary_name);
        let replace = match &best {
            None => true,
            Some(current) => {
                score > current.score
                    || (score == current.score
                        && tie_break == TieBreak::GreatestKey
                        && key.as_str() > current.key)
            }
        };
        if replace {
            best = Some(Candidate {
                key: key.as_str(),
                score,
            });
        }
    }
    best
}

/// Resolve a boundary name to an entity key, or `Unresolved` when the best
/// candidate scores below the configured threshold.
pub fn resolve(boundary_name: &str, entity_keys: &[String], config: &ResolverConfig) -> Resolution {
    match best_candidate(boundary_name, entity_keys, config.tie_break) {
        Some(candidate) if candidate.score >= config.min_similarity => Resolution::Entity {
            key: candidate.key.to_string(),
            score: candidate.score,
        },
        _ => Resolution::Unresolved,
    }
}

/// A boundary record kept on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveEntity {
    pub name: String,
    pub resolution: Resolution,
    /// Position of the record in the boundary dataset; an opaque handle to
    /// its geometry.
    pub boundary_index: usize,
}

/// The boundary records shown on the map, in boundary dataset order with
/// an unmatched anchor appended last.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActiveSet {
    entities: Vec<ActiveEntity>,
    unresolved: Vec<String>,
}

impl ActiveSet {
    pub fn entities(&self) -> &[ActiveEntity] {
        &self.entities
    }

    pub fn get(&self, name: &str) -> Option<&ActiveEntity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    /// Boundary names dropped because they did not resolve.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Active names in sorted order, for entity selectors.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Resolve every boundary name and keep the ones that match, plus the
/// anchor if it appears in the boundary dataset. Repeated names keep their
/// first record.
pub fn build_active_set<S: AsRef<str>>(
    boundary_names: &[S],
    entity_keys: &[String],
    anchor: &AnchorEntity,
    config: &ResolverConfig,
) -> ActiveSet {
    let mut active = ActiveSet::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unmatched_anchor: Option<usize> = None;

    for (boundary_index, name) in boundary_names.iter().enumerate() {
        let name = name.as_ref();
        if !seen.insert(name) {
            log::debug!("resolver: skipping repeated boundary name {:?}", name);
            continue;
        }
        let resolution = resolve(name, entity_keys, config);
        log::debug!("resolver: {:?} -> {:?}", name, resolution);
        match resolution {
            Resolution::Unresolved if anchor.is_anchor(name) => {
                unmatched_anchor = Some(boundary_index);
            }
            Resolution::Unresolved => active.unresolved.push(name.to_string()),
            resolution => active.entities.push(ActiveEntity {
                name: name.to_string(),
                resolution,
                boundary_index,
            }),
        }
    }

    match unmatched_anchor {
        Some(boundary_index) => active.entities.push(ActiveEntity {
            name: anchor.name.clone(),
            resolution: Resolution::Anchor,
            boundary_index,
        }),
        None if !seen.contains(anchor.name.as_str()) => {
            log::warn!(
                "resolver: anchor {:?} is not in the boundary dataset and will not be drawn",
                anchor.name
            );
        }
        None => {}
    }

    log::info!(
        "resolver: {} boundaries active, {} unresolved (threshold {})",
        active.entities.len(),
        active.unresolved.len(),
        config.min_similarity
    );
    active
}
