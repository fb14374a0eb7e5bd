use crate::colorize::ColorRange;
use crate::transform::EntityValue;
use aex_resolve::AnchorEntity;
use serde::Serialize;
use std::cmp::Ordering;

/// Default number of entities in the highlight subset.
pub const DEFAULT_TOP_K: usize = 15;

/// One selected entity, with the value shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopEntry {
    pub name: String,
    pub display_value: f64,
    #[serde(skip)]
    pub ranking_value: f64,
}

struct Candidate {
    position: usize,
    ranking: f64,
    display: f64,
}

fn by_ranking_desc(a: &Candidate, b: &Candidate) -> Ordering {
    b.ranking
        .total_cmp(&a.ranking)
        .then(a.position.cmp(&b.position))
}

fn by_display_desc(a: &Candidate, b: &Candidate) -> Ordering {
    b.display
        .total_cmp(&a.display)
        .then(a.position.cmp(&b.position))
}

/// Select the `k` entities with the largest ranking value.
///
/// Entities without a ranking value and the anchor never qualify. Equal
/// ranking values are decided by input order. The result is sorted by
/// display value, largest first, and holds fewer than `k` entries when
/// fewer entities qualify.
pub fn select_top_k(entities: &[EntityValue], k: usize, anchor: &AnchorEntity) -> Vec<TopEntry> {
    if k == 0 {
        return Vec::new();
    }
    let mut candidates: Vec<Candidate> = entities
        .iter()
        .enumerate()
        .filter(|(_, entity)| !anchor.is_anchor(&entity.name))
        .filter_map(|(position, entity)| {
            Some(Candidate {
                position,
                ranking: entity.value.ranking_value?,
                display: entity.value.display_value?,
            })
        })
        .collect();

    if candidates.len() > k {
        candidates.select_nth_unstable_by(k - 1, by_ranking_desc);
        candidates.truncate(k);
    }
    candidates.sort_by(by_display_desc);

    log::debug!("top-k: selected {} of {} entities (k = {})", candidates.len(), entities.len(), k);
    candidates
        .into_iter()
        .map(|c| TopEntry {
            name: entities[c.position].name.clone(),
            display_value: c.display,
            ranking_value: c.ranking,
        })
        .collect()
}

/// Normalization range local to a highlight subset.
pub fn local_range(selected: &[TopEntry]) -> Option<ColorRange> {
    ColorRange::from_values(selected.iter().map(|entry| Some(entry.ranking_value)))
}
