//! Resolution of boundary dataset names against metric entity keys.
//!
//! Boundary names (e.g. "United States of America") and metric entity keys
//! (e.g. "United States") come from independent sources. Each boundary name
//! is matched to its most similar entity key when the similarity reaches a
//! configured threshold. The [`AnchorEntity`] policy keeps the reporting
//! country on the map even when it has no match.

pub mod anchor;
pub mod resolver;
pub mod similarity;

pub use anchor::AnchorEntity;
pub use resolver::{
    best_candidate, build_active_set, resolve, ActiveEntity, ActiveSet, Candidate, Resolution,
    ResolverConfig, TieBreak,
};
