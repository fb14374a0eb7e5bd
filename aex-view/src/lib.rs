//! Selection state and the view payloads derived from it.

pub mod config;
pub mod coordinator;
pub mod models;
pub mod selection;

pub use config::ViewConfig;
pub use coordinator::{Phase, ViewCoordinator};
pub use models::{FeaturePayload, ScalePayload, SeriesPayload, TimedValue, TopKPayload, ViewPayload};
pub use selection::{Highlight, Selection, SelectionEvent};
