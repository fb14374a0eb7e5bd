//! Data processing for the export choropleth.
//!
//! This crate turns raw metric values into display and ranking values,
//! maps ranking values onto a quantized color gradient, and selects the
//! top-K entities that drive the highlighted view.

pub mod colorize;
pub mod palette;
pub mod top_k;
pub mod transform;

pub use colorize::{colorize, ColorRange};
pub use palette::{build_gradient, ColorError, Gradient, Rgb};
pub use top_k::{local_range, select_top_k, TopEntry};
pub use transform::{transform, transform_entity, DataFlag, EntityValue, Transformed};
