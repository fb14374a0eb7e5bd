use aex_data::palette::{
    build_gradient, cool_warm_anchors, parse_colors, BLUES, DEFAULT_GRADIENT_STEPS, GREENS,
    NO_DATA_COLOR,
};
use aex_data::top_k::DEFAULT_TOP_K;
use aex_data::{ColorError, Gradient, Rgb};
use serde::{Deserialize, Serialize};

/// Default number of trailing points in the time-series payload.
pub const DEFAULT_SERIES_WINDOW: usize = 24;

/// Presentation policy for the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Size of the highlight subset.
    pub top_k: usize,
    /// Trailing points kept in the time-series payload.
    pub series_window: usize,
    pub gradient_steps: usize,
    pub no_data_color: String,
    /// Cool sub-ramp, light to dark. Reversed at the start of the gradient.
    pub cool_colors: Vec<String>,
    /// Warm sub-ramp, light to dark. Appended after the cool one.
    pub warm_colors: Vec<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            series_window: DEFAULT_SERIES_WINDOW,
            gradient_steps: DEFAULT_GRADIENT_STEPS,
            no_data_color: NO_DATA_COLOR.to_string(),
            cool_colors: BLUES.iter().map(Rgb::to_hex).collect(),
            warm_colors: GREENS.iter().map(Rgb::to_hex).collect(),
        }
    }
}

impl ViewConfig {
    /// Build the color gradient described by this config.
    pub fn gradient(&self) -> Result<Gradient, ColorError> {
        let cool = parse_colors(&self.cool_colors)?;
        let warm = parse_colors(&self.warm_colors)?;
        Rgb::from_hex(&self.no_data_color)?;
        Ok(build_gradient(
            &cool_warm_anchors(&cool, &warm),
            self.gradient_steps,
        ))
    }
}
