//! Gradient construction from discrete anchor colors.
//!
//! The default ramp is a cool (blue) sub-ramp reversed, running dark to
//! light, followed by a warm (green) sub-ramp running light to dark. The
//! gradient is sampled once into a fixed number of steps by linear
//! interpolation in RGB space.

use serde::Serialize;
use std::fmt;

/// Default number of discrete gradient steps.
pub const DEFAULT_GRADIENT_STEPS: usize = 50;

/// Color for entities without a ranking value, or dimmed by a highlight.
pub const NO_DATA_COLOR: &str = "#dddddd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Seven-step blue ramp, light to dark.
pub const BLUES: [Rgb; 7] = [
    Rgb::new(0xc6, 0xdb, 0xef),
    Rgb::new(0x9e, 0xca, 0xe1),
    Rgb::new(0x6b, 0xae, 0xd6),
    Rgb::new(0x42, 0x92, 0xc6),
    Rgb::new(0x21, 0x71, 0xb5),
    Rgb::new(0x08, 0x51, 0x9c),
    Rgb::new(0x08, 0x30, 0x6b),
];

/// Seven-step green ramp, light to dark.
pub const GREENS: [Rgb; 7] = [
    Rgb::new(0xc7, 0xe9, 0xc0),
    Rgb::new(0xa1, 0xd9, 0x9b),
    Rgb::new(0x74, 0xc4, 0x76),
    Rgb::new(0x41, 0xab, 0x5d),
    Rgb::new(0x23, 0x8b, 0x45),
    Rgb::new(0x00, 0x6d, 0x2c),
    Rgb::new(0x00, 0x44, 0x1b),
];

/// A malformed hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorError(pub String);

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid hex color: {:?}", self.0)
    }
}

impl std::error::Error for ColorError {}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Rgb, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorError(hex.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Parse a list of hex colors.
pub fn parse_colors<S: AsRef<str>>(hex_colors: &[S]) -> Result<Vec<Rgb>, ColorError> {
    hex_colors.iter().map(|h| Rgb::from_hex(h.as_ref())).collect()
}

/// Join a cool sub-ramp (reversed) and a warm sub-ramp into one ramp.
pub fn cool_warm_anchors(cool: &[Rgb], warm: &[Rgb]) -> Vec<Rgb> {
    cool.iter().rev().chain(warm.iter()).copied().collect()
}

/// The default blue-then-green anchor colors.
pub fn default_anchor_colors() -> Vec<Rgb> {
    cool_warm_anchors(&BLUES, &GREENS)
}

/// A precomputed, ordered sequence of hex colors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Gradient(Vec<String>);

impl Gradient {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn colors(&self) -> &[String] {
        &self.0
    }
}

/// Sample `steps` evenly spaced colors along the piecewise-linear ramp
/// through `anchor_colors`. The first and last steps are exactly the first
/// and last anchors.
pub fn build_gradient(anchor_colors: &[Rgb], steps: usize) -> Gradient {
    let colors = match anchor_colors {
        [] => Vec::new(),
        [only] => vec![only.to_hex(); steps],
        _ => {
            let segments = anchor_colors.len() - 1;
            (0..steps)
                .map(|i| {
                    let t = if steps > 1 {
                        i as f64 / (steps - 1) as f64
                    } else {
                        0.0
                    };
                    let position = t * segments as f64;
                    let lo = (position.floor() as usize).min(segments - 1);
                    anchor_colors[lo]
                        .lerp(&anchor_colors[lo + 1], position - lo as f64)
                        .to_hex()
                })
                .collect()
        }
    };
    Gradient(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Rgb::from_hex("#08306B").unwrap();
        assert_eq!(c, Rgb::new(0x08, 0x30, 0x6b));
        assert_eq!(c.to_hex(), "#08306b");
        assert_eq!(Rgb::from_hex("dddddd").unwrap().to_hex(), NO_DATA_COLOR);
    }

    #[test]
    fn test_bad_hex() {
        assert!(Rgb::from_hex("#ddd").is_err());
        assert!(Rgb::from_hex("#gggggg").is_err());
        assert!(Rgb::from_hex("#dddddd00").is_err());
        assert!(parse_colors(&["#000000", "nope"]).is_err());
    }

    #[test]
    fn test_default_anchor_order() {
        let anchors = default_anchor_colors();
        assert_eq!(anchors.len(), 14);
        assert_eq!(anchors[0].to_hex(), "#08306b");
        assert_eq!(anchors[6].to_hex(), "#c6dbef");
        assert_eq!(anchors[7].to_hex(), "#c7e9c0");
        assert_eq!(anchors[13].to_hex(), "#00441b");
    }

    #[test]
    fn test_gradient_endpoints_and_length() {
        let gradient = build_gradient(&default_anchor_colors(), DEFAULT_GRADIENT_STEPS);
        assert_eq!(gradient.len(), 50);
        assert_eq!(gradient.get(0), Some("#08306b"));
        assert_eq!(gradient.get(49), Some("#00441b"));
    }

    #[test]
    fn test_gradient_hits_anchors_when_steps_match() {
        let anchors = default_anchor_colors();
        let gradient = build_gradient(&anchors, anchors.len());
        let expected: Vec<String> = anchors.iter().map(Rgb::to_hex).collect();
        assert_eq!(gradient.colors(), expected.as_slice());
    }

    #[test]
    fn test_gradient_midpoint_interpolation() {
        let gradient = build_gradient(&[Rgb::new(0, 0, 0), Rgb::new(200, 100, 50)], 3);
        assert_eq!(gradient.colors(), &["#000000", "#643219", "#c86432"]);
    }

    #[test]
    fn test_gradient_degenerate_inputs() {
        assert!(build_gradient(&[], 10).is_empty());
        assert!(build_gradient(&default_anchor_colors(), 0).is_empty());
        let single = build_gradient(&default_anchor_colors(), 1);
        assert_eq!(single.colors(), &["#08306b"]);
        let flat = build_gradient(&[Rgb::new(1, 2, 3)], 3);
        assert_eq!(flat.colors(), &["#010203", "#010203", "#010203"]);
    }

    #[test]
    fn test_gradient_is_deterministic() {
        let a = build_gradient(&default_anchor_colors(), 50);
        let b = build_gradient(&default_anchor_colors(), 50);
        assert_eq!(a, b);
    }
}
