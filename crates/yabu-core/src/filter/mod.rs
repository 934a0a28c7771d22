//! Filter definitions: color transforms, blend intensity, and the catalog.

pub mod catalog;

use std::fmt;

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

pub use catalog::FilterCatalog;

/// Amount added to every channel by [`FilterKind::BrightnessUp`].
const BRIGHTNESS_STEP: f32 = 50.0;

/// The closed set of color transforms.
///
/// Every transform maps an `(r, g, b)` triple in 0..=255 space to another
/// triple. Alpha is never part of a transform. Outputs may leave 0..=255;
/// the pipeline clamps after blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Equal-weight average of the three channels.
    Grayscale,
    /// Classic sepia tone matrix (unclamped).
    Sepia,
    /// `255 − c` per channel.
    Invert,
    /// `+50` per channel, clamped.
    BrightnessUp,
}

impl FilterKind {
    /// Human-readable label for status text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale",
            Self::Sepia => "Sepia",
            Self::Invert => "Invert",
            Self::BrightnessUp => "Brightness Up",
        }
    }

    /// Apply this transform to one color triple.
    pub fn transform(&self, rgb: [f32; 3]) -> [f32; 3] {
        let [r, g, b] = rgb;
        match self {
            Self::Grayscale => {
                let avg = (r + g + b) / 3.0;
                [avg, avg, avg]
            }
            Self::Sepia => (sepia_matrix() * Vec3::from_array(rgb)).to_array(),
            Self::Invert => [255.0 - r, 255.0 - g, 255.0 - b],
            Self::BrightnessUp => [
                (r + BRIGHTNESS_STEP).clamp(0.0, 255.0),
                (g + BRIGHTNESS_STEP).clamp(0.0, 255.0),
                (b + BRIGHTNESS_STEP).clamp(0.0, 255.0),
            ],
        }
    }
}

/// Sepia weights, column-major: column `n` is the contribution of input
/// channel `n` to each output channel.
///
/// ```text
/// r' = 0.393 r + 0.769 g + 0.189 b
/// g' = 0.349 r + 0.686 g + 0.168 b
/// b' = 0.272 r + 0.534 g + 0.131 b
/// ```
fn sepia_matrix() -> Mat3 {
    Mat3::from_cols(
        Vec3::new(0.393, 0.349, 0.272),
        Vec3::new(0.769, 0.686, 0.534),
        Vec3::new(0.189, 0.168, 0.131),
    )
}

/// A named entry in the [`FilterCatalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDefinition {
    /// Name shown to the user.
    pub name: String,
    /// Transform applied by the pipeline.
    pub kind: FilterKind,
}

impl FilterDefinition {
    pub fn new(name: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn transform(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.kind.transform(rgb)
    }
}

impl From<FilterKind> for FilterDefinition {
    fn from(kind: FilterKind) -> Self {
        Self::new(kind.label(), kind)
    }
}

/// Blend factor between the original color (0.0) and the filtered color (1.0).
///
/// Always within `0.0..=1.0`; every constructor clamps instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Intensity(f32);

impl Intensity {
    pub const NONE: Self = Self(0.0);
    pub const FULL: Self = Self(1.0);

    /// Clamp `value` into `0.0..=1.0`. NaN becomes `0.0`.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::NONE;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Convert slider units (`0..=100`) to an intensity.
    pub fn from_percent(percent: f64) -> Self {
        Self::new((percent / 100.0) as f32)
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<f32> for Intensity {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Intensity> for f32 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn assert_rgb_close(actual: [f32; 3], expected: [f32; 3]) {
        for c in 0..3 {
            assert!(
                (actual[c] - expected[c]).abs() < EPSILON,
                "channel {c}: {:.4} vs {:.4}",
                actual[c],
                expected[c]
            );
        }
    }

    #[test]
    fn test_grayscale_averages_channels() {
        assert_rgb_close(
            FilterKind::Grayscale.transform([255.0, 0.0, 0.0]),
            [85.0, 85.0, 85.0],
        );
    }

    #[test]
    fn test_sepia_matches_row_weights() {
        let out = FilterKind::Sepia.transform([100.0, 50.0, 10.0]);
        assert_rgb_close(
            out,
            [
                100.0 * 0.393 + 50.0 * 0.769 + 10.0 * 0.189,
                100.0 * 0.349 + 50.0 * 0.686 + 10.0 * 0.168,
                100.0 * 0.272 + 50.0 * 0.534 + 10.0 * 0.131,
            ],
        );
    }

    #[test]
    fn test_sepia_is_unclamped() {
        let out = FilterKind::Sepia.transform([255.0, 255.0, 255.0]);
        assert!(out[0] > 255.0);
    }

    #[test]
    fn test_invert_is_involution() {
        let rgb = [10.0, 20.0, 30.0];
        let once = FilterKind::Invert.transform(rgb);
        assert_rgb_close(once, [245.0, 235.0, 225.0]);
        assert_rgb_close(FilterKind::Invert.transform(once), rgb);
    }

    #[test]
    fn test_brightness_up_saturates_at_white() {
        assert_rgb_close(
            FilterKind::BrightnessUp.transform([230.0, 10.0, 205.0]),
            [255.0, 60.0, 255.0],
        );
    }

    #[test]
    fn test_intensity_clamps_out_of_range() {
        assert_eq!(Intensity::new(-0.5).get(), 0.0);
        assert_eq!(Intensity::new(1.5).get(), 1.0);
        assert_eq!(Intensity::new(f32::NAN).get(), 0.0);
        assert_eq!(Intensity::new(0.25).get(), 0.25);
    }

    #[test]
    fn test_intensity_from_percent() {
        assert_eq!(Intensity::from_percent(50.0).get(), 0.5);
        assert_eq!(Intensity::from_percent(100.0), Intensity::FULL);
        assert_eq!(Intensity::from_percent(250.0), Intensity::FULL);
        assert_eq!(Intensity::from_percent(-3.0), Intensity::NONE);
        assert_eq!(Intensity::from_percent(37.0).to_string(), "0.37");
        assert_eq!(Intensity::from_percent(f64::NAN), Intensity::NONE);
        assert_eq!(Intensity::from_percent(1e300), Intensity::FULL);
    }

    #[test]
    fn test_intensity_deserialize_clamps() {
        let parsed: Intensity = serde_json::from_str("3.0").unwrap();
        assert_eq!(parsed, Intensity::FULL);
    }
}
