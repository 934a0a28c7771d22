//! Per-pixel filter application with intensity blending.
//!
//! For each pixel, independently:
//! ```text
//! (fr, fg, fb) = filter(r, g, b)
//! out_c = clamp(c × (1 − i) + f_c × i, 0, 255)
//! out_a = a
//! ```
//!
//! ```text
//!   Original ──→ Filter ──→ Lerp(original, filtered, i) ──→ Clamp ──→ Round ──→ Output
//!      └──────────────── alpha passes through ─────────────────────────────────────┘
//! ```

use rayon::prelude::*;

use crate::filter::{FilterDefinition, Intensity};
use crate::image::{ImageBuffer, Pixel};

/// Apply `filter` to `original` at `intensity`, producing a fresh buffer.
///
/// `original` is never modified, so the same snapshot can be re-filtered
/// any number of times. The result has identical dimensions and is only
/// returned once every pixel has been written.
pub fn apply(original: &ImageBuffer, filter: &FilterDefinition, intensity: Intensity) -> ImageBuffer {
    let t = Intensity::new(intensity.get()).get();
    let pixels: Vec<Pixel> = original
        .pixels()
        .par_iter()
        .map(|&px| blend_pixel(px, filter, t))
        .collect();

    original.with_pixels(pixels)
}

/// Blend one pixel toward its filtered color.
pub fn blend_pixel(px: Pixel, filter: &FilterDefinition, intensity: f32) -> Pixel {
    let rgb = px.rgb_f32();
    let filtered = filter.transform(rgb);
    let keep = 1.0 - intensity;

    Pixel {
        r: to_channel(rgb[0] * keep + filtered[0] * intensity),
        g: to_channel(rgb[1] * keep + filtered[1] * intensity),
        b: to_channel(rgb[2] * keep + filtered[2] * intensity),
        a: px.a,
    }
}

/// Clamp to 0..=255 and round half to even, as an 8-bit clamped store does.
fn to_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterCatalog, FilterKind};

    fn single(px: Pixel) -> ImageBuffer {
        ImageBuffer::from_pixels(1, 1, vec![px]).unwrap()
    }

    fn run(kind: FilterKind, intensity: f32, px: Pixel) -> Pixel {
        let out = apply(&single(px), &kind.into(), Intensity::new(intensity));
        out.pixels()[0]
    }

    /// Every combination of a few channel values and alphas.
    fn sample_image() -> ImageBuffer {
        let levels = [0u8, 1, 64, 127, 128, 200, 254, 255];
        let mut pixels = Vec::new();
        for &r in &levels {
            for &g in &levels {
                for &b in &levels {
                    pixels.push(Pixel::new(r, g, b, r ^ g ^ b));
                }
            }
        }
        let len = pixels.len() as u32;
        ImageBuffer::from_pixels(len, 1, pixels).unwrap()
    }

    #[test]
    fn test_grayscale_full_intensity() {
        assert_eq!(
            run(FilterKind::Grayscale, 1.0, Pixel::new(255, 0, 0, 255)),
            Pixel::new(85, 85, 85, 255)
        );
    }

    #[test]
    fn test_sepia_white_clamps_red_and_green() {
        // Blue row sums to 0.937, so only red and green saturate.
        assert_eq!(
            run(FilterKind::Sepia, 1.0, Pixel::new(255, 255, 255, 255)),
            Pixel::new(255, 255, 239, 255)
        );
    }

    #[test]
    fn test_invert_keeps_alpha() {
        assert_eq!(
            run(FilterKind::Invert, 1.0, Pixel::new(10, 20, 30, 10)),
            Pixel::new(245, 235, 225, 10)
        );
    }

    #[test]
    fn test_brightness_half_intensity() {
        assert_eq!(
            run(FilterKind::BrightnessUp, 0.5, Pixel::new(200, 10, 10, 255)),
            Pixel::new(225, 35, 35, 255)
        );
    }

    #[test]
    fn test_zero_intensity_is_identity() {
        let img = sample_image();
        for filter in FilterCatalog::builtin().iter() {
            let out = apply(&img, filter, Intensity::NONE);
            assert_eq!(out, img, "{} at 0.0 must be identity", filter.name);
        }
    }

    #[test]
    fn test_full_intensity_is_clamped_filter_output() {
        let img = sample_image();
        for filter in FilterCatalog::builtin().iter() {
            let out = apply(&img, filter, Intensity::FULL);
            for (src, dst) in img.pixels().iter().zip(out.pixels()) {
                let f = filter.transform(src.rgb_f32());
                let expected = Pixel::new(
                    to_channel(f[0]),
                    to_channel(f[1]),
                    to_channel(f[2]),
                    src.a,
                );
                assert_eq!(*dst, expected, "{} on {:?}", filter.name, src);
            }
        }
    }

    #[test]
    fn test_alpha_invariant_across_intensities() {
        let img = sample_image();
        for filter in FilterCatalog::builtin().iter() {
            for step in 0..=10 {
                let out = apply(&img, filter, Intensity::new(step as f32 / 10.0));
                assert!(
                    img.pixels()
                        .iter()
                        .zip(out.pixels())
                        .all(|(a, b)| a.a == b.a),
                    "{} changed alpha at step {step}",
                    filter.name
                );
            }
        }
    }

    #[test]
    fn test_original_untouched_and_dimensions_kept() {
        let img = ImageBuffer::from_rgba(2, 3, &[77; 24]).unwrap();
        let before = img.clone();
        let out = apply(&img, &FilterKind::Invert.into(), Intensity::FULL);
        assert_eq!(img, before);
        assert_eq!((out.width(), out.height()), (2, 3));
        assert_ne!(out, img);
    }

    #[test]
    fn test_empty_image_yields_empty() {
        let out = apply(
            &ImageBuffer::empty(),
            &FilterKind::Sepia.into(),
            Intensity::FULL,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_to_channel_rounds_and_clamps() {
        assert_eq!(to_channel(-4.0), 0);
        assert_eq!(to_channel(344.5), 255);
        assert_eq!(to_channel(20.4), 20);
        assert_eq!(to_channel(20.6), 21);
        assert_eq!(to_channel(f32::NAN), 0);
    }
}
