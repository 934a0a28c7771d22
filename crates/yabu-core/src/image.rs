//! Raster representation for the filter pipeline.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::CoreError;

/// One 8-bit RGBA sample.
///
/// Laid out as four consecutive bytes so RGBA byte slices can be viewed
/// as pixel slices without copying.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color channels as floats in 0..=255 space.
    pub fn rgb_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }
}

/// Immutable RGBA raster. Always stored as 8-bit straight alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl ImageBuffer {
    /// Wrap already-built pixels. `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, CoreError> {
        if pixels.len() as u64 != width as u64 * height as u64 {
            return Err(CoreError::InvalidDimensions {
                width,
                height,
                len: pixels.len() * 4,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from interleaved RGBA bytes as handed over by a decoder.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, CoreError> {
        let expected = (width as u64)
            .checked_mul(height as u64)
            .and_then(|n| n.checked_mul(4));
        if expected != Some(rgba.len() as u64) {
            return Err(CoreError::InvalidDimensions {
                width,
                height,
                len: rgba.len(),
            });
        }
        let pixels: &[Pixel] = bytemuck::cast_slice(rgba);
        Ok(Self {
            width,
            height,
            pixels: pixels.to_vec(),
        })
    }

    /// A 0x0 raster.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Same dimensions as `self`, new pixel data.
    pub(crate) fn with_pixels(&self, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(pixels.len(), self.pixels.len());
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Interleaved RGBA bytes, borrowed.
    pub fn as_rgba(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl From<image::RgbaImage> for ImageBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels: &[Pixel] = bytemuck::cast_slice(img.as_raw().as_slice());
        Self {
            width,
            height,
            pixels: pixels.to_vec(),
        }
    }
}

impl fmt::Display for ImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} RGBA8", self.width, self.height)
    }
}
