//! Image loading and format conversion for the demo application.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use yabu_core::ImageBuffer;

/// Load an image from disk and convert to the internal RGBA8 `ImageBuffer`.
///
/// Supports the formats enabled on the `image` crate (PNG, JPEG).
pub fn load_image(path: &Path) -> Result<ImageBuffer, ImageLoadError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// Decode an encoded image file held in memory.
pub fn decode_image(bytes: &[u8]) -> Result<ImageBuffer, ImageLoadError> {
    let img = image::load_from_memory(bytes).map_err(ImageLoadError::Decode)?;
    Ok(ImageBuffer::from(img.to_rgba8()))
}

/// Decode a base64 string carrying an encoded image file.
///
/// Accepts a bare payload or a `data:<mime>;base64,` URL.
pub fn decode_base64_image(data: &str) -> Result<ImageBuffer, ImageLoadError> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    let bytes = STANDARD.decode(payload.trim())?;
    decode_image(&bytes)
}

/// Errors that can occur during image loading.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = ImageBuffer::from_rgba(1, 2, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        yabu_core::export::encode_png(&img).unwrap()
    }

    #[test]
    fn test_decode_data_url() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode(tiny_png()));
        let img = decode_base64_image(&url).unwrap();
        assert_eq!((img.width(), img.height()), (1, 2));
        assert_eq!(img.as_rgba(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_decode_bare_base64() {
        let img = decode_base64_image(&STANDARD.encode(tiny_png())).unwrap();
        assert_eq!(img.height(), 2);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            decode_image(b"not an image"),
            Err(ImageLoadError::Decode(_))
        ));
        assert!(matches!(
            decode_base64_image("@@@"),
            Err(ImageLoadError::Base64(_))
        ));
    }
}
