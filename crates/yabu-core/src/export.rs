//! PNG export of the rendered image and the platform share seam.

use std::io::Cursor;

use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::error::CoreError;
use crate::image::ImageBuffer;

/// File name offered to the share sheet.
pub const EXPORT_FILE_NAME: &str = "processed-image.png";
/// MIME type of [`ExportAsset::data`].
pub const EXPORT_MIME: &str = "image/png";

/// An encoded image ready to hand to a share mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportAsset {
    pub file_name: String,
    pub mime: String,
    pub title: String,
    pub text: String,
    /// Encoded PNG bytes.
    pub data: Vec<u8>,
}

/// Platform share/export mechanism (share sheet, clipboard, download, ...).
pub trait ShareTarget {
    /// Whether sharing files is possible at all on this platform.
    fn is_supported(&self) -> bool;

    /// Hand the asset to the platform.
    fn share(&mut self, asset: ExportAsset) -> Result<(), CoreError>;
}

/// Encode `frame` as an RGBA8 PNG.
pub fn encode_png(frame: &ImageBuffer) -> Result<Vec<u8>, CoreError> {
    if frame.is_empty() {
        return Err(CoreError::Encoding("image has no pixels".to_string()));
    }

    let mut buffer = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        Cursor::new(&mut buffer),
        CompressionType::Fast,
        FilterType::Adaptive,
    );
    encoder
        .write_image(
            frame.as_rgba(),
            frame.width(),
            frame.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(buffer)
}

/// Encode `frame` and wrap it with the share metadata.
pub fn export_asset(frame: &ImageBuffer) -> Result<ExportAsset, CoreError> {
    Ok(ExportAsset {
        file_name: EXPORT_FILE_NAME.to_string(),
        mime: EXPORT_MIME.to_string(),
        title: "Processed image".to_string(),
        text: "Sharing this image".to_string(),
        data: encode_png(frame)?,
    })
}

/// Check support, encode, and share. Nothing is encoded when unsupported.
pub fn share(frame: &ImageBuffer, target: &mut dyn ShareTarget) -> Result<(), CoreError> {
    if !target.is_supported() {
        return Err(CoreError::UnsupportedExport);
    }
    let asset = export_asset(frame)?;
    tracing::info!(
        "sharing {} ({} bytes, {frame})",
        asset.file_name,
        asset.data.len()
    );
    target.share(asset)
}
