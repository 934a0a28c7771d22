/// Errors surfaced by the filtering core.
///
/// Every variant is recoverable; callers report it to the user and carry on.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("filter catalog must contain at least one filter")]
    EmptyCatalog,

    #[error("pixel data length {len} does not match {width}x{height} RGBA")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("no image loaded")]
    NoImageLoaded,

    #[error("motion sensor permission denied")]
    PermissionDenied,

    #[error("sharing is not supported on this platform")]
    UnsupportedExport,

    #[error("failed to encode image: {0}")]
    Encoding(String),

    #[error("failed to share image: {0}")]
    ShareFailed(String),
}
